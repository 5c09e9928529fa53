use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./frames//phone").unwrap(), "frames/phone");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn in_memory_source_counts_reads_including_misses() {
    let mut src = InMemoryAssetSource::new();
    src.insert("frames/a.json", b"{}".to_vec()).unwrap();

    assert_eq!(src.read("frames/a.json").unwrap(), b"{}".to_vec());
    assert_eq!(src.read("./frames/a.json").unwrap(), b"{}".to_vec());
    assert!(src.read("frames/missing.json").is_err());
    assert_eq!(src.read_count(), 3);
}

#[test]
fn fs_source_reads_relative_to_root() {
    let dir = std::path::PathBuf::from("target").join("fs_asset_source");
    std::fs::create_dir_all(dir.join("frames")).unwrap();
    std::fs::write(dir.join("frames").join("x.json"), b"[1]").unwrap();

    let src = FsAssetSource::new(&dir);
    assert_eq!(src.read("frames/x.json").unwrap(), b"[1]".to_vec());
    assert!(src.read("frames/none.json").is_err());
    assert!(src.read("../escape.json").is_err());
}
