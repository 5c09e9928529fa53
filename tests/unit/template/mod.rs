use super::*;
use crate::template::presets::{builtin_templates, template_by_name};

#[test]
fn flat_gradient_json_shape() {
    let t: Template = serde_json::from_str(
        r##"{ "kind": "flatBackground",
              "backdrop": { "style": "gradient", "colors": ["#000000", "#ffffff"], "angleDegrees": 0 } }"##,
    )
    .unwrap();
    assert_eq!(
        t,
        Template::flat(Backdrop::gradient([Color::BLACK, Color::WHITE], 0.0))
    );
    assert!(t.is_flat());
    assert!(t.device_identity().is_none());
}

#[test]
fn device_json_defaults_orientation_and_asset() {
    let t: Template = serde_json::from_str(
        r#"{ "kind": "device", "device": { "deviceKind": "phone" } }"#,
    )
    .unwrap();
    assert_eq!(t, Template::device(DeviceKind::phone(Orientation::Portrait)));
    assert_eq!(
        t.device_identity().and_then(|d| d.asset_path()),
        Some(DEFAULT_PHONE_ASSET)
    );
}

#[test]
fn device_template_round_trips_through_json() {
    let t = Template::device(DeviceKind::BrowserWindow)
        .with_background(Backdrop::solid(Color::rgb(1, 2, 3)));
    let s = serde_json::to_string(&t).unwrap();
    let back: Template = serde_json::from_str(&s).unwrap();
    assert_eq!(back, t);
}

#[test]
fn device_always_resolves_a_backdrop() {
    let default = Backdrop::gradient([Color::BLACK, Color::WHITE], 135.0);
    let bare = Template::device(DeviceKind::Laptop);
    assert_eq!(bare.resolved_backdrop(&default), default);

    let chosen = Backdrop::solid(Color::WHITE);
    let with_bg = Template::device(DeviceKind::Laptop).with_background(chosen.clone());
    assert_eq!(with_bg.resolved_backdrop(&default), chosen);
}

#[test]
fn with_background_leaves_flat_templates_alone() {
    let flat = Template::flat(Backdrop::solid(Color::BLACK));
    assert_eq!(flat.clone().with_background(Backdrop::solid(Color::WHITE)), flat);
}

#[test]
fn validation_rejects_empty_gradient_and_bad_asset_paths() {
    assert!(Template::flat(Backdrop::gradient(Vec::new(), 0.0)).validate().is_err());
    assert!(Template::flat(Backdrop::gradient([Color::BLACK], f64::NAN)).validate().is_err());
    let escaping = Template::device(DeviceKind::Tablet {
        asset: "../outside".to_string(),
    });
    assert!(escaping.validate().is_err());
}

#[test]
fn orientation_is_part_of_device_identity() {
    let p = Template::device(DeviceKind::phone(Orientation::Portrait));
    let l = Template::device(DeviceKind::phone(Orientation::Landscape));
    assert_ne!(p.device_identity(), l.device_identity());
    let p_bg = p.clone().with_background(Backdrop::solid(Color::WHITE));
    assert_eq!(p.device_identity(), p_bg.device_identity());
}

#[test]
fn catalog_names_are_unique_and_valid() {
    let all = builtin_templates();
    let mut names: Vec<_> = all.iter().map(|t| t.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), all.len());
    for t in &all {
        t.template.validate().unwrap();
    }
    assert!(template_by_name("browser").is_some());
    assert!(template_by_name("nope").is_none());
}
