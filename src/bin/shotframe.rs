use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use shotframe::{
    ComposeRequest, Compositor, EngineConfig, ExportSink as _, FillPreset, FsExportSink,
    ImageTransform, ScreenFill, Size, Template,
};

#[derive(Parser, Debug)]
#[command(name = "shotframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a screenshot into a template and write a PNG.
    Compose(ComposeArgs),
    /// Print the resolved layout for a template and image size as JSON.
    Layout(LayoutArgs),
    /// List built-in templates.
    Templates,
}

#[derive(Parser, Debug)]
struct EngineArgs {
    /// Engine config JSON. Defaults apply to every omitted field.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device frame asset directory (overrides the config).
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Built-in template name (see `shotframe templates`).
    #[arg(long, default_value = "phone-portrait", conflicts_with = "template_file")]
    template: String,

    /// Template JSON file instead of a built-in name.
    #[arg(long)]
    template_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input screenshot (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    template: TemplateArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Zoom relative to the fit scale (clamped to the configured range).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Horizontal offset of the image centre in output pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    x: f64,

    /// Vertical offset of the image centre in output pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    y: f64,

    /// Fill preset; replaces --scale/--x/--y.
    #[arg(long, value_enum)]
    fill: Option<FillChoice>,

    /// Custom text stamped bottom-centre.
    #[arg(long, default_value = "")]
    text: String,

    /// Suppress free-tier branding.
    #[arg(long)]
    entitled: bool,

    /// Color behind the image inside the screen.
    #[arg(long, value_enum, default_value_t = ScreenFillChoice::White)]
    screen_fill: ScreenFillChoice,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Output file name, without the `.png` extension.
    #[arg(long, default_value = "shotframe")]
    name: String,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    template: TemplateArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Source image width in pixels.
    #[arg(long)]
    width: f64,

    /// Source image height in pixels.
    #[arg(long)]
    height: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FillChoice {
    All,
    Horizontal,
    Vertical,
}

impl From<FillChoice> for FillPreset {
    fn from(v: FillChoice) -> Self {
        match v {
            FillChoice::All => Self::All,
            FillChoice::Horizontal => Self::Horizontal,
            FillChoice::Vertical => Self::Vertical,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScreenFillChoice {
    White,
    Black,
}

impl From<ScreenFillChoice> for ScreenFill {
    fn from(v: ScreenFillChoice) -> Self {
        match v {
            ScreenFillChoice::White => Self::White,
            ScreenFillChoice::Black => Self::Black,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Templates => cmd_templates(),
    }
}

fn load_config(args: &EngineArgs) -> anyhow::Result<EngineConfig> {
    let cfg = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let mut cfg = cfg.with_env_overrides()?;
    if let Some(dir) = &args.assets {
        cfg.assets_dir = Some(dir.clone());
    }
    Ok(cfg)
}

fn read_template_json(path: &Path) -> anyhow::Result<Template> {
    let bytes = std::fs::read(path).with_context(|| format!("read template '{}'", path.display()))?;
    let template: Template =
        serde_json::from_slice(&bytes).with_context(|| "parse template JSON")?;
    Ok(template)
}

fn load_template(args: &TemplateArgs) -> anyhow::Result<Template> {
    if let Some(path) = &args.template_file {
        return read_template_json(path);
    }
    shotframe::template_by_name(&args.template).with_context(|| {
        format!(
            "unknown template '{}' (run `shotframe templates`)",
            args.template
        )
    })
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.engine)?;
    let template = load_template(&args.template)?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let image = shotframe::decode_image(&bytes)?;

    let mut compositor = Compositor::from_config(cfg);
    let transform = match args.fill {
        Some(fill) => {
            let layout = compositor.resolve_layout(&template, image.size())?;
            shotframe::fill_transform(fill.into(), layout.screen_size(), image.size())
        }
        None => ImageTransform::new(
            compositor.config().clamp_zoom(args.scale),
            args.x,
            args.y,
        ),
    };

    let req = ComposeRequest {
        image: &image,
        template: &template,
        transform,
        custom_text: &args.text,
        entitled: args.entitled,
        screen_fill: args.screen_fill.into(),
    };
    let out = compositor.compose(req)?;

    let mut sink = FsExportSink::new(&args.out_dir);
    let written = sink.export(&out.frame, &args.name)?;
    eprintln!(
        "wrote {} ({}x{})",
        written, out.frame.width, out.frame.height
    );
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.engine)?;
    let template = load_template(&args.template)?;
    let mut compositor = Compositor::from_config(cfg);
    let layout = compositor.resolve_layout(&template, Size::new(args.width, args.height))?;
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{json}");
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    for t in shotframe::builtin_templates() {
        println!("{:<16} {}", t.name, t.description);
    }
    Ok(())
}
