use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adraster", version)]
struct Cli {
    /// Log pipeline phases to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the format registry in picker order.
    Formats(FormatsArgs),
    /// Show the font scale and layout variant for a geometry.
    Resolve(ResolveArgs),
    /// Export one format.
    Export(ExportArgs),
    /// Export every registry format in order.
    ExportAll(ExportAllArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Studio config JSON. Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Creative content JSON.
    #[arg(long)]
    content: PathBuf,

    /// Output directory, overriding the config.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Font file to load. Repeatable; added to the config's fonts.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct FormatsArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Width in pixels.
    #[arg(long)]
    width: u32,

    /// Height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    render: RenderArgs,

    /// Registry format id. Defaults to the first registry entry.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    format: Option<String>,

    /// Width for an unregistered geometry.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Height for an unregistered geometry.
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct ExportAllArgs {
    #[command(flatten)]
    render: RenderArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Formats(args) => cmd_formats(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Export(args) => cmd_export(args),
        Command::ExportAll(args) => cmd_export_all(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<adraster::StudioConfig> {
    Ok(match path {
        Some(p) => adraster::StudioConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => adraster::StudioConfig::default(),
    })
}

fn open_studio(
    args: &RenderArgs,
) -> anyhow::Result<(adraster::Studio, adraster::CreativeContent)> {
    let mut config = load_config(args.config.config.as_deref())?;
    if let Some(out) = &args.out {
        config.output.dir = out.clone();
    }
    config.fonts.extend(args.fonts.iter().cloned());
    let content = adraster::CreativeContent::from_path(&args.content)
        .with_context(|| format!("load content '{}'", args.content.display()))?;
    let studio = adraster::Studio::from_config(&config)?;
    Ok((studio, content))
}

fn cmd_formats(args: FormatsArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.config.as_deref())?;
    let entries = config.registry()?.entries();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for e in entries {
        println!("{:<16} {:>5}x{:<5} {}", e.id, e.width, e.height, e.label);
    }
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.config.as_deref())?;
    let registry = config.registry()?;
    let r = adraster::resolve(&registry, args.width, args.height);
    let source = registry
        .find_geometry(args.width, args.height)
        .map_or_else(|| "heuristic".to_owned(), |f| format!("registry:{}", f.id));
    println!(
        "{}x{} variant={} font_scale={} ({source})",
        args.width, args.height, r.layout_variant, r.font_scale
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (mut studio, content) = open_studio(&args.render)?;
    let img = match (args.format, args.width, args.height) {
        (_, Some(w), Some(h)) => studio.export_geometry(&content, w, h)?,
        (Some(id), _, _) => studio.export_format(&content, &id)?,
        _ => studio.export_current(&content)?,
    };
    report_written(&img);
    Ok(())
}

fn cmd_export_all(args: ExportAllArgs) -> anyhow::Result<()> {
    let (mut studio, content) = open_studio(&args.render)?;
    let report = studio.export_all(
        &content,
        |p| {
            if p.status == adraster::ItemStatus::InProgress {
                eprintln!("[{}/{}] {}", p.index + 1, p.total, p.label);
            }
        },
        &adraster::CancelToken::new(),
    );

    for item in &report.items {
        match &item.outcome {
            adraster::ItemOutcome::Succeeded(img) => report_written(img),
            adraster::ItemOutcome::Failed(e) => eprintln!("failed {}: {e}", item.format_id),
            adraster::ItemOutcome::Skipped => eprintln!("skipped {}", item.format_id),
        }
    }
    eprintln!(
        "{} exported, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
    if report.failed() > 0 {
        anyhow::bail!("{} of {} formats failed", report.failed(), report.items.len());
    }
    Ok(())
}

fn report_written(img: &adraster::CapturedImage) {
    match &img.path {
        Some(p) => eprintln!("wrote {} ({}x{})", p.display(), img.width, img.height),
        None => eprintln!("captured {} ({}x{})", img.filename, img.width, img.height),
    }
}
