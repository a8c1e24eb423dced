use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blocky_text::{
    blocky_text_to_image, blocky_text_to_svg, preview_lines, BlockyTextOptions, GlyphTable,
    ThemeName,
};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use warcraft_notify::{
    HttpSource, IdleNotifier, LocalSource, Locations, Platform, PluginConfig, SoundCatalog,
    SoundInstaller, SoundSource, SystemRunner,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Blocky logos and Warcraft II notifications for OpenCode")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render text to an SVG or PNG logo
    Render(RenderArgs),
    /// Draw text with block characters in the terminal
    Preview(PreviewArgs),
    /// Render every supported glyph on one sheet
    Specimen(SpecimenArgs),
    /// Validate plugin.json and print the resolved settings
    CheckConfig(CheckConfigArgs),
    /// Install sound files into the sounds directory
    Install(InstallArgs),
    /// Play a sound and show a notification as if a session went idle
    Idle(IdleArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Text to render
    text: String,
    /// Output file path (SVG is written to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value = "svg")]
    format: OutputFormat,
    #[command(flatten)]
    style: StyleSettings,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Text to preview
    text: String,
    /// Blank columns between characters
    #[arg(long, default_value_t = 1)]
    spacing: usize,
}

#[derive(Parser, Debug)]
struct SpecimenArgs {
    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    style: StyleSettings,
}

#[derive(Parser, Debug)]
struct CheckConfigArgs {
    /// plugin.json to validate (searched in the project and user config otherwise)
    path: Option<PathBuf>,
    /// Project directory containing `.opencode/plugin.json`
    #[arg(long)]
    project: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InstallArgs {
    /// Sound names relative to the sounds directory (e.g. `horde/peon_ready.wav`)
    names: Vec<String>,
    /// Copy sounds from a local directory instead of downloading
    #[arg(long)]
    from: Option<PathBuf>,
    /// Base URL to download sounds from
    #[arg(long, env = "SOUNDS_BASE_URL")]
    base_url: Option<String>,
    /// File listing sound names, one per line
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Destination directory (defaults to the configured sounds directory)
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Project directory containing `.opencode/plugin.json`
    #[arg(long)]
    project: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct IdleArgs {
    /// Project directory containing `.opencode/plugin.json`
    #[arg(long)]
    project: Option<PathBuf>,
    /// Notification text
    #[arg(long)]
    summary: Option<String>,
}

#[derive(Parser, Debug, Clone)]
struct StyleSettings {
    /// Color theme (light or dark)
    #[arg(long, default_value = "dark")]
    theme: ThemeName,
    /// Edge length of one block in pixels
    #[arg(long, default_value_t = 6)]
    block_size: u32,
    /// Gap between characters in pixels (defaults to one block)
    #[arg(long)]
    spacing: Option<u32>,
    /// Merge blocks into one path per color
    #[arg(long, default_value_t = false)]
    optimize: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

fn main() -> Result<()> {
    let locations = Locations::from_process_env();
    init_logging(&locations);

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Preview(args) => preview(args),
        Commands::Specimen(args) => specimen(args),
        Commands::CheckConfig(args) => check_config(args, &locations),
        Commands::Install(args) => install(args, &locations),
        Commands::Idle(args) => idle(args, &locations),
    }
}

fn init_logging(locations: &Locations) {
    let default_level = if locations.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn render(args: RenderArgs) -> Result<()> {
    let options = args.style.to_options();

    match (args.format, args.output) {
        (OutputFormat::Svg, output) => {
            write_text(output.as_deref(), &blocky_text_to_svg(&args.text, &options))
        },
        (OutputFormat::Png, Some(output)) => {
            let image = blocky_text_to_image(&args.text, &options);
            image.save(&output).with_context(|| format!("failed to write {:?}", output))?;
            info!("wrote {}x{} image to {:?}", image.width(), image.height(), output);
            Ok(())
        },
        (OutputFormat::Png, None) => anyhow::bail!("PNG output needs --output"),
    }
}

fn preview(args: PreviewArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in preview_lines(&args.text, args.spacing) {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn specimen(args: SpecimenArgs) -> Result<()> {
    let text: String = GlyphTable::standard().characters().collect();
    let svg = blocky_text_to_svg(&text, &args.style.to_options());
    write_text(args.output.as_deref(), &svg)
}

fn check_config(args: CheckConfigArgs, locations: &Locations) -> Result<()> {
    let config = match &args.path {
        Some(path) => PluginConfig::from_path(path)
            .with_context(|| format!("invalid configuration in {:?}", path))?
            .unwrap_or_default(),
        None => PluginConfig::load(args.project.as_deref(), locations)
            .context("invalid plugin configuration")?,
    };

    println!("faction:    {}", config.faction.as_str());
    println!("sounds dir: {}", config.resolve_sounds_dir(locations).display());
    Ok(())
}

fn install(args: InstallArgs, locations: &Locations) -> Result<()> {
    let config = PluginConfig::load(args.project.as_deref(), locations)
        .context("invalid plugin configuration")?;
    let dir = args.dir.clone().unwrap_or_else(|| config.resolve_sounds_dir(locations));

    let mut names = args.names.clone();
    if let Some(manifest) = &args.manifest {
        names.extend(read_manifest(manifest)?);
    }

    let base_url = args.base_url.clone().or_else(|| locations.sounds_base_url.clone());
    match (&args.from, base_url) {
        (Some(from), _) => {
            let source = LocalSource::new(from);
            if names.is_empty() {
                names = source.list();
            }
            install_with(source, &names, &dir)
        },
        (None, Some(base_url)) => install_with(HttpSource::new(base_url), &names, &dir),
        (None, None) => anyhow::bail!("nothing to install from: pass --from or set SOUNDS_BASE_URL"),
    }
}

fn install_with<S: SoundSource>(source: S, names: &[String], dir: &Path) -> Result<()> {
    if names.is_empty() {
        anyhow::bail!("no sound names given");
    }

    let progress = ProgressBar::new(names.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sounds",
        )?
        .progress_chars("=> "),
    );

    let installer = SoundInstaller::new(source);
    let report = installer.install_all_with(names, dir, |_, _| progress.inc(1));
    progress.finish_with_message(format!("Sounds installed to {:?}", dir));

    for name in &report.failed {
        warn!("failed to install {name}");
    }
    if !report.is_success() {
        anyhow::bail!("{} of {} sounds failed to install", report.failed.len(), names.len());
    }
    info!("{} sounds ready in {:?}", report.installed.len(), dir);
    Ok(())
}

fn idle(args: IdleArgs, locations: &Locations) -> Result<()> {
    let config = PluginConfig::load(args.project.as_deref(), locations)
        .context("invalid plugin configuration")?;
    let sounds_dir = config.resolve_sounds_dir(locations);
    let catalog = SoundCatalog::scan(&sounds_dir);

    let notifier = IdleNotifier::new(catalog, config.faction, Platform::current(), SystemRunner);
    let outcome = notifier.on_session_idle(&mut rand::thread_rng(), args.summary.as_deref());

    match &outcome.sound {
        Some(sound) => info!("picked {:?} (played: {})", sound, outcome.played),
        None => info!("no sounds found in {:?}", sounds_dir),
    }
    info!("notification shown: {}", outcome.notified);
    Ok(())
}

fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read manifest {:?}", path))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

fn write_text(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("failed to create {:?}", path))?;
            file.write_all(text.as_bytes())?;
            info!("wrote {:?}", path);
        },
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

impl StyleSettings {
    fn to_options(&self) -> BlockyTextOptions {
        let block_size = self.block_size.max(1);
        BlockyTextOptions {
            theme: self.theme,
            block_size,
            char_spacing: self.spacing.unwrap_or(block_size),
            optimize: self.optimize,
        }
    }
}
