//! Inkboard command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use inkboard_app::{AppConfig, Script, Session, ShortcutRegistry};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkboard")]
#[command(version)]
#[command(about = "Replay a drawing session script and export canvas.png")]
struct Cli {
    /// JSON script of input steps
    #[arg(required_unless_present = "list_shortcuts")]
    script: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory (overrides the config)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print keyboard shortcuts and exit
    #[arg(long)]
    list_shortcuts: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(out) = cli.out {
        config.output_dir = out;
    }

    let fonts = config.load_fonts().context("failed to load fonts")?;
    if fonts.is_empty() {
        log::warn!("no fonts configured; text glyphs will not be drawn");
    }

    let Some(script_path) = cli.script else {
        return Ok(());
    };
    let script = Script::load(&script_path)
        .with_context(|| format!("failed to load script {}", script_path.display()))?;
    log::info!("replaying {} steps from {}", script.len(), script_path.display());

    let mut session = Session::new(config, fonts)?;
    session.run(&script)?;
    session.finish()?;
    if log::log_enabled!(log::Level::Debug) {
        let scene = session.editor().scene().to_json().context("failed to dump scene")?;
        log::debug!("final scene:\n{scene}");
    }
    let path = session.export()?;
    println!("{}", path.display());
    Ok(())
}
