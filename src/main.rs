use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tui_snake::assets::Sprites;
use tui_snake::game::GameConfig;
use tui_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tui_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Directory containing snake.png and food.png
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal belongs to the UI, so logs only go to a file when asked for
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Sprites are required; load them before the terminal is taken over so
    // a failure is reported on a normal screen
    let sprites = Sprites::load(&cli.assets).context("Failed to load game assets")?;

    let mut human_mode = HumanMode::new(GameConfig::default(), &sprites, cli.seed);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_flags() {
        let cli = Cli::try_parse_from(["tui_snake"]).unwrap();
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "tui_snake",
            "--assets",
            "/tmp/sprites",
            "--seed",
            "42",
            "--log-file",
            "snake.log",
        ])
        .unwrap();
        assert_eq!(cli.assets, PathBuf::from("/tmp/sprites"));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.log_file, Some(PathBuf::from("snake.log")));
    }

    #[test]
    fn test_grid_size_is_not_a_flag() {
        assert!(Cli::try_parse_from(["tui_snake", "--width", "40"]).is_err());
    }
}
