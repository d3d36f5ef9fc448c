use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use fractal_explorer::presenters::pixels::presenter::PixelsPresenter;
use fractal_explorer::{ExplorerConfig, PixelsPresenterFactory, RunGuiCommand};

/// Interactive Mandelbrot and Julia explorer.
#[derive(Debug, Parser)]
#[command(name = "gui", version, about)]
struct Cli {
    /// TOML file with startup settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    if let Err(err) = fractal_explorer::init_tracing() {
        eprintln!("{err}");
    }

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };

    let command = RunGuiCommand::<_, PixelsPresenter>::new(PixelsPresenterFactory::new(), config);
    command.execute()?;

    Ok(())
}
