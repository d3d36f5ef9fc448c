use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use fractal_explorer::core::data::complex::Complex;
use fractal_explorer::core::fractals::mode::FractalMode;
use fractal_explorer::core::view::iterations::MAX_MAX_ITER;
use fractal_explorer::core::view::transform::ViewTransform;
use fractal_explorer::{ExplorerConfig, PpmFilePresenter, SessionState, StillRenderController};
use tracing::{info, warn};

/// Renders one escape-time frame to a PPM file.
#[derive(Debug, Parser)]
#[command(name = "fractal_explorer", version, about)]
struct Cli {
    /// TOML file with startup settings.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Render the Julia set for the constant instead of the Mandelbrot set.
    #[arg(long)]
    julia: bool,

    #[arg(long, allow_negative_numbers = true)]
    c_re: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    c_im: Option<f64>,

    /// Plane units per pixel; defaults to the home view.
    #[arg(long)]
    scale: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    center_re: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    center_im: Option<f64>,

    /// Bias added to the derived iteration limit.
    #[arg(
        long,
        allow_negative_numbers = true,
        default_value_t = 0,
        value_parser = clap::value_parser!(i32).range(-(MAX_MAX_ITER as i64)..=MAX_MAX_ITER as i64)
    )]
    iter_offset: i32,

    /// Colour by raw escape count instead of histogram equalization.
    #[arg(long)]
    no_histogram: bool,

    #[arg(long, default_value = "output/fractal.ppm")]
    output: PathBuf,
}

impl Cli {
    fn config(&self) -> Result<ExplorerConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::load(path)?,
            None => ExplorerConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(real) = self.c_re {
            config.julia_constant.real = real;
        }
        if let Some(imag) = self.c_im {
            config.julia_constant.imag = imag;
        }
        if self.no_histogram {
            config.equalizer.enabled = false;
        }
        config.validate()?;

        Ok(config)
    }

    fn session(&self, config: &ExplorerConfig) -> Result<SessionState, Box<dyn Error>> {
        let mut state = SessionState::from_config(config);
        if self.julia {
            state.params.mode = FractalMode::Julia;
        }
        state.params.iter_offset = self.iter_offset;

        if self.scale.is_some() || self.center_re.is_some() || self.center_im.is_some() {
            let home = state.view;
            let center = home.pixel_to_plane(state.raster.center());
            let target = Complex {
                real: self.center_re.unwrap_or(center.real),
                imag: self.center_im.unwrap_or(center.imag),
            };
            let scale = self.scale.unwrap_or(home.scale());

            state.view = ViewTransform::centered_on(state.raster, target, scale)
                .ok_or_else(|| format!("cannot centre a view on {target:?} at scale {scale}"))?;
        }
        state.refresh_max_iter();

        Ok(state)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if let Err(err) = fractal_explorer::init_tracing() {
        eprintln!("{err}");
    }

    let cli = Cli::parse();
    let config = cli.config()?;
    let mut state = cli.session(&config)?;

    let mut controller = StillRenderController::new(PpmFilePresenter::new());
    let diagnostics = controller.render(&mut state)?;
    controller.write(&cli.output)?;

    info!(output = %cli.output.display(), %diagnostics, "image written");
    if state.equalizer.enabled && state.raster.pixel_count() < 1000 {
        warn!("very small rasters render mostly black with histogram equalization");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fractal_explorer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_match_the_home_view() {
        let cli = parse(&[]);
        let config = cli.config().unwrap();
        let state = cli.session(&config).unwrap();

        assert_eq!(state.raster.width, 800);
        assert_eq!(state.raster.height, 500);
        assert_eq!(state.view, ViewTransform::home(state.raster));
        assert_eq!(state.params.max_iter, 140);
        assert_eq!(cli.output, PathBuf::from("output/fractal.ppm"));
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "--width",
            "64",
            "--height",
            "32",
            "--julia",
            "--c-re",
            "-0.8",
            "--c-im",
            "0.156",
            "--no-histogram",
            "--iter-offset",
            "-20",
        ]);
        let config = cli.config().unwrap();
        let state = cli.session(&config).unwrap();

        assert_eq!(state.params.mode, FractalMode::Julia);
        assert_eq!(state.params.c, Complex { real: -0.8, imag: 0.156 });
        assert!(!state.equalizer.enabled);
        assert_eq!(state.params.iter_offset, -20);
        assert_eq!(state.raster.pixel_count(), 64 * 32);
    }

    #[test]
    fn explicit_centre_lands_in_the_middle_of_the_raster() {
        let cli = parse(&["--center-re", "-0.75", "--center-im", "0.1", "--scale", "1e-4"]);
        let config = cli.config().unwrap();
        let state = cli.session(&config).unwrap();

        let middle = state.view.pixel_to_plane(state.raster.center());
        assert!((middle.real + 0.75).abs() < 1e-9);
        assert!((middle.imag - 0.1).abs() < 1e-9);
        assert_eq!(state.view.scale(), 1e-4);
        assert!(state.params.max_iter > 140);
    }

    #[test]
    fn out_of_range_iteration_bias_is_rejected() {
        let result = Cli::try_parse_from(["fractal_explorer", "--iter-offset", "100000000"]);

        assert!(result.is_err());
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let cli = parse(&["--scale", "0"]);
        let config = cli.config().unwrap();

        assert!(cli.session(&config).is_err());
    }

    #[test]
    fn renders_a_small_image_to_disk() {
        let dir = std::env::temp_dir().join(format!("fractal_explorer_main_{}", std::process::id()));
        let output = dir.join("still.ppm");
        let cli = parse(&[
            "--width",
            "40",
            "--height",
            "25",
            "--no-histogram",
            "--output",
            output.to_str().unwrap(),
        ]);
        let config = cli.config().unwrap();
        let mut state = cli.session(&config).unwrap();

        let mut controller = StillRenderController::new(PpmFilePresenter::new());
        controller.render(&mut state).unwrap();
        controller.write(&cli.output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"P6\n40 25\n255\n"));
        assert_eq!(bytes.len(), "P6\n40 25\n255\n".len() + 40 * 25 * 3);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
