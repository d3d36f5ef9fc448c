use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::controllers::pipeline::{FramePipeline, PipelineError, PipelineOutcome};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::session::diagnostics::Diagnostics;
use crate::controllers::session::state::SessionState;

#[derive(Debug, Error)]
pub enum StillRenderError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("raster {width}x{height} has no pixels to render")]
    EmptyRaster { width: u32, height: u32 },
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders one frame from a session and hands it to a file presenter.
pub struct StillRenderController<P: FilePresenterPort> {
    presenter: P,
    pipeline: FramePipeline,
}

impl<P: FilePresenterPort> StillRenderController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            pipeline: FramePipeline::new(),
        }
    }

    pub fn render(&mut self, state: &mut SessionState) -> Result<Diagnostics, StillRenderError> {
        let frame_time = match self.pipeline.run(state)? {
            PipelineOutcome::Skipped => {
                return Err(StillRenderError::EmptyRaster {
                    width: state.raster.width,
                    height: state.raster.height,
                });
            }
            PipelineOutcome::Reused => self.pipeline.last_duration(),
            PipelineOutcome::Rendered { duration } => Some(duration),
        };

        let diagnostics = state.diagnostics(frame_time);
        info!(%diagnostics, mode = state.params.mode.display_name(), "still frame ready");

        Ok(diagnostics)
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), StillRenderError> {
        let buffer = self
            .pipeline
            .colour_buffer()
            .ok_or(StillRenderError::NothingRendered)?;
        self.presenter.present(buffer, filepath.as_ref())?;
        info!(path = %filepath.as_ref().display(), "image written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::equalize::EqualizerSettings;
    use crate::core::data::colour_buffer::ColourBuffer;
    use crate::core::data::raster::RasterSize;
    use crate::core::fractals::params::FractalParameters;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingPresenter {
        calls: RefCell<Vec<(PathBuf, usize)>>,
    }

    impl FilePresenterPort for &RecordingPresenter {
        fn present(
            &self,
            buffer: &ColourBuffer,
            filepath: impl AsRef<Path>,
        ) -> std::io::Result<()> {
            self.calls
                .borrow_mut()
                .push((filepath.as_ref().to_path_buf(), buffer.buffer_size()));
            Ok(())
        }
    }

    fn state(width: u32, height: u32) -> SessionState {
        SessionState::new(
            RasterSize::new(width, height),
            FractalParameters::default(),
            EqualizerSettings::default(),
        )
    }

    #[test]
    fn test_render_then_write_presents_frame() {
        let presenter = RecordingPresenter::default();
        let mut controller = StillRenderController::new(&presenter);
        let mut state = state(32, 20);

        let diagnostics = controller.render(&mut state).unwrap();
        controller.write("out.ppm").unwrap();

        assert_eq!(diagnostics.max_iter, state.params.max_iter);
        assert!(diagnostics.frame_time.is_some());
        assert_eq!(
            *presenter.calls.borrow(),
            vec![(PathBuf::from("out.ppm"), 32 * 20 * 3)]
        );
    }

    #[test]
    fn test_write_before_render_fails() {
        let presenter = RecordingPresenter::default();
        let controller = StillRenderController::new(&presenter);

        let result = controller.write("out.ppm");

        assert!(matches!(result, Err(StillRenderError::NothingRendered)));
        assert!(presenter.calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_raster_is_reported() {
        let presenter = RecordingPresenter::default();
        let mut controller = StillRenderController::new(&presenter);
        let mut state = state(0, 0);

        let result = controller.render(&mut state);

        assert!(matches!(
            result,
            Err(StillRenderError::EmptyRaster {
                width: 0,
                height: 0
            })
        ));
    }
}
