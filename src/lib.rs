pub mod adapters;
pub mod config;
pub mod controllers;
pub mod core;
pub mod input;
pub mod logging;
pub mod presenters;

pub use config::{ConfigError, ExplorerConfig};
pub use controllers::cli::still::{StillRenderController, StillRenderError};
pub use controllers::interactive::InteractiveController;
pub use controllers::pipeline::{FramePipeline, PipelineError, PipelineOutcome};
pub use controllers::session::{
    Command, Diagnostics, InteractionRouter, Modifiers, PointerButton, RouterOutcome,
    RouterSettings, SessionState,
};
pub use logging::init_tracing;
pub use presenters::file::ppm::PpmFilePresenter;

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::{GuiError, RunGuiCommand};
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
