//! Background rendering for interactive exploration.
//!
//! The controller takes immutable [`RenderRequest`] snapshots and reports
//! results through [`InteractiveControllerPresenterPort`]; the scheduler
//! decides which session changes become requests.

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
pub mod scheduler;

pub use controller::InteractiveController;
pub use data::frame_data::FrameData;
pub use data::render_request::RenderRequest;
pub use errors::render::RenderError;
pub use events::render::RenderEvent;
pub use ports::presenter::InteractiveControllerPresenterPort;
pub use scheduler::{RenderScheduler, SchedulerAction};
