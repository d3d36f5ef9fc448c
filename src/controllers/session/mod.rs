pub mod commands;
pub mod diagnostics;
pub mod router;
pub mod state;

pub use commands::{Command, Modifiers, PointerButton, RouterOutcome};
pub use diagnostics::Diagnostics;
pub use router::{InteractionRouter, RouterSettings};
pub use state::SessionState;
