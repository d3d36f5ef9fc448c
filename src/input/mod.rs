//! Input adapters that translate host events into session changes.

#[cfg(feature = "gui")]
pub mod gui;
