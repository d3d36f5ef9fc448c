//! Windowed host: winit input, `pixels` output, the interaction router in
//! between and the render worker behind it.

pub mod app;
pub mod commands;
pub mod events;
pub mod mapping;
