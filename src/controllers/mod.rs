pub mod cli;
pub mod interactive;
pub mod pipeline;
pub mod ports;
pub mod session;
