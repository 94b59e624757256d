pub mod cli;
pub mod commands;
pub mod error;
pub mod icon;
pub mod img;
pub mod png;

pub use commands::{Config, generate_icons};
pub use error::{EncodeError, Error};
