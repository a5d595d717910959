//! Config file rendering (deterministic INI generation).

pub mod file_builder;
pub mod ini;

pub use file_builder::FileBuilder;
pub use ini::{IniDocument, Section};
