// Database models
pub mod settings;

pub use settings::*;
