// Captured media: items, the ordered per-exam library and on-disk storage

pub mod commands;
pub mod file_io;
pub mod library;
pub mod types;

pub use library::MediaLibrary;
pub use types::{MediaItem, MediaKind};
