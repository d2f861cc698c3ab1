//! Docframe - generic document/view lifecycle management
//!
//! A container that owns exactly one in-memory document and one view bound
//! to it, and coordinates new/open/save against a backing file while
//! tracking modification and existence state. Rendering and file formats
//! stay behind the [`View`] and [`Document`] capability traits; a small
//! line-oriented shell exercises the whole surface.

pub mod app;
pub mod core;

// Re-exports for convenient external access
pub use crate::core::config::AppConfig;
pub use crate::core::container::{display_name, DocumentContainer, DocumentLifecycle, UNTITLED};
pub use crate::core::document::{Document, TextDocument};
pub use crate::core::error::{IoError, Result};
pub use crate::core::view::{ConsoleView, DocHandle, NullView, View};
