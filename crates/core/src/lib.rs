//! Reflow, pagination, and header/footer layout for printable plain text.

pub mod annotate;
pub mod config;
pub mod error;
pub mod normalize;
pub mod paginator;
pub mod reflow;
pub mod types;
pub mod wrap;

pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use normalize::label_from_path;
pub use paginator::Paginator;
pub use types::{BreakKind, OutputLine, Page, PaginatedDocument, PAGE_BREAK_GLYPH};
