//! Error types for print layout.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the paginator.
#[derive(Error, Debug)]
pub enum Error {
    /// Margins leave no room for text on the page.
    #[error(
        "Invalid layout: page width {page_width} minus margins {margin_left}+{margin_right} leaves no content width"
    )]
    InvalidLayout {
        page_width: usize,
        margin_left: usize,
        margin_right: usize,
    },

    /// Failed to read a configuration file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// A serialized layout configuration could not be parsed.
    #[error("Invalid layout configuration: {0}")]
    Config(String),
}
