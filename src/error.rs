//! Structured error types for splitgrid.
//!
//! Every fallible DOM, markup and configuration operation returns [`Result`].

/// All errors that can occur while building or updating a grid body.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Markup handed to the DOM could not be parsed.
    #[error("Markup parsing: {0}")]
    Markup(String),

    /// A selector used for querying or delegation is not supported.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// A DOM operation failed (stale handle, missing element, host rejection).
    #[error("DOM error: {0}")]
    Dom(String),

    /// A pane operation was invoked before `render()` built its containers.
    #[error("Pane not rendered: {0}")]
    NotRendered(&'static str),

    /// Configuration or grid document could not be decoded.
    #[error("Configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<quick_xml::Error> for GridError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Markup(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for GridError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Markup(e.to_string())
    }
}

impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
