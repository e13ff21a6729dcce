use serde::{Deserialize, Serialize};

/// Column declaration held by the geometry model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Column name, also the key into each row's values.
    pub name: String,
    /// Layout width in pixels, before any engine compensation.
    pub width: u32,
    /// Hidden columns are excluded from both panes.
    #[serde(default)]
    pub hidden: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            hidden: false,
        }
    }
}

/// One entry of a pane's ordered column-width list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidth {
    pub name: String,
    pub width: u32,
}

impl ColumnWidth {
    /// Width of the rendered `<col>` marker once the engine compensation is removed.
    ///
    /// The compensation is always subtracted, never added; it saturates at zero.
    pub fn marker_width(&self, extra_width: u32) -> u32 {
        self.width.saturating_sub(extra_width)
    }
}
