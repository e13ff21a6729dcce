use serde::{Deserialize, Serialize};

/// A combined scroll write produced by a pane reading its native offsets.
///
/// Absent fields leave the render model untouched. The LEFT pane never
/// produces a `scroll_left`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollUpdate {
    #[serde(default)]
    pub scroll_top: Option<f64>,
    #[serde(default)]
    pub scroll_left: Option<f64>,
}

impl ScrollUpdate {
    pub fn top(scroll_top: f64) -> Self {
        Self {
            scroll_top: Some(scroll_top),
            scroll_left: None,
        }
    }

    pub fn both(scroll_top: f64, scroll_left: f64) -> Self {
        Self {
            scroll_top: Some(scroll_top),
            scroll_left: Some(scroll_left),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scroll_top.is_none() && self.scroll_left.is_none()
    }
}
