use serde::{Deserialize, Serialize};

/// Which half of the split grid a pane renders.
///
/// The LEFT pane holds the frozen columns and never scrolls horizontally.
/// The RIGHT pane holds the remaining columns and is the canonical scroll
/// surface for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    /// Both sides in subscription order.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Whether this pane owns the canonical horizontal scroll offset.
    pub fn owns_horizontal_scroll(self) -> bool {
        matches!(self, Side::Right)
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Short name used in CSS class names and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "lside",
            Side::Right => "rside",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
