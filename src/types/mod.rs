//! Data types shared by the grid models and the pane bodies.

mod column;
mod row;
mod scroll;
mod selection;
mod side;

pub use column::*;
pub use row::*;
pub use scroll::*;
pub use selection::*;
pub use side::*;
