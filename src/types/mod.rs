//! Data types shared across parsing, layout and rendering.

mod drawing;
mod sheet;
mod style;

pub use drawing::*;
pub use sheet::*;
pub use style::*;
