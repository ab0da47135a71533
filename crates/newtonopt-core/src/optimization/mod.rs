//! Line search, direction strategies and the iteration loop.

pub mod direction;
pub mod line_search;
pub mod newton;
pub mod optimizer;

// Re-export optimization components
pub use direction::*;
pub use line_search::*;
pub use newton::*;
pub use optimizer::*;
