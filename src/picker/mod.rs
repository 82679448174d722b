//! Highlight navigation over list-based selection components.

mod traits;

pub use traits::Picker;
