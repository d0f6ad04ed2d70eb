//! Board representation and the non-attack rules for queen placements

pub mod threat;
pub mod types;

// Re-export commonly used items
#[allow(unused_imports)]
pub use threat::{is_safe, is_valid_prefix, threatens};
pub use types::{Board, Column, format_board};
