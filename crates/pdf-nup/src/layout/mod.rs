//! Layout calculation modules for imposition
//!
//! This module handles the pure geometry of step-and-repeat imposition:
//! - Orientation selection and grid counts
//! - Substrate normalization
//! - Cell offsets on the output canvas

mod grid;
mod planner;
mod types;

pub use grid::*;
pub use planner::*;
pub use types::*;
