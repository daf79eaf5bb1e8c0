//! Document I/O on top of a storage slot.
//!
//! This module handles:
//! - Loading state with the migration pass applied
//! - Saving the full state tree after every mutation

mod load;
mod save;

pub use load::{load_state, parse_state};
pub use save::{save_state, serialize_state};
