//! Storage slots.
//!
//! A slot holds at most one serialized state document. Reads return `None`
//! when nothing has been written yet.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// A single key-value slot holding the serialized state document.
pub trait StateStore {
    /// Read the stored document, or `None` if the slot is empty.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    fn write(&mut self, document: &str) -> Result<()>;

    /// Short description of the slot for log messages.
    fn describe(&self) -> String;
}
