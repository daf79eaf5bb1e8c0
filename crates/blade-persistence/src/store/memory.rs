//! In-memory slot.

use super::StateStore;
use crate::error::Result;

/// Keeps the document in memory. Used by tests and embedders that persist
/// the document themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            writes: 0,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<()> {
        self.document = Some(document.to_string());
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
