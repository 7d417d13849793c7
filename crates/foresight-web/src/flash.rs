//! One-shot status messages shown on the next page load.

use tokio::sync::Mutex;

/// Whether the last action worked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// The action succeeded
    Success,
    /// The action failed
    Error,
}

/// A message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Success or error
    pub kind: FlashKind,
    /// Human-readable text
    pub message: String,
}

impl Flash {
    /// A success message
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// An error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Holds at most one pending message; a newer one replaces it
#[derive(Debug, Default)]
pub struct FlashSlot {
    pending: Mutex<Option<Flash>>,
}

impl FlashSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a message for the next page load
    pub async fn set(&self, flash: Flash) {
        *self.pending.lock().await = Some(flash);
    }

    /// Remove and return the pending message
    pub async fn take(&self) -> Option<Flash> {
        self.pending.lock().await.take()
    }
}
