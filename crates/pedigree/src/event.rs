//! Structured facts emitted while classifying.

use std::fmt;
use std::path::PathBuf;

use crate::HandlerKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The forced archive attempt failed format validation.
    Fallback {
        path:      PathBuf,
        attempted: HandlerKind,
        resolved:  HandlerKind,
        reason:    String,
    },
    /// Transient storage could not be removed; the artifact is gone anyway.
    CleanupFailed { path: PathBuf, error: String },
    /// An I/O or resource failure is about to be returned to the caller.
    IoFailure {
        path:  PathBuf,
        kind:  HandlerKind,
        error: String,
    },
}

pub trait EventSink: Send + Sync + fmt::Debug {
    fn emit(&self, event: &Event);
}

/// Forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &Event) {
        match event {
            Event::Fallback {
                path,
                attempted,
                resolved,
                reason,
            } => tracing::debug!(
                path = %path.display(),
                %attempted,
                %resolved,
                %reason,
                "not a container; classifying by extension"
            ),
            Event::CleanupFailed { path, error } => tracing::warn!(
                path = %path.display(),
                %error,
                "failed to remove transient storage"
            ),
            Event::IoFailure { path, kind, error } => tracing::warn!(
                path = %path.display(),
                %kind,
                %error,
                "artifact classification failed"
            ),
        }
    }
}
