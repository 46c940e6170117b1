use std::error::Error;
use std::fmt::{Display, Formatter};

/// General error reported by the capture surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureError {
    pub kind: CaptureErrorKind,
    pub message: Option<String>,
}

impl CaptureError {
    pub fn new(kind: CaptureErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: Some(message.into()) }
    }

    pub fn simple(kind: CaptureErrorKind) -> Self {
        Self { kind, message: None }
    }
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{msg}"),
            None => write!(f, "{:#?}", self.kind),
        }
    }
}

impl Error for CaptureError {}

/// Categorises capture failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureErrorKind {
    /// An intercepted operation ran while no test double was installed.
    /// Signals a test-setup bug; callers should not attempt recovery.
    MockNotRegistered,
    CapabilityUnavailable,
    OperationFailed,
}
