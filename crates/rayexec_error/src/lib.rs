use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

pub type Result<T, E = RayexecError> = std::result::Result<T, E>;

/// Coarse classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Catch-all for errors that don't need to be distinguished.
    Generic,
    /// Some assumption about the input that should've been upheld by the
    /// caller wasn't.
    ///
    /// These indicate a bug in how a plan was constructed, and should never be
    /// retried.
    InvariantViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "Generic"),
            Self::InvariantViolation => write!(f, "Invariant violation"),
        }
    }
}

#[derive(Debug)]
pub struct RayexecError {
    inner: Box<RayexecErrorInner>,
}

#[derive(Debug)]
struct RayexecErrorInner {
    msg: String,
    kind: ErrorKind,
    backtrace: Backtrace,
}

impl RayexecError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Generic, msg)
    }

    fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        RayexecError {
            inner: Box::new(RayexecErrorInner {
                msg: msg.into(),
                kind,
                backtrace: Backtrace::capture(),
            }),
        }
    }

    /// Create an error indicating a broken invariant in the input.
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::InvariantViolation, msg)
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn is_invariant_violation(&self) -> bool {
        self.inner.kind == ErrorKind::InvariantViolation
    }

    /// Get the backtrace if one was captured.
    ///
    /// Backtraces are only captured when RUST_BACKTRACE (or
    /// RUST_LIB_BACKTRACE) is set.
    pub fn get_backtrace(&self) -> Option<&Backtrace> {
        match self.inner.backtrace.status() {
            BacktraceStatus::Captured => Some(&self.inner.backtrace),
            _ => None,
        }
    }
}

impl fmt::Display for RayexecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            ErrorKind::Generic => write!(f, "{}", self.inner.msg)?,
            kind => write!(f, "{kind}: {}", self.inner.msg)?,
        }
        if let Some(backtrace) = self.get_backtrace() {
            write!(f, "\n\nBacktrace:\n{backtrace}")?;
        }
        Ok(())
    }
}

impl Error for RayexecError {}
