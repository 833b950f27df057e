//! Error types and result definitions for monitoring operations.
//!
//! Provides a kind-classified error type with captured source location for the
//! core engine and its adapters. Most fallible functions in this crate return
//! [`PilotResult`].

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for monitoring operations using [`PilotError`] as the
/// error type.
pub type PilotResult<T> = Result<T, PilotError>;

/// Specific categories of errors that can occur during monitoring operations.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The order source could not be read.
    SourceFetchFailed,
    /// A record from the source did not match the expected shape.
    InvalidRecord,
    /// The stored baseline snapshot could not be loaded.
    StoreLoadFailed,
    /// The baseline snapshot could not be persisted.
    StoreSaveFailed,
    /// A notification could not be delivered.
    NotificationFailed,
    /// A configuration value was structurally valid but unusable.
    ConfigError,
    /// A background worker terminated abnormally.
    WorkerFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::SourceFetchFailed => "source fetch failed",
            ErrorKind::InvalidRecord => "invalid record",
            ErrorKind::StoreLoadFailed => "store load failed",
            ErrorKind::StoreSaveFailed => "store save failed",
            ErrorKind::NotificationFailed => "notification failed",
            ErrorKind::ConfigError => "config error",
            ErrorKind::WorkerFailed => "worker failed",
        };
        f.write_str(name)
    }
}

/// Main error type for monitoring operations.
///
/// Carries an [`ErrorKind`] for classification, a static description, optional
/// dynamic detail, an optional source error, and the location the error was
/// created at.
#[derive(Debug, Clone)]
pub struct PilotError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<String>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

impl PilotError {
    /// Creates a new error with the given kind and static description.
    #[track_caller]
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            description: description.into(),
            detail: None,
            source: None,
            location: Location::caller(),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the dynamic detail attached to this error, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Attaches dynamic detail to this error.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attaches a source error to this error.
    pub fn with_source(mut self, source: impl error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Returns the location where this error was created.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for PilotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.kind)?;

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl error::Error for PilotError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn error::Error + 'static))
    }
}

impl From<(ErrorKind, &'static str)> for PilotError {
    #[track_caller]
    fn from((kind, description): (ErrorKind, &'static str)) -> Self {
        PilotError::new(kind, description)
    }
}

impl From<(ErrorKind, &'static str, String)> for PilotError {
    #[track_caller]
    fn from((kind, description, detail): (ErrorKind, &'static str, String)) -> Self {
        PilotError::new(kind, description).with_detail(detail)
    }
}
