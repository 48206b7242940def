//! Error module for the Ad Locator.
//!
//! The location store itself never fails: malformed input degrades to
//! "contributes nothing". The errors here come from the edges of the system:
//! reading declaration files, loading configuration, and serving the stdio
//! protocol.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use thiserror::Error;

pub mod config;
pub mod protocol;
pub mod store;

/// Result type alias used throughout the Ad Locator.
pub type AdLocatorResult<T> = Result<T, AdLocatorError>;

/// Core error enum for the Ad Locator.
#[derive(Error, Debug)]
pub enum AdLocatorError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors loading declaration data into the store.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    /// Errors in the stdio command protocol.
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    /// IO errors that may occur during file or stream operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: AdLocatorError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: AdLocatorError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    fn report(&self, context: ErrorContext);
}

/// Error reporter that logs through `tracing`.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

/// Holder for the process-wide error reporter.
#[derive(Debug, Default)]
pub struct ErrorReporting {
    reporter: RwLock<Option<Arc<dyn ErrorReporter>>>,
}

impl ErrorReporting {
    /// Replace the reporter.
    pub fn set_reporter(&self, reporter: Arc<dyn ErrorReporter>) {
        *self.reporter.write() = Some(reporter);
    }

    /// Report an error with context.
    pub fn report(&self, context: ErrorContext) {
        let reporter = self.reporter.read().clone();
        match reporter {
            Some(reporter) => reporter.report(context),
            // Fallback to standard error output if no reporter is configured
            None => eprintln!("Error: {context}"),
        }
    }
}

static ERROR_REPORTING: OnceCell<ErrorReporting> = OnceCell::new();

/// Get the global error reporting instance.
pub fn get_error_reporting() -> &'static ErrorReporting {
    ERROR_REPORTING.get_or_init(ErrorReporting::default)
}

/// Set the global error reporter.
pub fn set_error_reporter(reporter: Arc<dyn ErrorReporter>) {
    get_error_reporting().set_reporter(reporter);
}
