use std::fmt;
use std::sync::Arc;

use crate::{DbError, ErrorFields, ErrorKind, ErrorLog, Result, Verbosity};

/// Capability shared by connection-like and cursor-like collaborators: an
/// error log and a handler slot.
///
/// Implementors that are shared across threads must synchronize access to
/// the log themselves.
pub trait ErrorReporter {
    fn messages(&self) -> &ErrorLog;

    fn messages_mut(&mut self) -> &mut ErrorLog;

    fn error_handler(&self) -> &ErrorHandler;
}

/// Arguments handed to an error handler.
#[derive(Clone, Copy)]
pub struct ErrorEvent<'a> {
    pub connection: Option<&'a dyn ErrorReporter>,
    pub cursor: Option<&'a dyn ErrorReporter>,
    pub kind: ErrorKind,
    pub fields: &'a ErrorFields,
    /// Verbosity in effect when the error was dispatched.
    pub verbosity: Verbosity,
}

impl fmt::Debug for ErrorEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorEvent")
            .field("connection", &self.connection.map(|_| "<reporter>"))
            .field("cursor", &self.cursor.map(|_| "<reporter>"))
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}

type HandlerFn = dyn Fn(&ErrorEvent<'_>) -> Result<()> + Send + Sync;

/// Handler slot of a collaborator.
///
/// [`ErrorHandler::Raise`] builds the error and returns it. A custom handler
/// may suppress the error by returning `Ok(())`.
#[derive(Clone, Default)]
pub enum ErrorHandler {
    #[default]
    Raise,
    Custom(Arc<HandlerFn>),
}

impl ErrorHandler {
    pub fn custom<F>(handler: F) -> Self
    where
        F: Fn(&ErrorEvent<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(handler))
    }

    pub fn is_raise(&self) -> bool {
        matches!(self, Self::Raise)
    }

    pub fn call(&self, event: &ErrorEvent<'_>) -> Result<()> {
        match self {
            Self::Raise => default_error_handler(event),
            Self::Custom(handler) => handler(event),
        }
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raise => f.write_str("Raise"),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Builds `event.kind` from `event.fields` and returns it as an error.
pub fn default_error_handler(event: &ErrorEvent<'_>) -> Result<()> {
    Err(DbError::new(
        event.kind,
        event.fields.clone(),
        event.verbosity,
    ))
}

/// Error log plus handler slot, for embedding in connection and cursor types.
#[derive(Clone, Debug, Default)]
pub struct ErrorSink {
    messages: ErrorLog,
    handler: ErrorHandler,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.handler = handler;
        self
    }

    /// Replaces the handler, returning the previous one.
    pub fn set_error_handler(&mut self, handler: ErrorHandler) -> ErrorHandler {
        std::mem::replace(&mut self.handler, handler)
    }
}

impl ErrorReporter for ErrorSink {
    fn messages(&self) -> &ErrorLog {
        &self.messages
    }

    fn messages_mut(&mut self) -> &mut ErrorLog {
        &mut self.messages
    }

    fn error_handler(&self) -> &ErrorHandler {
        &self.handler
    }
}
