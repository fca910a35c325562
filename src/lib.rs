//! `dbapi-errors` is the structured error model of a database client.
//!
//! Every failure is a [`DbError`]: an [`ErrorKind`] plus an immutable
//! [`ErrorRecord`] (message, numeric code, state token, request id) whose
//! message is rendered once, when the error is built.
//!
//! Connections and cursors implement [`ErrorReporter`] (or embed an
//! [`ErrorSink`]) to log errors and intercept them through an
//! [`ErrorHandler`]. Entry points:
//! - [`dispatch`]
//! - [`default_error_handler`]
//! - [`ErrorFields::from_json`]

mod dispatch;
mod error;
mod handler;
mod kind;
mod log;
mod record;
mod verbosity;
mod wire;

pub use dispatch::dispatch;
pub use error::DbError;
pub use handler::{default_error_handler, ErrorEvent, ErrorHandler, ErrorReporter, ErrorSink};
pub use kind::{ErrorCategory, ErrorKind};
pub use log::{ErrorLog, LogEntry};
pub use record::{
    ErrorFields, ErrorRecord, MISSING_REQUEST_ID, NO_CODE, NO_STATE, UNKNOWN_ERROR_MESSAGE,
};
pub use verbosity::{Verbosity, VERBOSITY_ENV_VAR};

pub type Result<T> = std::result::Result<T, DbError>;
