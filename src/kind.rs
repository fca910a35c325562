use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad family an [`ErrorKind`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Non-error signal.
    Warning,
    /// Client-side interface failures.
    Interface,
    /// `DatabaseError` and everything below it.
    Database,
    /// Fixed-message HTTP status failures.
    Transport,
}

/// Category of a failure.
///
/// Kinds form a shallow hierarchy: every kind except [`ErrorKind::Warning`]
/// is an error, and the six database sub-kinds are also a
/// [`ErrorKind::DatabaseError`]. Use [`ErrorKind::is_a`] for catch-all checks
/// instead of matching on individual variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Important warning; not an error.
    Warning,
    /// Failure in the client interface rather than the database.
    InterfaceError,
    /// Failure reported by the database.
    DatabaseError,
    /// Internal database failure.
    InternalError,
    /// Failure in the database's operation, e.g. a lost connection.
    OperationalError,
    /// Programming mistake such as bad SQL or a missing table.
    ProgrammingError,
    /// Relational integrity violation.
    IntegrityError,
    /// Problem with the processed data.
    DataError,
    /// Unsupported database feature was used.
    NotSupportedError,
    /// HTTP 500.
    InternalServerError,
    /// HTTP 503.
    ServiceUnavailableError,
    /// HTTP 504.
    GatewayTimeoutError,
    /// HTTP 403.
    ForbiddenError,
    /// HTTP 408.
    RequestTimeoutError,
    /// HTTP 400.
    BadRequest,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 15] = [
        Self::Warning,
        Self::InterfaceError,
        Self::DatabaseError,
        Self::InternalError,
        Self::OperationalError,
        Self::ProgrammingError,
        Self::IntegrityError,
        Self::DataError,
        Self::NotSupportedError,
        Self::InternalServerError,
        Self::ServiceUnavailableError,
        Self::GatewayTimeoutError,
        Self::ForbiddenError,
        Self::RequestTimeoutError,
        Self::BadRequest,
    ];

    /// Stable name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::InterfaceError => "InterfaceError",
            Self::DatabaseError => "DatabaseError",
            Self::InternalError => "InternalError",
            Self::OperationalError => "OperationalError",
            Self::ProgrammingError => "ProgrammingError",
            Self::IntegrityError => "IntegrityError",
            Self::DataError => "DataError",
            Self::NotSupportedError => "NotSupportedError",
            Self::InternalServerError => "InternalServerError",
            Self::ServiceUnavailableError => "ServiceUnavailableError",
            Self::GatewayTimeoutError => "GatewayTimeoutError",
            Self::ForbiddenError => "ForbiddenError",
            Self::RequestTimeoutError => "RequestTimeoutError",
            Self::BadRequest => "BadRequest",
        }
    }

    /// Parent kind in the hierarchy.
    ///
    /// `None` means the kind hangs directly off the base error (or, for
    /// [`ErrorKind::Warning`], outside of it).
    pub fn parent(&self) -> Option<ErrorKind> {
        match self {
            Self::InternalError
            | Self::OperationalError
            | Self::ProgrammingError
            | Self::IntegrityError
            | Self::DataError
            | Self::NotSupportedError => Some(Self::DatabaseError),
            _ => None,
        }
    }

    /// Returns `true` for every kind that descends from the base error.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Warning)
    }

    /// Returns `true` when `self` is `ancestor` or descends from it.
    pub fn is_a(&self, ancestor: ErrorKind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Shorthand for `is_a(ErrorKind::DatabaseError)`.
    pub fn is_database_error(&self) -> bool {
        self.is_a(Self::DatabaseError)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Warning => ErrorCategory::Warning,
            Self::InterfaceError => ErrorCategory::Interface,
            Self::DatabaseError
            | Self::InternalError
            | Self::OperationalError
            | Self::ProgrammingError
            | Self::IntegrityError
            | Self::DataError
            | Self::NotSupportedError => ErrorCategory::Database,
            Self::InternalServerError
            | Self::ServiceUnavailableError
            | Self::GatewayTimeoutError
            | Self::ForbiddenError
            | Self::RequestTimeoutError
            | Self::BadRequest => ErrorCategory::Transport,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    /// HTTP status a transport kind stands for.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::BadRequest => Some(400),
            Self::ForbiddenError => Some(403),
            Self::RequestTimeoutError => Some(408),
            Self::InternalServerError => Some(500),
            Self::ServiceUnavailableError => Some(503),
            Self::GatewayTimeoutError => Some(504),
            _ => None,
        }
    }

    /// Classifies a failed HTTP status reported by the transport layer.
    ///
    /// Statuses without a dedicated transport kind return `None`.
    pub fn from_http_status(status: u16) -> Option<ErrorKind> {
        match status {
            400 => Some(Self::BadRequest),
            403 => Some(Self::ForbiddenError),
            408 => Some(Self::RequestTimeoutError),
            500 => Some(Self::InternalServerError),
            503 => Some(Self::ServiceUnavailableError),
            504 => Some(Self::GatewayTimeoutError),
            _ => None,
        }
    }

    /// The non-configurable message carried by transport kinds.
    pub fn fixed_message(&self) -> Option<&'static str> {
        match self {
            Self::BadRequest => Some("HTTP 400: BadRequest"),
            Self::ForbiddenError => Some("HTTP 403: Forbidden"),
            Self::RequestTimeoutError => Some("HTTP 408: RequestTimeout"),
            Self::InternalServerError => Some("HTTP 500: InternalServerError"),
            Self::ServiceUnavailableError => Some("HTTP 503: ServiceUnavailable"),
            Self::GatewayTimeoutError => Some("HTTP 504: GatewayTimeout"),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
