use serde::Serialize;

use crate::{ErrorFields, ErrorKind, ErrorRecord, Verbosity};

/// Error value returned (raised) by this crate: a kind plus its record.
///
/// `Display` writes the rendered message only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{record}")]
pub struct DbError {
    kind: ErrorKind,
    #[serde(flatten)]
    record: ErrorRecord,
}

impl DbError {
    /// Builds an error of `kind` from `fields`.
    ///
    /// Transport kinds ignore `fields` and always carry their fixed message.
    pub fn new(kind: ErrorKind, fields: ErrorFields, verbosity: Verbosity) -> Self {
        let record = match kind.fixed_message() {
            Some(message) => ErrorRecord::plain(message),
            None => ErrorRecord::new(fields, verbosity),
        };
        Self { kind, record }
    }

    /// Builds an unformatted signal carrying only `message`.
    pub fn signal(kind: ErrorKind, message: Option<String>) -> Self {
        Self {
            kind,
            record: ErrorRecord::plain(message.unwrap_or_default()),
        }
    }

    /// Builds the transport error for a failed HTTP status, if one exists.
    pub fn from_http_status(status: u16) -> Option<Self> {
        ErrorKind::from_http_status(status).map(Self::transport)
    }

    fn transport(kind: ErrorKind) -> Self {
        Self::new(kind, ErrorFields::default(), Verbosity::default())
    }

    pub fn bad_request() -> Self {
        Self::transport(ErrorKind::BadRequest)
    }

    pub fn forbidden() -> Self {
        Self::transport(ErrorKind::ForbiddenError)
    }

    pub fn request_timeout() -> Self {
        Self::transport(ErrorKind::RequestTimeoutError)
    }

    pub fn internal_server_error() -> Self {
        Self::transport(ErrorKind::InternalServerError)
    }

    pub fn service_unavailable() -> Self {
        Self::transport(ErrorKind::ServiceUnavailableError)
    }

    pub fn gateway_timeout() -> Self {
        Self::transport(ErrorKind::GatewayTimeoutError)
    }

    pub(crate) fn interface(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InterfaceError,
            ErrorFields::from_message(message),
            Verbosity::default(),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn record(&self) -> &ErrorRecord {
        &self.record
    }

    pub fn message(&self) -> &str {
        self.record.message()
    }

    pub fn code(&self) -> i64 {
        self.record.code()
    }

    pub fn state(&self) -> &str {
        self.record.state()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.record.request_id()
    }

    /// See [`ErrorKind::is_a`].
    pub fn is_a(&self, ancestor: ErrorKind) -> bool {
        self.kind.is_a(ancestor)
    }

    pub fn is_database_error(&self) -> bool {
        self.kind.is_database_error()
    }

    pub fn is_transport(&self) -> bool {
        self.kind.is_transport()
    }

    /// UTF-8 encoding of the rendered message.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.record.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use crate::{DbError, ErrorFields, ErrorKind, Verbosity, NO_CODE, NO_STATE};

    #[test]
    fn transport_constructors_use_fixed_messages() {
        let cases = [
            (DbError::bad_request(), "HTTP 400: BadRequest"),
            (DbError::forbidden(), "HTTP 403: Forbidden"),
            (DbError::request_timeout(), "HTTP 408: RequestTimeout"),
            (DbError::internal_server_error(), "HTTP 500: InternalServerError"),
            (DbError::service_unavailable(), "HTTP 503: ServiceUnavailable"),
            (DbError::gateway_timeout(), "HTTP 504: GatewayTimeout"),
        ];
        for (error, message) in cases {
            assert!(error.is_transport());
            assert_eq!(error.message(), message);
            assert_eq!(error.code(), NO_CODE);
            assert_eq!(error.state(), NO_STATE);
        }
    }

    #[test]
    fn transport_kinds_ignore_supplied_fields() {
        let fields = ErrorFields::from_message("ignored")
            .with_code(390100)
            .with_state("08001");
        let error = DbError::new(ErrorKind::ForbiddenError, fields, Verbosity::Debug);
        assert_eq!(error.to_string(), "HTTP 403: Forbidden");
        assert_eq!(error.code(), NO_CODE);
    }

    #[test]
    fn from_http_status_classifies_known_statuses() {
        let error = DbError::from_http_status(504).expect("504 is a transport kind");
        assert_eq!(error.kind(), ErrorKind::GatewayTimeoutError);
        assert!(DbError::from_http_status(429).is_none());
    }

    #[test]
    fn display_is_the_rendered_message() {
        let fields = ErrorFields::from_message("duplicate key")
            .with_code(100072)
            .with_state("23000");
        let error = DbError::new(ErrorKind::IntegrityError, fields, Verbosity::Warning);
        assert_eq!(error.to_string(), "100072 (23000): duplicate key");
        assert!(error.is_database_error());
        assert!(error.is_a(ErrorKind::IntegrityError));
        assert!(!error.is_a(ErrorKind::DataError));
    }

    #[test]
    fn signal_keeps_message_verbatim() {
        let warning = DbError::signal(ErrorKind::Warning, Some("truncated".to_owned()));
        assert_eq!(warning.to_string(), "truncated");
        assert_eq!(
            DbError::signal(ErrorKind::Warning, None).message(),
            "Unknown error"
        );
    }

    #[test]
    fn serializes_kind_alongside_record_fields() {
        let fields = ErrorFields::from_message("x").with_code(5).with_request_id("q");
        let error = DbError::new(ErrorKind::DataError, fields, Verbosity::Warning);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["kind"], "DataError");
        assert_eq!(json["message"], "000005: x");
        assert_eq!(json["code"], 5);
        assert_eq!(json["state"], "n/a");
        assert_eq!(json["request_id"], "q");
    }

    #[test]
    fn works_as_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(DbError::bad_request());
        assert_eq!(boxed.to_string(), "HTTP 400: BadRequest");
    }
}
