use crate::{DbError, ErrorEvent, ErrorFields, ErrorKind, ErrorReporter, Result, Verbosity};

/// Records an error on the given collaborators and routes it to a handler.
///
/// The connection log (if any) is appended first. A cursor then takes
/// priority: its log is appended and only its handler runs. Without a cursor
/// the connection handler runs. With neither, the error is returned directly.
///
/// Whatever the chosen handler returns is returned unchanged, so a handler
/// may suppress the error with `Ok(())`.
pub fn dispatch(
    mut connection: Option<&mut dyn ErrorReporter>,
    cursor: Option<&mut dyn ErrorReporter>,
    kind: ErrorKind,
    fields: ErrorFields,
    verbosity: Verbosity,
) -> Result<()> {
    if let Some(connection) = connection.as_deref_mut() {
        connection.messages_mut().push(kind, fields.clone());
    }

    if let Some(cursor) = cursor {
        cursor.messages_mut().push(kind, fields.clone());

        #[cfg(feature = "tracing")]
        tracing::debug!(kind = %kind, "routing error to cursor handler");

        let cursor: &dyn ErrorReporter = cursor;
        let event = ErrorEvent {
            connection: connection.as_deref(),
            cursor: Some(cursor),
            kind,
            fields: &fields,
            verbosity,
        };
        return cursor.error_handler().call(&event);
    }

    if let Some(connection) = connection {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = %kind, "routing error to connection handler");

        let connection: &dyn ErrorReporter = connection;
        let event = ErrorEvent {
            connection: Some(connection),
            cursor: None,
            kind,
            fields: &fields,
            verbosity,
        };
        return connection.error_handler().call(&event);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(kind = %kind, "no error handler registered, raising");

    if kind.is_error() {
        Err(DbError::new(kind, fields, verbosity))
    } else {
        Err(DbError::signal(kind, fields.message))
    }
}
