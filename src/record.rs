use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Verbosity;

/// Code value meaning "no code assigned".
pub const NO_CODE: i64 = -1;
/// State value meaning "no state assigned".
pub const NO_STATE: &str = "n/a";
/// Message used when none (or an empty one) is supplied.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
/// Rendered in place of an absent request id at verbose levels.
pub const MISSING_REQUEST_ID: &str = "None";

/// Raw, optional fields an error is built from.
///
/// Absent members fall back to the sentinels above when a record is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFields {
    /// Human-readable message, before rendering.
    #[serde(default, alias = "msg", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Numeric error code. `0` and `-1` mean no code.
    #[serde(default, alias = "errno", skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// SQL state token. Empty and `"n/a"` mean no state.
    #[serde(default, alias = "sqlstate", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Server-side request (query) id.
    #[serde(default, alias = "sfqid", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields carrying only a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new().with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl From<&str> for ErrorFields {
    fn from(message: &str) -> Self {
        Self::from_message(message)
    }
}

impl From<String> for ErrorFields {
    fn from(message: String) -> Self {
        Self::from_message(message)
    }
}

/// Immutable error payload with its message rendered at construction.
///
/// The rendered message depends on the verbosity passed to
/// [`ErrorRecord::new`]; changing verbosity later never alters it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    message: String,
    code: i64,
    state: String,
    request_id: Option<String>,
}

impl ErrorRecord {
    /// Applies defaults and renders the message.
    pub fn new(fields: ErrorFields, verbosity: Verbosity) -> Self {
        let ErrorFields {
            message,
            code,
            state,
            request_id,
        } = fields;

        let message = message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned());
        let code = code.filter(|code| *code != 0).unwrap_or(NO_CODE);
        let state = state
            .filter(|state| !state.is_empty())
            .unwrap_or_else(|| NO_STATE.to_owned());

        let message = render_message(&message, code, &state, request_id.as_deref(), verbosity);
        Self {
            message,
            code,
            state,
            request_id,
        }
    }

    /// Record whose message is kept verbatim, with no code or state.
    pub fn plain(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_owned()
            } else {
                message
            },
            code: NO_CODE,
            state: NO_STATE.to_owned(),
            request_id: None,
        }
    }

    /// The rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The numeric code, [`NO_CODE`] when unset.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// The state token, [`NO_STATE`] when unset.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn has_code(&self) -> bool {
        self.code != NO_CODE
    }

    pub fn has_state(&self) -> bool {
        self.state != NO_STATE
    }

    /// UTF-8 encoding of the rendered message.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.message.as_bytes().to_vec()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn render_message(
    message: &str,
    code: i64,
    state: &str,
    request_id: Option<&str>,
    verbosity: Verbosity,
) -> String {
    if code == NO_CODE {
        return message.to_owned();
    }

    let request_id = request_id.unwrap_or(MISSING_REQUEST_ID);
    match (state != NO_STATE, verbosity.includes_request_id()) {
        (true, true) => format!("{code:06} ({state}): {request_id}: {message}"),
        (true, false) => format!("{code:06} ({state}): {message}"),
        (false, true) => format!("{code:06}: {request_id}: {message}"),
        (false, false) => format!("{code:06}: {message}"),
    }
}
