use serde::Deserialize;

use crate::{DbError, ErrorFields, Result};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    #[serde(default, alias = "errno", alias = "errorCode")]
    pub code: Option<Code>,
    #[serde(default, alias = "sqlState", alias = "sqlstate")]
    pub state: Option<String>,
    #[serde(default, alias = "queryId", alias = "sfqid")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Option<Box<ErrorBody>>,
}

/// Servers send codes either as numbers or as zero-padded strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Code {
    Number(i64),
    Text(String),
}

impl Code {
    fn parse(self) -> Result<i64> {
        match self {
            Code::Number(value) => Ok(value),
            Code::Text(value) => value.trim().parse::<i64>().map_err(|err| {
                DbError::interface(format!("invalid error code '{value}': {err}"))
            }),
        }
    }
}

impl ErrorBody {
    fn into_fields(self) -> Result<ErrorFields> {
        let mut fields = ErrorFields {
            message: self.message,
            code: self.code.map(Code::parse).transpose()?,
            state: self.state,
            request_id: self.request_id,
        };

        if let Some(data) = self.data {
            let nested = data.into_fields()?;
            fields.message = nested.message.or(fields.message);
            fields.code = nested.code.or(fields.code);
            fields.state = nested.state.or(fields.state);
            fields.request_id = nested.request_id.or(fields.request_id);
        }
        Ok(fields)
    }
}

/// Longest body excerpt quoted in decode errors, in characters.
const BODY_EXCERPT_LEN: usize = 256;

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_LEN).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn invalid_body(reason: impl std::fmt::Display, body: &str) -> DbError {
    DbError::interface(format!("invalid error body JSON: {reason}; body: {}", excerpt(body)))
}

impl ErrorFields {
    /// Decodes a server error body into fields.
    ///
    /// The body must be a JSON object; `data`, when present, must be an
    /// object too. Values under `data` override top-level ones. A key and its
    /// alias in the same object (e.g. both `message` and `msg`) is rejected as
    /// a duplicate field. Malformed JSON, a non-object body, or a non-numeric
    /// code yields an `InterfaceError`.
    pub fn from_json(body: &str) -> Result<Self> {
        let value = serde_json::from_str::<serde_json::Value>(body)
            .map_err(|err| invalid_body(err, body))?;
        let Some(object) = value.as_object() else {
            return Err(invalid_body("expected an object", body));
        };
        if object
            .get("data")
            .is_some_and(|data| !data.is_object() && !data.is_null())
        {
            return Err(invalid_body("expected `data` to be an object", body));
        }

        serde_json::from_value::<ErrorBody>(value)
            .map_err(|err| invalid_body(err, body))?
            .into_fields()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorFields, ErrorKind};

    #[test]
    fn decodes_flat_body_with_string_code() {
        let fields = ErrorFields::from_json(
            r#"{"message":"SQL compilation error","code":"001003","sqlState":"42000","queryId":"01b2"}"#,
        )
        .expect("body must decode");
        assert_eq!(
            fields,
            ErrorFields::from_message("SQL compilation error")
                .with_code(1003)
                .with_state("42000")
                .with_request_id("01b2")
        );
    }

    #[test]
    fn nested_data_overrides_top_level() {
        let fields = ErrorFields::from_json(
            r#"{"message":"failed","code":"390100","data":{"errorCode":"390318","sqlState":"08001","queryId":"q7"}}"#,
        )
        .expect("body must decode");
        assert_eq!(fields.message.as_deref(), Some("failed"));
        assert_eq!(fields.code, Some(390318));
        assert_eq!(fields.state.as_deref(), Some("08001"));
        assert_eq!(fields.request_id.as_deref(), Some("q7"));
    }

    #[test]
    fn numeric_code_and_missing_fields() {
        let fields = ErrorFields::from_json(r#"{"errno":604}"#).expect("body must decode");
        assert_eq!(fields, ErrorFields::new().with_code(604));
    }

    #[test]
    fn malformed_json_is_interface_error() {
        let err = ErrorFields::from_json("not json").expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::InterfaceError);
        assert!(err.message().starts_with("invalid error body JSON"));
    }

    #[test]
    fn non_object_bodies_are_interface_errors() {
        for body in ["[]", "[\"m\", 1]", "\"message\"", "42", r#"{"data":[]}"#] {
            let err = ErrorFields::from_json(body).expect_err("non-object body must fail");
            assert_eq!(err.kind(), ErrorKind::InterfaceError, "body {body}");
        }
        assert_eq!(
            ErrorFields::from_json(r#"{"message":"m","data":null}"#).expect("null data is absent"),
            ErrorFields::from_message("m")
        );
    }

    #[test]
    fn message_and_alias_together_are_rejected() {
        let err = ErrorFields::from_json(r#"{"message":"a","msg":"b"}"#).expect_err("must fail");
        assert!(err.message().contains("duplicate field"));
    }

    #[test]
    fn long_bodies_are_truncated_in_decode_errors() {
        let body = format!("[{}]", "7,".repeat(1_000) + "7");
        let err = ErrorFields::from_json(&body).expect_err("must fail");
        let quoted = err
            .message()
            .split_once("; body: ")
            .map(|(_, quoted)| quoted)
            .expect("message quotes the body");
        assert_eq!(quoted.chars().count(), 256 + 3);
        assert!(quoted.ends_with("..."));
        assert!(body.starts_with(quoted.trim_end_matches("...")));
    }

    #[test]
    fn short_bodies_are_quoted_whole() {
        let err = ErrorFields::from_json("not json").expect_err("must fail");
        assert!(err.message().ends_with("; body: not json"));
    }

    #[test]
    fn non_numeric_code_is_interface_error() {
        let err = ErrorFields::from_json(r#"{"code":"XX000"}"#).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::InterfaceError);
        assert!(err.message().contains("invalid error code 'XX000'"));
    }
}
