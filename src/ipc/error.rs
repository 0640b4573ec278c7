use serde_json::json;

use crate::lists::ListError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Handler-side failure, turned into the error envelope by `try_handle`.
pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> HandlerErr {
        HandlerErr {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn bad_params(message: impl Into<String>) -> HandlerErr {
    HandlerErr::new("bad_params", message)
}

pub fn no_workspace() -> HandlerErr {
    HandlerErr::new("no_workspace", "select a workspace first")
}

/// Absent session or wrong role. The UI routes back to the login screen.
pub fn not_authorized() -> HandlerErr {
    HandlerErr {
        code: "not_authorized",
        message: "session role does not grant access".to_string(),
        details: Some(json!({ "redirect": "/login" })),
    }
}

pub fn store_failed(e: anyhow::Error) -> HandlerErr {
    HandlerErr::new("store_write_failed", format!("{e:?}"))
}

impl From<ListError> for HandlerErr {
    fn from(e: ListError) -> HandlerErr {
        match e {
            ListError::MissingFields(fields) => HandlerErr {
                code: "missing_fields",
                message: format!("missing required fields: {}", fields.join(", ")),
                details: Some(json!({ "fields": fields })),
            },
            ListError::BadPatch(inner) => bad_params(inner.to_string()),
        }
    }
}
