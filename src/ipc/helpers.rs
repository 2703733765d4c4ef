use crate::ipc::error::err;
use crate::model::{ChapterStatus, UserRole};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_params(message: impl Into<String>) -> Self {
        Self::new("bad_params", message)
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

pub fn get_required_i64(params: &serde_json::Value, key: &str) -> Result<i64, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Wire role strings are uppercase ("STUDENT", "PARENT", "ADMIN").
pub fn get_required_role(params: &serde_json::Value, key: &str) -> Result<UserRole, HandlerErr> {
    let raw = params
        .get(key)
        .cloned()
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))?;
    serde_json::from_value(raw).map_err(|_| {
        HandlerErr {
            code: "bad_params",
            message: format!("{} must be a role", key),
            details: Some(serde_json::json!(["STUDENT", "PARENT", "ADMIN"])),
        }
    })
}

/// Wire status strings are the display names ("Not Started", ...).
pub fn get_required_status(
    params: &serde_json::Value,
    key: &str,
) -> Result<ChapterStatus, HandlerErr> {
    let raw = params
        .get(key)
        .cloned()
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))?;
    serde_json::from_value(raw).map_err(|_| {
        HandlerErr {
            code: "bad_params",
            message: format!("{} must be a chapter status", key),
            details: Some(serde_json::json!([
                "Not Started",
                "In Progress",
                "Completed",
                "Revision"
            ])),
        }
    })
}
