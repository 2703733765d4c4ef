use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn feedback_send(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let message = get_required_str(params, "message")?;
    if message.trim().is_empty() {
        return Err(HandlerErr::bad_params("message must not be empty"));
    }
    state.store.send_feedback(&message);
    // Most-recent-first, so the new entry is at the front.
    Ok(json!({ "feedback": state.store.feedbacks.first() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "feedback.list" => Ok(json!({ "feedbacks": state.store.feedbacks })),
        "feedback.send" => feedback_send(state, &req.params),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
