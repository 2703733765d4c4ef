use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_status, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn progress_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let chapter_id = get_required_str(params, "chapterId")?;
    let status = get_required_status(params, "status")?;
    if !state.store.update_progress(&chapter_id, status) {
        return Err(HandlerErr::new("no_session", "progress needs a logged-in user"));
    }
    Ok(json!({ "chapterId": chapter_id, "status": status }))
}

fn progress_advance(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let chapter_id = get_required_str(params, "chapterId")?;
    match state.store.advance_progress(&chapter_id) {
        Some(status) => Ok(json!({ "chapterId": chapter_id, "status": status })),
        None => Err(HandlerErr::new("no_session", "progress needs a logged-in user")),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "progress.list" => Ok(json!({ "progress": state.store.viewed_progress() })),
        "progress.update" => progress_update(state, &req.params),
        "progress.advance" => progress_advance(state, &req.params),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
