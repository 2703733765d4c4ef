use crate::gateway::Gateway;
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Enables live mode: mutations start mirroring to the remote endpoint
/// and the user/chapter collections are re-read from it immediately.
fn remote_configure(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let base_url = get_required_str(params, "baseUrl")?;
    if base_url.trim().is_empty() {
        return Err(HandlerErr::bad_params("baseUrl must not be empty"));
    }
    state.store.connect(Gateway::new(base_url.clone()));
    Ok(json!({
        "baseUrl": base_url,
        "users": state.store.users.len(),
        "chapters": state.store.chapters.len(),
    }))
}

fn remote_setup_db(state: &mut AppState) -> serde_json::Value {
    json!({ "success": state.store.setup_database() })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "remote.configure" => Some(match remote_configure(state, &req.params) {
            Ok(result) => ok(&req.id, result),
            Err(e) => e.response(&req.id),
        }),
        "remote.setupDb" => {
            let result = remote_setup_db(state);
            Some(ok(&req.id, result))
        }
        _ => None,
    }
}
