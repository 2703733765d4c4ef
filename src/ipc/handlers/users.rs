use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_role, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn users_register(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    let email = get_required_str(params, "email")?;
    let role = get_required_role(params, "role")?;
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(HandlerErr::bad_params("name and email must not be empty"));
    }
    state.store.register_user(&name, &email, role);
    Ok(json!({ "users": state.store.users }))
}

fn users_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    state.store.delete_user(&id);
    Ok(json!({}))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "users.list" => Ok(json!({ "users": state.store.users })),
        "users.register" => users_register(state, &req.params),
        "users.delete" => users_delete(state, &req.params),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
