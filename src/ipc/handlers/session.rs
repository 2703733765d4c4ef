use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_role, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn session_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let parsed = (|| -> Result<_, HandlerErr> {
        let email = get_required_str(&req.params, "email")?;
        let role = get_required_role(&req.params, "role")?;
        Ok((email, role))
    })();
    let (email, role) = match parsed {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    if state.store.login(&email, role) {
        ok(&req.id, json!({ "user": state.store.current_user }))
    } else {
        err(&req.id, "login_failed", "no matching identity", None)
    }
}

fn session_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.logout();
    ok(&req.id, json!({}))
}

fn session_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "user": state.store.current_user }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(session_login(state, req)),
        "session.logout" => Some(session_logout(state, req)),
        "session.current" => Some(session_current(state, req)),
        _ => None,
    }
}
