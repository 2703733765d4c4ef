use crate::ipc::error::ok;
use crate::ipc::helpers::{get_optional_str, get_required_i64, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::{Chapter, Subject};
use serde_json::json;
use uuid::Uuid;

fn parse_subject(params: &serde_json::Value) -> Result<Subject, HandlerErr> {
    let raw = params
        .get("subject")
        .cloned()
        .ok_or_else(|| HandlerErr::bad_params("missing subject"))?;
    serde_json::from_value(raw).map_err(|_| HandlerErr {
        code: "bad_params",
        message: "subject must be a subject name".to_string(),
        details: Some(json!(["Physics", "Chemistry", "Mathematics"])),
    })
}

fn chapters_add(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let subject = parse_subject(params)?;
    let name = get_required_str(params, "name")?;
    let total_topics = get_required_i64(params, "totalTopics")?;
    if total_topics <= 0 {
        return Err(HandlerErr::bad_params("totalTopics must be positive"));
    }
    // Callers may carry their own id (the original frontend did); absent
    // one, the daemon assigns it.
    let id = get_optional_str(params, "id").unwrap_or_else(|| Uuid::new_v4().to_string());

    let chapter = Chapter {
        id,
        subject,
        name,
        total_topics,
    };
    state.store.add_chapter(chapter.clone());
    Ok(json!({ "chapter": chapter }))
}

fn chapters_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let id = get_required_str(params, "id")?;
    state.store.delete_chapter(&id);
    Ok(json!({}))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "chapters.list" => Ok(json!({ "chapters": state.store.chapters })),
        "chapters.add" => chapters_add(state, &req.params),
        "chapters.delete" => chapters_delete(state, &req.params),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
