use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.coverage" => Some(ok(
            &req.id,
            json!({ "coverage": state.store.syllabus_coverage() }),
        )),
        "reports.testSummary" => Some(ok(
            &req.id,
            json!({ "summary": state.store.test_summary() }),
        )),
        "tests.list" => Some(ok(
            &req.id,
            json!({ "testResults": state.store.test_results }),
        )),
        _ => None,
    }
}
