use serde_json::json;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_jeetrackd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn jeetrackd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[derive(Debug, Clone)]
struct SeenRequest {
    method: String,
    action: String,
    body: String,
}

/// Minimal action-dispatch backend. Every response body carries trailing
/// non-JSON bytes, imitating hosting environments that append markup to
/// otherwise valid output; the daemon's gateway must truncate-recover.
fn spawn_stub_backend(seen: Arc<Mutex<Vec<SeenRequest>>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub backend");
    let addr = listener.local_addr().expect("stub addr");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            handle_connection(stream, &seen);
        }
    });

    format!("http://{}/api.php", addr)
}

fn handle_connection(stream: TcpStream, seen: &Arc<Mutex<Vec<SeenRequest>>>) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() || request_line.is_empty() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    let action = target
        .split_once("action=")
        .map(|(_, a)| a.split('&').next().unwrap_or_default().to_string())
        .unwrap_or_default();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = v.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body).is_err() {
        return;
    }
    let body = String::from_utf8_lossy(&body).to_string();

    seen.lock().expect("seen lock").push(SeenRequest {
        method,
        action: action.clone(),
        body,
    });

    let payload = match action.as_str() {
        "users" => json!([
            { "id": "u-100", "name": "Server Student", "email": "server@example.com", "role": "STUDENT" },
            { "id": "u-200", "name": "Server Admin", "email": "root@example.com", "role": "ADMIN" }
        ])
        .to_string(),
        "chapters" => json!([
            { "id": "sp1", "subject": "Physics", "name": "Waves", "totalTopics": 4 },
            { "id": "sm1", "subject": "Mathematics", "name": "Vectors", "totalTopics": 5 }
        ])
        .to_string(),
        "login" => json!({
            "id": "u-100",
            "name": "Server Student",
            "email": "server@example.com",
            "role": "STUDENT"
        })
        .to_string(),
        "register" => json!({ "success": true, "id": "u-300" }).to_string(),
        "updateProgress" | "addChapter" => json!({ "success": true }).to_string(),
        "setup_db" => json!({ "success": true }).to_string(),
        _ => json!({ "error": "unknown action" }).to_string(),
    };
    let body = format!("{}<script>window.__ads()</script>", payload);

    let mut stream = reader.into_inner();
    // Deliberately mislabeled content-type; the gateway must not trust it.
    let _ = write!(
        stream,
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.flush();
}

#[test]
fn live_mode_hydrates_and_mirrors_mutations() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base_url = spawn_stub_backend(Arc::clone(&seen));

    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let configured = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "remote.configure",
        json!({ "baseUrl": base_url }),
    );
    assert_eq!(configured["users"], 2);
    assert_eq!(configured["chapters"], 2);

    let health = request_ok(&mut stdin, &mut reader, "2", "health", json!({}));
    assert_eq!(health["live"], true);

    // Hydration replaced the seeded collections with the remote's.
    let users = request_ok(&mut stdin, &mut reader, "3", "users.list", json!({}));
    assert_eq!(users["users"].as_array().map(|a| a.len()), Some(2));
    let chapters = request_ok(&mut stdin, &mut reader, "4", "chapters.list", json!({}));
    assert_eq!(chapters["chapters"][0]["id"], "sp1");

    // Login resolves against the remote and stores its record verbatim.
    let login = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "session.login",
        json!({ "email": "server@example.com", "role": "STUDENT" }),
    );
    assert_eq!(login["user"]["id"], "u-100");
    assert_eq!(login["user"]["name"], "Server Student");

    let adv = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "progress.advance",
        json!({ "chapterId": "sp1" }),
    );
    assert_eq!(adv["status"], "In Progress");

    let setup = request_ok(&mut stdin, &mut reader, "7", "remote.setupDb", json!({}));
    assert_eq!(setup["success"], true);

    let seen = seen.lock().expect("seen lock");
    let login_req = seen
        .iter()
        .find(|r| r.action == "login")
        .expect("login reached backend");
    assert_eq!(login_req.method, "POST");
    let login_body: serde_json::Value =
        serde_json::from_str(&login_req.body).expect("login body json");
    assert_eq!(login_body["email"], "server@example.com");
    assert_eq!(login_body["role"], "STUDENT");

    let update_req = seen
        .iter()
        .find(|r| r.action == "updateProgress")
        .expect("progress update reached backend");
    assert_eq!(update_req.method, "POST");
    let update_body: serde_json::Value =
        serde_json::from_str(&update_req.body).expect("update body json");
    assert_eq!(update_body["userId"], "u-100");
    assert_eq!(update_body["chapterId"], "sp1");
    assert_eq!(update_body["status"], "In Progress");

    assert!(seen.iter().any(|r| r.action == "setup_db" && r.method == "GET"));

    let _ = child.kill();
}

#[test]
fn unreachable_backend_degrades_to_local_state() {
    // Reserve a port, then close it so connections are refused.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind throwaway");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let base_url = format!("http://{}/api.php", addr);

    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    // Hydration fails silently; seeded collections survive.
    let configured = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "remote.configure",
        json!({ "baseUrl": base_url }),
    );
    assert_eq!(configured["users"], 3);
    assert_eq!(configured["chapters"], 19);

    // Live login needs the remote and fails cleanly.
    let payload = json!({
        "id": "2",
        "method": "session.login",
        "params": { "email": "rahul@example.com", "role": "STUDENT" },
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "login_failed");

    // Optimistic mutations still land locally when the remote write is
    // absorbed as a failure.
    let added = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "chapters.add",
        json!({ "id": "x9", "subject": "Chemistry", "name": "Polymers", "totalTopics": 3 }),
    );
    assert_eq!(added["chapter"]["id"], "x9");
    let chapters = request_ok(&mut stdin, &mut reader, "4", "chapters.list", json!({}));
    assert_eq!(chapters["chapters"].as_array().map(|a| a.len()), Some(20));

    let _ = child.kill();
}
