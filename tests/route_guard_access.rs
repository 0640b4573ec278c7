use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_eduadmind");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn eduadmind");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
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
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn unauthenticated_access_redirects_to_login() {
    let workspace = temp_dir("eduadmin-guard-anon");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    for (i, role) in ["admin", "teacher", "student"].iter().enumerate() {
        let result = request_ok(
            &mut stdin,
            &mut reader,
            &format!("guard-{i}"),
            "route.guard",
            json!({ "role": role }),
        );
        assert_eq!(result["allowed"], false);
        assert_eq!(result["redirect"], "/login");
    }

    let value = request(&mut stdin, &mut reader, "2", "courses.list", json!({}));
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "not_authorized");
    assert_eq!(value["error"]["details"]["redirect"], "/login");
}

#[test]
fn role_mismatch_is_gated_exactly() {
    let workspace = temp_dir("eduadmin-guard-role");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "session.login",
        json!({ "username": "student", "password": "student" }),
    );

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "route.guard",
        json!({ "role": "student" }),
    );
    assert_eq!(result["allowed"], true);
    assert_eq!(result["user"]["username"], "student");

    for (i, role) in ["admin", "teacher"].iter().enumerate() {
        let result = request_ok(
            &mut stdin,
            &mut reader,
            &format!("deny-{i}"),
            "route.guard",
            json!({ "role": role }),
        );
        assert_eq!(result["allowed"], false);
        assert_eq!(result["redirect"], "/login");
    }

    // A student session reaches student screens and nothing else.
    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "studentAssignments.list",
        json!({}),
    );
    for (i, method) in ["courses.list", "users.create", "teacherStudents.list"]
        .iter()
        .enumerate()
    {
        let value = request(&mut stdin, &mut reader, &format!("off-{i}"), method, json!({}));
        assert_eq!(value["ok"], false, "{} must be gated", method);
        assert_eq!(value["error"]["code"], "not_authorized");
    }
}

#[test]
fn guard_rejects_unknown_roles_and_methods() {
    let workspace = temp_dir("eduadmin-guard-bad");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let value = request(
        &mut stdin,
        &mut reader,
        "2",
        "route.guard",
        json!({ "role": "wizard" }),
    );
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "bad_params");

    let value = request(&mut stdin, &mut reader, "3", "courses.delete", json!({}));
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "not_implemented");
}
