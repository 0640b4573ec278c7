use serde_json::json;

use crate::ipc::error::{bad_params, no_workspace, ok, store_failed, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::model::Role;

fn handle_login(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let username = get_required_str(&req.params, "username")?;
    let password = get_required_str(&req.params, "password")?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;

    let session = state
        .session
        .login(&username, &password)
        .map_err(|e| HandlerErr::new("invalid_credentials", e.to_string()))?;
    let result = json!({
        "username": session.username,
        "role": session.role,
        "home": session.role.home_path(),
    });

    // Mirror before replying so a crash right after still remembers us.
    state
        .session
        .persist(store)
        .map_err(store_failed)?;
    Ok(result)
}

fn handle_current(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "user": state.session.current() }))
}

fn handle_logout(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    state.session.logout();
    state
        .session
        .persist(store)
        .map_err(store_failed)?;
    Ok(json!({}))
}

/// Route gating: exact role match passes, anything else sends the UI back
/// to the login entry point.
fn handle_guard(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let role = get_required_str(&req.params, "role")?;
    let role = Role::parse(&role)
        .ok_or_else(|| bad_params(format!("unknown role: {role}")))?;
    match state.session.authorize(role) {
        Some(session) => Ok(json!({ "allowed": true, "user": session })),
        None => Ok(json!({ "allowed": false, "redirect": "/login" })),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let handled = match req.method.as_str() {
        "session.login" => handle_login(state, req),
        "session.current" => handle_current(state),
        "session.logout" => handle_logout(state),
        "route.guard" => handle_guard(state, req),
        _ => return None,
    };
    Some(match handled {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    })
}
