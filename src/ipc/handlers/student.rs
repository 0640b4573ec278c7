use serde_json::json;

use crate::ipc::error::{no_workspace, ok, store_failed, HandlerErr};
use crate::ipc::helpers::{controller, get_required_i64, get_required_str, require_role};
use crate::ipc::types::{AppState, Request};
use crate::model::Role;

fn handle_courses_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Student)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.student_courses)?;
    Ok(json!({ "items": ctl.items() }))
}

fn handle_assignments_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Student)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.student_assignments)?;
    Ok(json!({
        "items": ctl.visible(),
        "sortField": ctl.sort_field(),
        "sortDirection": ctl.sort_direction().as_str(),
        "filterText": ctl.filter_text(),
    }))
}

/// Pending -> Submitted, one-way. Submitting twice leaves the record
/// Submitted; unknown ids are a no-op, mirrored in `updated`.
fn handle_assignments_submit(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Student)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.student_assignments)?;

    let id = get_required_i64(&req.params, "id")?;
    let mut patch = serde_json::Map::new();
    patch.insert("status".to_string(), json!("Submitted"));
    let updated = ctl.update_fields(id, &patch)?;
    ctl.persist(store).map_err(store_failed)?;
    Ok(json!({ "updated": updated }))
}

fn handle_assignments_sort(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Student)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.student_assignments)?;

    let field = get_required_str(&req.params, "field")?;
    ctl.toggle_sort(&field);
    Ok(json!({
        "sortField": ctl.sort_field(),
        "sortDirection": ctl.sort_direction().as_str(),
    }))
}

fn handle_assignments_filter(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Student)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.student_assignments)?;

    let text = req.params.get("text").and_then(|v| v.as_str()).unwrap_or("");
    ctl.set_filter(text);
    Ok(json!({ "filterText": ctl.filter_text(), "items": ctl.visible() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let handled = match req.method.as_str() {
        "studentCourses.list" => handle_courses_list(state),
        "studentAssignments.list" => handle_assignments_list(state),
        "studentAssignments.submit" => handle_assignments_submit(state, req),
        "studentAssignments.sort" => handle_assignments_sort(state, req),
        "studentAssignments.filter" => handle_assignments_filter(state, req),
        _ => return None,
    };
    Some(match handled {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    })
}
