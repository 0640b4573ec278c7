use serde_json::json;

use crate::ipc::error::{no_workspace, ok, store_failed, HandlerErr};
use crate::ipc::helpers::{controller, get_required_str, parse_draft, require_role};
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, TeacherAssignment};

fn handle_courses_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Teacher)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.teacher_courses)?;
    Ok(json!({ "items": ctl.items() }))
}

fn handle_students_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Teacher)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.teacher_students)?;
    Ok(json!({ "items": ctl.items() }))
}

fn handle_assignments_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Teacher)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.teacher_assignments)?;
    Ok(json!({
        "items": ctl.visible(),
        "sortField": ctl.sort_field(),
        "sortDirection": ctl.sort_direction().as_str(),
        "filterText": ctl.filter_text(),
    }))
}

fn handle_assignments_create(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Teacher)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.teacher_assignments)?;

    let draft: TeacherAssignment = parse_draft(&req.params)?;
    let created = ctl.add(draft)?;
    ctl.persist(store).map_err(store_failed)?;
    Ok(json!({ "created": created, "count": ctl.items().len() }))
}

fn handle_assignments_sort(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    require_role(&state.session, Role::Teacher)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.teacher_assignments)?;

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
    require_role(&state.session, Role::Teacher)?;
    let store = state.store.as_ref().ok_or_else(no_workspace)?;
    let ctl = controller(store, &mut state.teacher_assignments)?;

    let text = req.params.get("text").and_then(|v| v.as_str()).unwrap_or("");
    ctl.set_filter(text);
    Ok(json!({ "filterText": ctl.filter_text(), "items": ctl.visible() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let handled = match req.method.as_str() {
        "teacherCourses.list" => handle_courses_list(state),
        "teacherStudents.list" => handle_students_list(state),
        "teacherAssignments.list" => handle_assignments_list(state),
        "teacherAssignments.create" => handle_assignments_create(state, req),
        "teacherAssignments.sort" => handle_assignments_sort(state, req),
        "teacherAssignments.filter" => handle_assignments_filter(state, req),
        _ => return None,
    };
    Some(match handled {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    })
}
