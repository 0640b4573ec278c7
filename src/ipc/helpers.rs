use serde_json::Value;

use crate::ipc::error::{bad_params, not_authorized, store_failed, HandlerErr};
use crate::lists::ListController;
use crate::model::{ListRecord, Role};
use crate::session::SessionGate;
use crate::store::Store;

pub fn get_required_str(params: &Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| bad_params(format!("missing {}", key)))
}

pub fn get_required_i64(params: &Value, key: &str) -> Result<i64, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| bad_params(format!("missing {}", key)))
}

pub fn require_role(gate: &SessionGate, required: Role) -> Result<(), HandlerErr> {
    match gate.authorize(required) {
        Some(_) => Ok(()),
        None => Err(not_authorized()),
    }
}

/// Lazy controller access: the first touch loads the collection (seeding
/// when nothing is stored) and writes it straight back, so the store holds
/// the collection from the moment the screen exists.
pub fn controller<'a, R: ListRecord>(
    store: &Store,
    slot: &'a mut Option<ListController<R>>,
) -> Result<&'a mut ListController<R>, HandlerErr> {
    if slot.is_none() {
        let ctl = ListController::load(store);
        ctl.persist(store).map_err(store_failed)?;
        *slot = Some(ctl);
    }
    slot.as_mut()
        .ok_or_else(|| HandlerErr::new("internal", "controller slot empty after init"))
}

/// Parse a creation draft out of `params`; unknown keys are ignored and the
/// controller assigns the id.
pub fn parse_draft<R: ListRecord>(params: &Value) -> Result<R, HandlerErr> {
    serde_json::from_value(params.clone()).map_err(|e| bad_params(e.to_string()))
}
