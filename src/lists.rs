use std::cmp::Ordering;

use serde_json::Value;
use thiserror::Error;

use crate::model::ListRecord;
use crate::store::Store;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("patch does not fit the record shape: {0}")]
    BadPatch(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn flipped(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Owner of one stored collection plus the view state of its screen.
///
/// Mutators only touch the in-memory collection; callers follow every
/// mutation with `persist` so write-through timing stays explicit.
pub struct ListController<R: ListRecord> {
    items: Vec<R>,
    sort_field: Option<String>,
    sort_direction: SortDirection,
    filter_text: String,
}

impl<R: ListRecord> ListController<R> {
    /// Read the collection from the store, seeding when nothing is stored.
    /// Malformed stored JSON falls back to the seed: there is no recovery
    /// UI, so a parse error must still land on a usable screen.
    pub fn load(store: &Store) -> ListController<R> {
        let items = match store.get(R::STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<R>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        key = R::STORE_KEY,
                        error = %e,
                        "stored collection is malformed, reseeding"
                    );
                    R::seed()
                }
            },
            Ok(None) => R::seed(),
            Err(e) => {
                tracing::warn!(key = R::STORE_KEY, error = %e, "store read failed, reseeding");
                R::seed()
            }
        };
        ListController {
            items,
            sort_field: None,
            sort_direction: SortDirection::Asc,
            filter_text: String::new(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Validate the declared fields, assign the next id, append. Identical
    /// drafts produce distinct records with sequential ids.
    pub fn add(&mut self, mut record: R) -> Result<R, ListError> {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            return Err(ListError::MissingFields(missing));
        }
        record.assign_id(self.next_id());
        self.items.push(record.clone());
        Ok(record)
    }

    /// Shallow-merge `patch` into the record with the given id. `Ok(false)`
    /// when no record matches.
    pub fn update_fields(
        &mut self,
        id: i64,
        patch: &serde_json::Map<String, Value>,
    ) -> Result<bool, ListError> {
        let Some(slot) = self.items.iter_mut().find(|r| r.id() == id) else {
            return Ok(false);
        };
        let mut merged = serde_json::to_value(&*slot)?;
        if let Value::Object(fields) = &mut merged {
            for (k, v) in patch {
                fields.insert(k.clone(), v.clone());
            }
        }
        *slot = serde_json::from_value(merged)?;
        Ok(true)
    }

    /// Same column flips the direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = Some(field.to_string());
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
    }

    /// Derived rows for the table: case-insensitive substring filter over
    /// the declared haystack, then a stable sort on the active column.
    /// Without an active column the insertion order is preserved.
    pub fn visible(&self) -> Vec<R> {
        let needle = self.filter_text.to_lowercase();
        let mut rows: Vec<R> = self
            .items
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.filter_haystack()
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        if let Some(field) = self.sort_field.as_deref() {
            rows.sort_by(|a, b| {
                let ord = match (a.sort_key(field), b.sort_key(field)) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    _ => Ordering::Equal,
                };
                match self.sort_direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        rows
    }

    /// Full-collection write-through under the domain's fixed key.
    pub fn persist(&self, store: &Store) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.items)?;
        store.set(R::STORE_KEY, &raw)
    }

    fn next_id(&self) -> i64 {
        self.items.iter().map(|r| r.id()).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssignmentStatus, Course, StudentAssignment};
    use serde_json::json;

    fn course(title: &str, teacher: &str) -> Course {
        Course {
            id: 0,
            title: title.into(),
            description: "desc".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-02-01".into(),
            teacher: teacher.into(),
        }
    }

    #[test]
    fn load_seeds_when_store_is_empty() {
        let store = Store::open_in_memory().expect("store");
        let ctl = ListController::<Course>::load(&store);
        let titles: Vec<&str> = ctl.items().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction to React", "Advanced JavaScript"]);
    }

    #[test]
    fn load_falls_back_to_seed_on_malformed_json() {
        let store = Store::open_in_memory().expect("store");
        store.set("courses", "{not json").expect("set");
        let ctl = ListController::<Course>::load(&store);
        assert_eq!(ctl.items().len(), 2);
        assert_eq!(ctl.items()[0].id, 1);
    }

    #[test]
    fn add_assigns_sequential_ids_and_is_not_idempotent() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<Course>::load(&store);

        let first = ctl.add(course("X", "Z")).expect("add");
        assert_eq!(first.id, 3);
        let second = ctl.add(course("X", "Z")).expect("add");
        assert_eq!(second.id, 4);
        assert_eq!(ctl.items().len(), 4);
    }

    #[test]
    fn add_rejects_empty_declared_fields() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<Course>::load(&store);
        let err = ctl.add(course("", "Z")).expect_err("must reject");
        match err {
            ListError::MissingFields(fields) => assert_eq!(fields, vec!["title"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ctl.items().len(), 2);
    }

    #[test]
    fn persist_then_load_roundtrips_exactly() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<Course>::load(&store);
        ctl.add(course("X", "Z")).expect("add");
        ctl.persist(&store).expect("persist");

        let again = ListController::<Course>::load(&store);
        assert_eq!(again.items(), ctl.items());
    }

    #[test]
    fn update_fields_merges_one_record_and_noops_on_unknown_id() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<StudentAssignment>::load(&store);

        let patch = json!({ "status": "Submitted" });
        let patch = patch.as_object().expect("object");
        assert!(ctl.update_fields(1, patch).expect("patch"));
        assert_eq!(ctl.items()[0].status, AssignmentStatus::Submitted);
        assert_eq!(ctl.items()[1].status, AssignmentStatus::Submitted);

        assert!(!ctl.update_fields(99, patch).expect("patch"));
        assert_eq!(ctl.items().len(), 2);
    }

    #[test]
    fn update_fields_rejects_values_outside_the_record_shape() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<StudentAssignment>::load(&store);
        let patch = json!({ "status": "Graded" });
        let patch = patch.as_object().expect("object");
        assert!(ctl.update_fields(1, patch).is_err());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<StudentAssignment>::load(&store);
        ctl.set_filter("REACT");
        let rows = ctl.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "React Hooks Essay");
    }

    #[test]
    fn unset_sort_preserves_insertion_order() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<Course>::load(&store);
        ctl.add(course("Aardvark Studies", "Z")).expect("add");
        let rows = ctl.visible();
        let titles: Vec<&str> = rows.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Introduction to React",
                "Advanced JavaScript",
                "Aardvark Studies"
            ]
        );
    }

    #[test]
    fn sort_is_stable_and_double_toggle_restores_tie_order() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<Course>::load(&store);
        // Two records tie on title; teacher disambiguates insertion order.
        ctl.add(course("Duplicate", "first")).expect("add");
        ctl.add(course("Duplicate", "second")).expect("add");

        ctl.toggle_sort("title");
        let asc: Vec<String> = ctl
            .visible()
            .iter()
            .filter(|c| c.title == "Duplicate")
            .map(|c| c.teacher.clone())
            .collect();
        assert_eq!(asc, vec!["first", "second"]);

        ctl.toggle_sort("title");
        let desc: Vec<String> = ctl
            .visible()
            .iter()
            .filter(|c| c.title == "Duplicate")
            .map(|c| c.teacher.clone())
            .collect();
        assert_eq!(desc, vec!["first", "second"]);

        ctl.toggle_sort("title");
        let asc_again: Vec<String> = ctl
            .visible()
            .iter()
            .filter(|c| c.title == "Duplicate")
            .map(|c| c.teacher.clone())
            .collect();
        assert_eq!(asc_again, vec!["first", "second"]);
    }

    #[test]
    fn numeric_columns_sort_by_value_not_lexically() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<crate::model::StudentCourse>::load(&store);
        ctl.add(crate::model::StudentCourse {
            id: 0,
            title: "Databases".into(),
            instructor: "Pat Lee".into(),
            progress: 5,
        })
        .expect("add");

        ctl.toggle_sort("progress");
        let rows = ctl.visible();
        let progress: Vec<i64> = rows.iter().map(|c| c.progress).collect();
        assert_eq!(progress, vec![5, 40, 60]);
    }

    #[test]
    fn toggling_a_new_column_resets_to_ascending() {
        let store = Store::open_in_memory().expect("store");
        let mut ctl = ListController::<Course>::load(&store);
        ctl.toggle_sort("title");
        ctl.toggle_sort("title");
        assert_eq!(ctl.sort_direction(), SortDirection::Desc);
        ctl.toggle_sort("teacher");
        assert_eq!(ctl.sort_field(), Some("teacher"));
        assert_eq!(ctl.sort_direction(), SortDirection::Asc);
    }
}
