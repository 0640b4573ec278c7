use std::path::PathBuf;

use serde::Deserialize;

use crate::lists::ListController;
use crate::model::{
    Course, StudentAssignment, StudentCourse, TeacherAssignment, TeacherCourse, TeacherStudent,
    UserRecord,
};
use crate::session::SessionGate;
use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the daemon holds between requests. Controllers are created
/// lazily the first time their screen asks for them, so a collection is
/// only seeded once something actually renders it.
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Option<Store>,
    pub session: SessionGate,
    pub courses: Option<ListController<Course>>,
    pub users: Option<ListController<UserRecord>>,
    pub student_courses: Option<ListController<StudentCourse>>,
    pub student_assignments: Option<ListController<StudentAssignment>>,
    pub teacher_courses: Option<ListController<TeacherCourse>>,
    pub teacher_students: Option<ListController<TeacherStudent>>,
    pub teacher_assignments: Option<ListController<TeacherAssignment>>,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            workspace: None,
            store: None,
            session: SessionGate::default(),
            courses: None,
            users: None,
            student_courses: None,
            student_assignments: None,
            teacher_courses: None,
            teacher_students: None,
            teacher_assignments: None,
        }
    }

    /// Forget per-workspace state when a new workspace is selected.
    pub fn reset_controllers(&mut self) {
        self.courses = None;
        self.users = None;
        self.student_courses = None;
        self.student_assignments = None;
        self.teacher_courses = None;
        self.teacher_students = None;
        self.teacher_assignments = None;
    }
}
