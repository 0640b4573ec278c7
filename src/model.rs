use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Dashboard role attached to a session. Exactly one dashboard per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Dashboard landing path after a successful login.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Teacher => "/teacher",
            Role::Student => "/student",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

/// Role choices on the admin user form. Admin accounts are fixed and never
/// created through the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Teacher,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Pending,
    Submitted,
}

/// Comparable cell value for column sorting. Numbers order before text,
/// which never mixes in practice: a column is either all-text or all-number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

/// One record shape in one stored collection. The controller relies on this
/// for seeding, id assignment, required-field validation, and the declared
/// filter/sort columns of the owning screen.
pub trait ListRecord: Clone + Serialize + DeserializeOwned {
    /// Fixed store key of the collection.
    const STORE_KEY: &'static str;

    fn id(&self) -> i64;
    fn assign_id(&mut self, id: i64);

    /// Two canned records installed when no stored collection exists.
    fn seed() -> Vec<Self>;

    /// Names of declared fields that are empty on this record.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Text fields searched by the substring filter. Empty means the
    /// screen has no filter box.
    fn filter_haystack(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Value of a sortable column, `None` when the column is not sortable.
    fn sort_key(&self, _field: &str) -> Option<FieldValue> {
        None
    }
}

fn push_if_empty<'a>(out: &mut Vec<&'a str>, name: &'a str, value: &str) {
    if value.trim().is_empty() {
        out.push(name);
    }
}

/// Admin course catalogue row. Dates stay opaque strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub teacher: String,
}

impl ListRecord for Course {
    const STORE_KEY: &'static str = "courses";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<Course> {
        vec![
            Course {
                id: 1,
                title: "Introduction to React".into(),
                description: "Learn the basics of React".into(),
                start_date: "2023-09-01".into(),
                end_date: "2023-12-15".into(),
                teacher: "John Doe".into(),
            },
            Course {
                id: 2,
                title: "Advanced JavaScript".into(),
                description: "Deep dive into JavaScript".into(),
                start_date: "2023-09-15".into(),
                end_date: "2023-12-20".into(),
                teacher: "Jane Smith".into(),
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "title", &self.title);
        push_if_empty(&mut out, "description", &self.description);
        push_if_empty(&mut out, "startDate", &self.start_date);
        push_if_empty(&mut out, "endDate", &self.end_date);
        push_if_empty(&mut out, "teacher", &self.teacher);
        out
    }

    fn filter_haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.teacher]
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        let v = match field {
            "title" => &self.title,
            "description" => &self.description,
            "startDate" => &self.start_date,
            "endDate" => &self.end_date,
            "teacher" => &self.teacher,
            _ => return None,
        };
        Some(FieldValue::Text(v.clone()))
    }
}

/// Admin user directory row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub role: MemberRole,
}

impl ListRecord for UserRecord {
    const STORE_KEY: &'static str = "users";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<UserRecord> {
        vec![
            UserRecord {
                id: 1,
                name: "John Doe".into(),
                role: MemberRole::Teacher,
            },
            UserRecord {
                id: 2,
                name: "Jane Smith".into(),
                role: MemberRole::Student,
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "name", &self.name);
        out
    }
}

/// Enrolled course on the student dashboard. `progress` is whatever the
/// stored data says; it is displayed, not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourse {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub instructor: String,
    pub progress: i64,
}

impl ListRecord for StudentCourse {
    const STORE_KEY: &'static str = "studentCourses";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<StudentCourse> {
        vec![
            StudentCourse {
                id: 1,
                title: "Introduction to React".into(),
                instructor: "John Doe".into(),
                progress: 60,
            },
            StudentCourse {
                id: 2,
                title: "Advanced JavaScript".into(),
                instructor: "Jane Smith".into(),
                progress: 40,
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "title", &self.title);
        push_if_empty(&mut out, "instructor", &self.instructor);
        out
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        match field {
            "title" => Some(FieldValue::Text(self.title.clone())),
            "instructor" => Some(FieldValue::Text(self.instructor.clone())),
            "progress" => Some(FieldValue::Number(self.progress)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAssignment {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub course: String,
    pub due_date: String,
    pub status: AssignmentStatus,
}

impl ListRecord for StudentAssignment {
    const STORE_KEY: &'static str = "studentAssignments";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<StudentAssignment> {
        vec![
            StudentAssignment {
                id: 1,
                title: "React Hooks Essay".into(),
                course: "Introduction to React".into(),
                due_date: "2023-10-15".into(),
                status: AssignmentStatus::Pending,
            },
            StudentAssignment {
                id: 2,
                title: "Async JavaScript Project".into(),
                course: "Advanced JavaScript".into(),
                due_date: "2023-11-01".into(),
                status: AssignmentStatus::Submitted,
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "title", &self.title);
        push_if_empty(&mut out, "course", &self.course);
        push_if_empty(&mut out, "dueDate", &self.due_date);
        out
    }

    fn filter_haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.course]
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        let v = match field {
            "title" => self.title.clone(),
            "course" => self.course.clone(),
            "dueDate" => self.due_date.clone(),
            "status" => match self.status {
                AssignmentStatus::Pending => "Pending".to_string(),
                AssignmentStatus::Submitted => "Submitted".to_string(),
            },
            _ => return None,
        };
        Some(FieldValue::Text(v))
    }
}

/// Taught course on the teacher dashboard. `students` is a static display
/// count, never recomputed from the student list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCourse {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub students: i64,
}

impl ListRecord for TeacherCourse {
    const STORE_KEY: &'static str = "teacherCourses";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<TeacherCourse> {
        vec![
            TeacherCourse {
                id: 1,
                title: "Introduction to React".into(),
                students: 25,
            },
            TeacherCourse {
                id: 2,
                title: "Advanced JavaScript".into(),
                students: 20,
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "title", &self.title);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStudent {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub course: String,
    pub grade: String,
}

impl ListRecord for TeacherStudent {
    const STORE_KEY: &'static str = "teacherStudents";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<TeacherStudent> {
        vec![
            TeacherStudent {
                id: 1,
                name: "Alice Johnson".into(),
                course: "Introduction to React".into(),
                grade: "A".into(),
            },
            TeacherStudent {
                id: 2,
                name: "Bob Smith".into(),
                course: "Advanced JavaScript".into(),
                grade: "B+".into(),
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "name", &self.name);
        push_if_empty(&mut out, "course", &self.course);
        push_if_empty(&mut out, "grade", &self.grade);
        out
    }
}

/// Assignment as the teacher sees it. No status field; submission state
/// lives only in the student's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAssignment {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub course: String,
    pub due_date: String,
}

impl ListRecord for TeacherAssignment {
    const STORE_KEY: &'static str = "teacherAssignments";

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Vec<TeacherAssignment> {
        vec![
            TeacherAssignment {
                id: 1,
                title: "React Hooks Essay".into(),
                course: "Introduction to React".into(),
                due_date: "2023-10-15".into(),
            },
            TeacherAssignment {
                id: 2,
                title: "Async JavaScript Project".into(),
                course: "Advanced JavaScript".into(),
                due_date: "2023-11-01".into(),
            },
        ]
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        push_if_empty(&mut out, "title", &self.title);
        push_if_empty(&mut out, "course", &self.course);
        push_if_empty(&mut out, "dueDate", &self.due_date);
        out
    }

    fn filter_haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.course]
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        let v = match field {
            "title" => &self.title,
            "course" => &self.course,
            "dueDate" => &self.due_date,
            _ => return None,
        };
        Some(FieldValue::Text(v.clone()))
    }
}
