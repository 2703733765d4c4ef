use serde::{Deserialize, Serialize};

/// Wire names match the original web client's JSON payloads exactly
/// (`"STUDENT"`, `"Mathematics"`, `"Not Started"`, ...), so a frontend
/// built against the HTTP backend can drive the daemon unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Student,
    Parent,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    #[serde(rename = "Mathematics")]
    Math,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChapterStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Revision,
}

impl ChapterStatus {
    /// Single-stranded cycle driven by the user's "advance" action:
    /// Not Started -> In Progress -> Completed -> Revision -> Not Started.
    pub fn advance(self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::Revision,
            Self::Revision => Self::NotStarted,
        }
    }

    /// A chapter counts toward syllabus coverage once it has been
    /// completed, including when it is back in revision.
    pub fn is_covered(self) -> bool {
        matches!(self, Self::Completed | Self::Revision)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Parents are associated with exactly one student. Not enforced
    /// referentially anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_student_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub subject: Subject,
    pub name: String,
    pub total_topics: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub user_id: String,
    pub chapter_id: String,
    pub status: ChapterStatus,
    pub last_updated: String,
    pub completion_percentage: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub test_name: String,
    pub date: String,
    pub score: i64,
    pub total_score: i64,
    pub subject_breakdown: std::collections::BTreeMap<Subject, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub message: String,
    pub date: String,
    pub is_read: bool,
}
