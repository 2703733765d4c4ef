use crate::calc::{self, SyllabusCoverage, TestSummary};
use crate::gateway::Gateway;
use crate::model::{Chapter, ChapterStatus, Feedback, Progress, TestResult, User, UserRole};
use crate::seed;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

/// In-memory authoritative view of the application state, plus the
/// session identity. Mutations are optimistic: when a gateway is
/// configured the remote write is fired first, but local state changes
/// unconditionally and is never rolled back on remote failure.
pub struct Store {
    gateway: Option<Gateway>,
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub chapters: Vec<Chapter>,
    pub progress: Vec<Progress>,
    pub test_results: Vec<TestResult>,
    pub feedbacks: Vec<Feedback>,
}

impl Store {
    /// Local-only store seeded with the demo catalog.
    pub fn new() -> Self {
        Self {
            gateway: None,
            current_user: None,
            users: seed::demo_users(),
            chapters: seed::syllabus(),
            progress: Vec::new(),
            test_results: seed::mock_test_results(),
            feedbacks: Vec::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn remote_base_url(&self) -> Option<&str> {
        self.gateway.as_ref().map(|g| g.base_url())
    }

    /// Switch to live mode and pull the initial collections from the
    /// remote source of truth. Seed data stays in place for anything the
    /// remote does not answer for.
    pub fn connect(&mut self, gateway: Gateway) {
        self.gateway = Some(gateway);
        self.hydrate();
    }

    fn hydrate(&mut self) {
        let Some(gw) = &self.gateway else { return };
        if let Some(data) = gw.get("users") {
            if let Ok(users) = serde_json::from_value::<Vec<User>>(data) {
                self.users = users;
            }
        }
        if let Some(data) = gw.get("chapters") {
            match serde_json::from_value::<Vec<Chapter>>(data) {
                Ok(chapters) if !chapters.is_empty() => self.chapters = chapters,
                _ => {}
            }
        }
    }

    pub fn login(&mut self, email: &str, role: UserRole) -> bool {
        if let Some(gw) = &self.gateway {
            let user = gw.post("login", &json!({ "email": email, "role": role }));
            let Some(user) = user else { return false };
            if user.get("id").and_then(|v| v.as_str()).is_none() {
                return false;
            }
            match serde_json::from_value::<User>(user) {
                Ok(user) => {
                    self.current_user = Some(user);
                    true
                }
                Err(e) => {
                    tracing::warn!(error = %e, "login response was not a user record");
                    false
                }
            }
        } else {
            let found = self
                .users
                .iter()
                .find(|u| u.email == email && u.role == role)
                // Demo fallback: any credential logs in as the seeded
                // identity for the requested role.
                .or_else(|| self.users.iter().find(|u| u.role == role))
                .cloned();
            match found {
                Some(user) => {
                    self.current_user = Some(user);
                    true
                }
                None => false,
            }
        }
    }

    pub fn logout(&mut self) {
        self.current_user = None;
    }

    pub fn register_user(&mut self, name: &str, email: &str, role: UserRole) {
        if let Some(gw) = &self.gateway {
            let _ = gw.post(
                "register",
                &json!({ "name": name, "email": email, "role": role }),
            );
            // Re-read the whole collection so server-assigned ids win over
            // anything generated client-side.
            if let Some(data) = gw.get("users") {
                if let Ok(users) = serde_json::from_value::<Vec<User>>(data) {
                    self.users = users;
                    return;
                }
            }
            tracing::warn!("user list refresh failed after register; local list kept");
        } else {
            self.users.push(User {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role,
                avatar_url: None,
                linked_student_id: None,
            });
        }
    }

    /// Local-only removal. A live re-hydration resurrects the user; the
    /// remote surface has no delete action.
    pub fn delete_user(&mut self, id: &str) {
        self.users.retain(|u| u.id != id);
    }

    pub fn add_chapter(&mut self, chapter: Chapter) {
        if let Some(gw) = &self.gateway {
            let _ = gw.post("addChapter", &json!(&chapter));
        }
        self.chapters.push(chapter);
    }

    /// Local-only removal, like `delete_user`. Progress rows for the
    /// chapter are left behind; they are inert for coverage.
    pub fn delete_chapter(&mut self, id: &str) {
        self.chapters.retain(|c| c.id != id);
    }

    /// Upsert the session user's progress for one chapter. Repeating the
    /// same (chapter, status) pair leaves exactly one row.
    pub fn update_progress(&mut self, chapter_id: &str, status: ChapterStatus) -> bool {
        let Some(user_id) = self.current_user.as_ref().map(|u| u.id.clone()) else {
            return false;
        };
        if let Some(gw) = &self.gateway {
            let _ = gw.post(
                "updateProgress",
                &json!({ "userId": user_id, "chapterId": chapter_id, "status": status }),
            );
        }

        let stamp = now_stamp();
        match self
            .progress
            .iter_mut()
            .find(|p| p.user_id == user_id && p.chapter_id == chapter_id)
        {
            Some(row) => {
                row.status = status;
                row.last_updated = stamp;
            }
            None => self.progress.push(Progress {
                user_id,
                chapter_id: chapter_id.to_string(),
                status,
                last_updated: stamp,
                completion_percentage: 0,
            }),
        }
        true
    }

    /// One step of the status cycle for the session user's chapter. An
    /// absent row reads as Not Started, so the first advance lands on
    /// In Progress.
    pub fn advance_progress(&mut self, chapter_id: &str) -> Option<ChapterStatus> {
        let user_id = self.current_user.as_ref().map(|u| u.id.clone())?;
        let current = self
            .progress
            .iter()
            .find(|p| p.user_id == user_id && p.chapter_id == chapter_id)
            .map(|p| p.status)
            .unwrap_or(ChapterStatus::NotStarted);
        let next = current.advance();
        if self.update_progress(chapter_id, next) {
            Some(next)
        } else {
            None
        }
    }

    /// Purely local, most-recent-first. `to_id` is derived heuristically:
    /// a parent writes to their linked student, anyone else writes to the
    /// demo parent.
    pub fn send_feedback(&mut self, message: &str) {
        let (from_id, to_id) = match &self.current_user {
            Some(u) if u.role == UserRole::Parent => (
                u.id.clone(),
                u.linked_student_id.clone().unwrap_or_else(|| "s1".into()),
            ),
            Some(u) => (u.id.clone(), "p1".to_string()),
            None => ("unknown".to_string(), "p1".to_string()),
        };
        self.feedbacks.insert(
            0,
            Feedback {
                id: Uuid::new_v4().to_string(),
                from_id,
                to_id,
                message: message.to_string(),
                date: now_stamp(),
                is_read: false,
            },
        );
    }

    /// Coverage for the viewed student: a parent session reads the linked
    /// student's progress, every other session reads its own.
    pub fn syllabus_coverage(&self) -> SyllabusCoverage {
        let viewed = self.viewed_student_id();
        calc::syllabus_coverage(&self.chapters, &self.progress, viewed.as_deref().unwrap_or(""))
    }

    /// Progress rows for the viewed student, most useful to frontends
    /// listing the syllabus tracker. Empty without a session.
    pub fn viewed_progress(&self) -> Vec<Progress> {
        match self.viewed_student_id() {
            Some(id) => self
                .progress
                .iter()
                .filter(|p| p.user_id == id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn test_summary(&self) -> TestSummary {
        calc::test_summary(&self.test_results)
    }

    pub fn setup_database(&self) -> bool {
        let Some(gw) = &self.gateway else { return true };
        gw.get("setup_db")
            .and_then(|v| v.get("success").and_then(|s| s.as_bool()))
            .unwrap_or(false)
    }

    fn viewed_student_id(&self) -> Option<String> {
        let user = self.current_user.as_ref()?;
        if user.role == UserRole::Parent {
            if let Some(linked) = &user.linked_student_id {
                return Some(linked.clone());
            }
        }
        Some(user.id.clone())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
