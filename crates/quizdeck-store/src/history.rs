//! Per-user activity history: logins, quiz attempts, recently viewed.
//!
//! Each list is bounded; the caps are part of the contract and enforced on
//! every write. Newest entries come first. All writes on a user's lists
//! are serialized, so concurrent requests cannot interleave a read-modify-
//! write and lose entries.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login records kept per user.
pub const MAX_LOGIN_RECORDS: usize = 20;
/// Quiz attempts kept per user.
pub const MAX_QUIZ_ATTEMPTS: usize = 50;
/// Recently-viewed items kept per user.
pub const MAX_RECENT_ITEMS: usize = 10;

/// One recorded login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRecord {
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    /// True only for the most recent login.
    pub is_current: bool,
}

/// One completed quiz, as reported by the player page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    #[serde(default)]
    pub quiz_name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    #[serde(default)]
    pub unanswered: u32,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// A recently-opened quiz file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentItem {
    pub name: String,
    /// What kind of visit produced the entry ("quiz", "all_questions",
    /// "quiz_result", ...).
    pub kind: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Activity-history store keyed by user ID.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Record a login. The previous current login is demoted and the list
    /// trimmed to [`MAX_LOGIN_RECORDS`], oldest dropped.
    async fn record_login(&self, user_id: &str, record: LoginRecord);

    /// Logins for a user, newest first.
    async fn logins(&self, user_id: &str) -> Vec<LoginRecord>;

    /// Record a quiz attempt, trimming to [`MAX_QUIZ_ATTEMPTS`].
    async fn record_attempt(&self, user_id: &str, attempt: QuizAttempt);

    /// Attempts for a user, newest first.
    async fn attempts(&self, user_id: &str) -> Vec<QuizAttempt>;

    /// Record a visit. An existing entry with the same name is replaced,
    /// the list trimmed to [`MAX_RECENT_ITEMS`].
    async fn touch_recent(&self, user_id: &str, item: RecentItem);

    /// Recently-viewed items for a user, newest first.
    async fn recent(&self, user_id: &str) -> Vec<RecentItem>;
}

#[derive(Debug, Default)]
struct UserHistory {
    logins: Vec<LoginRecord>,
    attempts: Vec<QuizAttempt>,
    recent: Vec<RecentItem>,
}

/// Process-local history store.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    inner: Mutex<HashMap<String, UserHistory>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_user<R>(&self, user_id: &str, f: impl FnOnce(&mut UserHistory) -> R) -> R {
        let mut inner = self.inner.lock().unwrap();
        f(inner.entry(user_id.to_string()).or_default())
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn record_login(&self, user_id: &str, mut record: LoginRecord) {
        record.is_current = true;
        self.with_user(user_id, |h| {
            for prev in &mut h.logins {
                prev.is_current = false;
            }
            h.logins.insert(0, record);
            h.logins.truncate(MAX_LOGIN_RECORDS);
        });
    }

    async fn logins(&self, user_id: &str) -> Vec<LoginRecord> {
        self.with_user(user_id, |h| h.logins.clone())
    }

    async fn record_attempt(&self, user_id: &str, attempt: QuizAttempt) {
        self.with_user(user_id, |h| {
            h.attempts.insert(0, attempt);
            h.attempts.truncate(MAX_QUIZ_ATTEMPTS);
        });
    }

    async fn attempts(&self, user_id: &str) -> Vec<QuizAttempt> {
        self.with_user(user_id, |h| h.attempts.clone())
    }

    async fn touch_recent(&self, user_id: &str, item: RecentItem) {
        self.with_user(user_id, |h| {
            h.recent.retain(|r| r.name != item.name);
            h.recent.insert(0, item);
            h.recent.truncate(MAX_RECENT_ITEMS);
        });
    }

    async fn recent(&self, user_id: &str) -> Vec<RecentItem> {
        self.with_user(user_id, |h| h.recent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(ip: &str) -> LoginRecord {
        LoginRecord {
            timestamp: Utc::now(),
            ip: ip.to_string(),
            user_agent: "test-agent".to_string(),
            is_current: false,
        }
    }

    fn attempt(name: &str, score: u32) -> QuizAttempt {
        QuizAttempt {
            quiz_name: name.to_string(),
            score,
            total_questions: 10,
            percentage: score as f64,
            correct: score / 5,
            incorrect: 0,
            unanswered: 0,
            timestamp: Utc::now(),
        }
    }

    fn recent(name: &str) -> RecentItem {
        RecentItem {
            name: name.to_string(),
            kind: "quiz".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn only_the_newest_login_is_current() {
        let store = MemoryHistoryStore::new();
        store.record_login("alice", login("10.0.0.1")).await;
        store.record_login("alice", login("10.0.0.2")).await;

        let logins = store.logins("alice").await;
        assert_eq!(logins.len(), 2);
        assert_eq!(logins[0].ip, "10.0.0.2");
        assert!(logins[0].is_current);
        assert!(!logins[1].is_current);
    }

    #[tokio::test]
    async fn login_history_is_capped_with_oldest_evicted() {
        let store = MemoryHistoryStore::new();
        for i in 0..MAX_LOGIN_RECORDS + 5 {
            store.record_login("alice", login(&format!("10.0.0.{i}"))).await;
        }

        let logins = store.logins("alice").await;
        assert_eq!(logins.len(), MAX_LOGIN_RECORDS);
        assert_eq!(logins[0].ip, format!("10.0.0.{}", MAX_LOGIN_RECORDS + 4));
        // The earliest logins are gone.
        assert!(logins.iter().all(|l| l.ip != "10.0.0.0"));
    }

    #[tokio::test]
    async fn attempts_are_newest_first_and_capped() {
        let store = MemoryHistoryStore::new();
        for i in 0..MAX_QUIZ_ATTEMPTS + 3 {
            store.record_attempt("alice", attempt("Module 1", i as u32)).await;
        }

        let attempts = store.attempts("alice").await;
        assert_eq!(attempts.len(), MAX_QUIZ_ATTEMPTS);
        assert_eq!(attempts[0].score, (MAX_QUIZ_ATTEMPTS + 2) as u32);
    }

    #[tokio::test]
    async fn recent_items_dedupe_by_name() {
        let store = MemoryHistoryStore::new();
        store.touch_recent("alice", recent("Module 1")).await;
        store.touch_recent("alice", recent("Module 2")).await;
        store.touch_recent("alice", recent("Module 1")).await;

        let items = store.recent("alice").await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Module 1");
        assert_eq!(items[1].name, "Module 2");
    }

    #[tokio::test]
    async fn recent_list_is_capped() {
        let store = MemoryHistoryStore::new();
        for i in 0..MAX_RECENT_ITEMS + 2 {
            store.touch_recent("alice", recent(&format!("Module {i}"))).await;
        }
        assert_eq!(store.recent("alice").await.len(), MAX_RECENT_ITEMS);
    }

    #[tokio::test]
    async fn histories_are_per_user() {
        let store = MemoryHistoryStore::new();
        store.record_attempt("alice", attempt("Module 1", 50)).await;
        assert!(store.attempts("bob").await.is_empty());
    }
}
