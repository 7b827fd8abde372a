use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::ApiError;
use crate::models::show::{Participant, Show};

/// Result of a conditional participant append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The participant was added to the show.
    Appended,
    /// A participant with a case-insensitively equal name already existed.
    /// Carries that participant's stored name.
    AlreadyPresent(String),
    /// No show with the given name exists.
    ShowMissing,
}

/// Abstraction over the show collection.
///
/// Backed by MongoDB in production and an in-memory list in tests.
#[async_trait]
pub trait ShowStore: Send + Sync {
    /// All shows in stored order.
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError>;

    /// The show whose name equals `name` exactly.
    async fn find_show(&self, name: &str) -> Result<Option<Show>, ApiError>;

    /// Add one vote to the participant stored under exactly `participant`.
    ///
    /// Returns `false` if no such show/participant pair exists.
    async fn increment_votes(&self, show: &str, participant: &str) -> Result<bool, ApiError>;

    /// Append `participant` unless the show already holds a participant with
    /// the same name ignoring case. The check and the write are one atomic
    /// operation.
    async fn append_participant(
        &self,
        show: &str,
        participant: Participant,
    ) -> Result<AppendOutcome, ApiError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation (tests / local development)
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    shows: Mutex<Vec<Show>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shows(shows: Vec<Show>) -> Self {
        Self {
            shows: Mutex::new(shows),
        }
    }

    pub fn snapshot(&self) -> Vec<Show> {
        self.shows.lock().clone()
    }
}

#[async_trait]
impl ShowStore for MemoryStore {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        Ok(self.snapshot())
    }

    async fn find_show(&self, name: &str) -> Result<Option<Show>, ApiError> {
        Ok(self.shows.lock().iter().find(|s| s.name == name).cloned())
    }

    async fn increment_votes(&self, show: &str, participant: &str) -> Result<bool, ApiError> {
        let mut shows = self.shows.lock();
        let target = shows
            .iter_mut()
            .find(|s| s.name == show)
            .and_then(|s| s.participants.iter_mut().find(|p| p.name == participant));

        match target {
            Some(p) => {
                p.total_votes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_participant(
        &self,
        show: &str,
        participant: Participant,
    ) -> Result<AppendOutcome, ApiError> {
        let mut shows = self.shows.lock();
        let Some(target) = shows.iter_mut().find(|s| s.name == show) else {
            return Ok(AppendOutcome::ShowMissing);
        };

        if let Some(existing) = target.find_participant(&participant.name) {
            return Ok(AppendOutcome::AlreadyPresent(existing.name.clone()));
        }

        target.participants.push(participant);
        Ok(AppendOutcome::Appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(name: &str, participants: &[&str]) -> Show {
        Show {
            name: name.to_string(),
            broadcaster: Some("TV".to_string()),
            audience_points: 1.0,
            participants: participants
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    let mut p = Participant::from_first_vote(i as i64, *n);
                    p.total_votes = 0;
                    p
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn find_show_requires_exact_name() {
        let store = MemoryStore::with_shows(vec![show("Ilha", &[])]);
        assert!(store.find_show("Ilha").await.unwrap().is_some());
        assert!(store.find_show("ilha").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn increment_targets_stored_name_only() {
        let store = MemoryStore::with_shows(vec![show("X", &["Ana"])]);

        assert!(!store.increment_votes("X", "ana").await.unwrap());
        assert!(store.increment_votes("X", "Ana").await.unwrap());
        assert!(!store.increment_votes("Y", "Ana").await.unwrap());

        assert_eq!(store.snapshot()[0].participants[0].total_votes, 1);
    }

    #[tokio::test]
    async fn append_refuses_case_variant_duplicates() {
        let store = MemoryStore::with_shows(vec![show("X", &["Ana"])]);

        let outcome = store
            .append_participant("X", Participant::from_first_vote(10, "ANA"))
            .await
            .unwrap();
        assert_eq!(outcome, AppendOutcome::AlreadyPresent("Ana".to_string()));

        let outcome = store
            .append_participant("X", Participant::from_first_vote(11, "Bruno"))
            .await
            .unwrap();
        assert_eq!(outcome, AppendOutcome::Appended);

        let outcome = store
            .append_participant("Nope", Participant::from_first_vote(12, "Caio"))
            .await
            .unwrap();
        assert_eq!(outcome, AppendOutcome::ShowMissing);

        assert_eq!(store.snapshot()[0].participants.len(), 2);
    }
}
