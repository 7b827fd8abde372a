use serde::Serialize;
use utoipa::ToSchema;

use reality_common::SnowflakeGenerator;

use crate::db::store::{AppendOutcome, ShowStore};
use crate::error::ApiError;
use crate::models::show::Participant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VoteTally {
    pub nome: String,
    pub total_votos: i64,
}

/// Register one vote for `participant_name` in `show_name`.
///
/// An existing participant (matched ignoring case) gets exactly one more
/// vote. Otherwise a new participant is appended with a single vote. The
/// append only applies if no case-variant of the name appeared in the
/// meantime; if one did, the vote goes to that participant instead.
pub async fn register_vote(
    store: &dyn ShowStore,
    ids: &SnowflakeGenerator,
    show_name: &str,
    participant_name: &str,
) -> Result<(), ApiError> {
    let show = store
        .find_show(show_name)
        .await?
        .ok_or_else(ApiError::show_not_found)?;

    if let Some(existing) = show.find_participant(participant_name) {
        return add_vote(store, show_name, &existing.name).await;
    }

    let participant = Participant::from_first_vote(ids.generate(), participant_name);
    let id = participant.id;

    match store.append_participant(show_name, participant).await? {
        AppendOutcome::Appended => {
            tracing::info!(show = show_name, participant = participant_name, id, "participant created by vote");
            Ok(())
        }
        AppendOutcome::AlreadyPresent(stored_name) => {
            add_vote(store, show_name, &stored_name).await
        }
        AppendOutcome::ShowMissing => Err(ApiError::show_not_found()),
    }
}

async fn add_vote(store: &dyn ShowStore, show_name: &str, stored_name: &str) -> Result<(), ApiError> {
    if store.increment_votes(show_name, stored_name).await? {
        tracing::debug!(show = show_name, participant = stored_name, "vote registered");
        Ok(())
    } else {
        Err(ApiError::not_found("Participant not found"))
    }
}

/// Vote counts of every participant of `show_name`, in stored order.
pub async fn get_votes(store: &dyn ShowStore, show_name: &str) -> Result<Vec<VoteTally>, ApiError> {
    let show = store
        .find_show(show_name)
        .await?
        .ok_or_else(ApiError::show_not_found)?;

    Ok(show
        .participants
        .into_iter()
        .map(|p| VoteTally {
            nome: p.name,
            total_votos: p.total_votes,
        })
        .collect())
}
