//! Read-only views over the show collection.
//!
//! Each view is a pure function over a slice of shows so it can be tested
//! without a store; the `async` wrappers fetch and delegate.

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::store::ShowStore;
use crate::error::ApiError;
use crate::models::show::{Participant, Prize, Show};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrizeSummary {
    pub nome: String,
    pub participantes: Vec<ParticipantPrizes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParticipantPrizes {
    pub nome: String,
    #[schema(value_type = Vec<Object>)]
    pub premios: Vec<Prize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AgeExtremes {
    pub reality: String,
    #[serde(rename = "maisNovo")]
    pub youngest: Option<Participant>,
    #[serde(rename = "maisVelho")]
    pub oldest: Option<Participant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrizeAtLeast {
    pub emissora: Option<String>,
    pub nome: String,
    pub participante: String,
    #[schema(value_type = Object)]
    pub premio: Prize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ShowPrizeTotal {
    pub reality: String,
    #[serde(rename = "totalPremios")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BroadcasterAudience {
    /// Shows without a broadcaster are grouped under `null`.
    pub emissora: Option<String>,
    #[serde(rename = "totalPontos")]
    pub total: f64,
}

pub fn prize_summary(shows: &[Show]) -> Vec<PrizeSummary> {
    shows
        .iter()
        .map(|show| PrizeSummary {
            nome: show.name.clone(),
            participantes: show
                .participants
                .iter()
                .map(|p| ParticipantPrizes {
                    nome: p.name.clone(),
                    premios: p.prizes.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Youngest and oldest participants with a known age. Ties keep the first
/// participant in stored order. When no age is known the first participant
/// stands for both; only a show without participants yields `None`.
pub fn age_extremes(show: &Show) -> AgeExtremes {
    let aged = || show.participants.iter().filter_map(|p| p.age.map(|age| (age, p)));

    let youngest = aged().fold(None, |best: Option<(i64, &Participant)>, (age, p)| match best {
        Some((best_age, _)) if best_age <= age => best,
        _ => Some((age, p)),
    });
    let oldest = aged().fold(None, |best: Option<(i64, &Participant)>, (age, p)| match best {
        Some((best_age, _)) if best_age >= age => best,
        _ => Some((age, p)),
    });

    let first = show.participants.first();

    AgeExtremes {
        reality: show.name.clone(),
        youngest: youngest.map(|(_, p)| p).or(first).cloned(),
        oldest: oldest.map(|(_, p)| p).or(first).cloned(),
    }
}

fn prize_triples(shows: &[Show]) -> impl Iterator<Item = (&Show, &Participant, &Prize)> {
    shows.iter().flat_map(|show| {
        show.participants
            .iter()
            .flat_map(move |p| p.prizes.iter().map(move |prize| (show, p, prize)))
    })
}

pub fn prizes_at_least(shows: &[Show], threshold: f64) -> Vec<PrizeAtLeast> {
    prize_triples(shows)
        .filter(|(_, _, prize)| prize.value >= threshold)
        .map(|(show, p, prize)| PrizeAtLeast {
            emissora: show.broadcaster.clone(),
            nome: show.name.clone(),
            participante: p.name.clone(),
            premio: prize.clone(),
        })
        .collect()
}

/// Sum of prize values per show name, in order of first appearance. Shows
/// without prizes are left out.
pub fn prize_totals(shows: &[Show]) -> Vec<ShowPrizeTotal> {
    let mut totals: Vec<ShowPrizeTotal> = Vec::new();
    for (show, _, prize) in prize_triples(shows) {
        match totals.iter_mut().find(|t| t.reality == show.name) {
            Some(t) => t.total += prize.value,
            None => totals.push(ShowPrizeTotal {
                reality: show.name.clone(),
                total: prize.value,
            }),
        }
    }
    totals
}

/// Sum of audience points per broadcaster, in order of first appearance.
pub fn audience_by_broadcaster(shows: &[Show]) -> Vec<BroadcasterAudience> {
    let mut totals: Vec<BroadcasterAudience> = Vec::new();
    for show in shows {
        match totals.iter_mut().find(|t| t.emissora == show.broadcaster) {
            Some(t) => t.total += show.audience_points,
            None => totals.push(BroadcasterAudience {
                emissora: show.broadcaster.clone(),
                total: show.audience_points,
            }),
        }
    }
    totals
}

pub async fn list_prize_summary(store: &dyn ShowStore) -> Result<Vec<PrizeSummary>, ApiError> {
    Ok(prize_summary(&store.list_shows().await?))
}

pub async fn find_age_extremes(store: &dyn ShowStore, name: &str) -> Result<AgeExtremes, ApiError> {
    let show = store
        .find_show(name)
        .await?
        .ok_or_else(ApiError::show_not_found)?;
    Ok(age_extremes(&show))
}

pub async fn list_prizes_at_least(
    store: &dyn ShowStore,
    threshold: f64,
) -> Result<Vec<PrizeAtLeast>, ApiError> {
    Ok(prizes_at_least(&store.list_shows().await?, threshold))
}

pub async fn list_prize_totals(store: &dyn ShowStore) -> Result<Vec<ShowPrizeTotal>, ApiError> {
    Ok(prize_totals(&store.list_shows().await?))
}

pub async fn list_audience_by_broadcaster(
    store: &dyn ShowStore,
) -> Result<Vec<BroadcasterAudience>, ApiError> {
    Ok(audience_by_broadcaster(&store.list_shows().await?))
}
