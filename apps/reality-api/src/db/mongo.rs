use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion, Tls, TlsOptions};
use mongodb::{Client, Collection};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::show::{Participant, Show};

use super::store::{AppendOutcome, ShowStore};

/// Failure to obtain a usable database handle at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("invalid MongoDB connection options: {0}")]
    Options(#[source] mongodb::error::Error),
    #[error("MongoDB unreachable within {timeout:?}: {source}")]
    Unreachable {
        timeout: Duration,
        #[source]
        source: mongodb::error::Error,
    },
}

/// Handle to the show collection. Cheap to clone; the driver pools
/// connections internally and is safe to share across requests.
#[derive(Clone, Debug)]
pub struct MongoStore {
    shows: Collection<Show>,
}

/// Connect to MongoDB and verify the deployment answers a `ping` within the
/// configured timeout.
pub async fn connect(config: &Config) -> Result<MongoStore, ConnectionError> {
    let mut options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .map_err(ConnectionError::Options)?;

    options.app_name = Some("reality-api".to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.connect_timeout);

    if config.tls_allow_invalid_certificates {
        let mut tls = match options.tls.take() {
            Some(Tls::Enabled(tls)) => tls,
            _ => TlsOptions::default(),
        };
        tls.allow_invalid_certificates = Some(true);
        options.tls = Some(Tls::Enabled(tls));
        tracing::warn!("TLS certificate validation disabled for MongoDB");
    }

    let client = Client::with_options(options).map_err(ConnectionError::Options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|source| ConnectionError::Unreachable {
            timeout: config.connect_timeout,
            source,
        })?;

    let shows = client
        .database(&config.database_name)
        .collection::<Show>(&config.collection_name);

    tracing::info!(
        database = %config.database_name,
        collection = %config.collection_name,
        "connected to MongoDB"
    );

    Ok(MongoStore { shows })
}

/// Filter matching a participant array element whose name equals `name`
/// ignoring case.
fn name_ci(name: &str) -> Document {
    doc! {
        "nome": {
            "$regex": format!("^{}$", regex::escape(name)),
            "$options": "i",
        }
    }
}

fn show_filter(show: &str) -> Document {
    doc! { "nome": show }
}

/// Targets the participant stored under exactly `participant`; the positional
/// `$` in [`increment_update`] resolves to that element.
fn increment_filter(show: &str, participant: &str) -> Document {
    doc! { "nome": show, "participantes.nome": participant }
}

fn increment_update() -> Document {
    doc! { "$inc": { "participantes.$.total_votos": 1_i64 } }
}

/// Matches the show only while no participant has `name` ignoring case.
fn append_filter(show: &str, name: &str) -> Document {
    doc! {
        "nome": show,
        "participantes": { "$not": { "$elemMatch": name_ci(name) } },
    }
}

fn append_update(participant: &Participant) -> Result<Document, ApiError> {
    Ok(doc! { "$push": { "participantes": to_bson(participant)? } })
}

/// Classify a guarded append that matched no document, given the show as
/// re-read afterwards.
fn missed_append(current: Option<Show>, name: &str) -> Result<AppendOutcome, ApiError> {
    let Some(current) = current else {
        return Ok(AppendOutcome::ShowMissing);
    };
    match current.find_participant(name) {
        Some(existing) => Ok(AppendOutcome::AlreadyPresent(existing.name.clone())),
        None => {
            tracing::error!(show = %current.name, participant = %name, "conditional append matched nothing");
            Err(ApiError::internal("An internal error occurred"))
        }
    }
}

#[async_trait]
impl ShowStore for MongoStore {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        let cursor = self.shows.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_show(&self, name: &str) -> Result<Option<Show>, ApiError> {
        Ok(self.shows.find_one(show_filter(name)).await?)
    }

    async fn increment_votes(&self, show: &str, participant: &str) -> Result<bool, ApiError> {
        let result = self
            .shows
            .update_one(increment_filter(show, participant), increment_update())
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn append_participant(
        &self,
        show: &str,
        participant: Participant,
    ) -> Result<AppendOutcome, ApiError> {
        let result = self
            .shows
            .update_one(
                append_filter(show, &participant.name),
                append_update(&participant)?,
            )
            .await?;

        if result.matched_count > 0 {
            return Ok(AppendOutcome::Appended);
        }

        // Either the show is gone or someone else created the participant.
        missed_append(self.find_show(show).await?, &participant.name)
    }
}
