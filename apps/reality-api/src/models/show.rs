use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::number;

/// A reality show document, keyed by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Show {
    #[serde(rename = "nome")]
    pub name: String,
    /// `None` when the document carries no broadcaster.
    #[serde(rename = "emissora", default)]
    pub broadcaster: Option<String>,
    #[serde(rename = "audiencia_pontos", default)]
    pub audience_points: f64,
    #[serde(rename = "participantes", default)]
    pub participants: Vec<Participant>,
}

impl Show {
    /// Find a participant whose name matches `name` ignoring case.
    ///
    /// Returns the first match in stored order.
    pub fn find_participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.matches_name(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    #[serde(deserialize_with = "number::integer")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    /// `None` when the age has not been recorded yet.
    #[serde(
        rename = "idade",
        default,
        deserialize_with = "number::optional_integer"
    )]
    pub age: Option<i64>,
    #[serde(rename = "eliminado", default)]
    pub eliminated: bool,
    #[serde(rename = "total_votos", default, deserialize_with = "number::counter")]
    pub total_votes: i64,
    #[serde(rename = "premios", default)]
    #[schema(value_type = Vec<Object>)]
    pub prizes: Vec<Prize>,
}

impl Participant {
    /// A participant created by its first vote.
    pub fn from_first_vote(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age: None,
            eliminated: false,
            total_votes: 1,
            prizes: Vec::new(),
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Case-insensitive participant name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A prize won by a participant. Fields other than the value are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(rename = "valor")]
    pub value: f64,
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Prize {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, to_document};

    fn seeded_document() -> mongodb::bson::Document {
        doc! {
            "_id": mongodb::bson::oid::ObjectId::new(),
            "nome": "Ilha",
            "emissora": "Canal 5",
            "audiencia_pontos": 42,
            "participantes": [
                {
                    "id": 1_i32,
                    "nome": "Ana",
                    "idade": 27_i32,
                    "eliminado": false,
                    "total_votos": 3_i64,
                    "premios": [ { "valor": 1500.5, "descricao": "Carro" } ]
                },
                {
                    "id": 1_700_000_000_000.0_f64,
                    "nome": "Bruno",
                    "idade": 0_i32
                }
            ]
        }
    }

    #[test]
    fn decodes_seeded_bson_document() {
        let show: Show = from_document(seeded_document()).unwrap();

        assert_eq!(show.name, "Ilha");
        assert_eq!(show.broadcaster.as_deref(), Some("Canal 5"));
        assert_eq!(show.audience_points, 42.0);

        let ana = &show.participants[0];
        assert_eq!(ana.age, Some(27));
        assert_eq!(ana.total_votes, 3);
        assert_eq!(ana.prizes[0].value, 1500.5);
        assert_eq!(ana.prizes[0].details["descricao"], "Carro");

        let bruno = &show.participants[1];
        assert_eq!(bruno.id, 1_700_000_000_000);
        assert_eq!(bruno.total_votes, 0);
        assert!(!bruno.eliminated);
        assert!(bruno.prizes.is_empty());
    }

    #[test]
    fn first_vote_participant_encodes_with_null_age() {
        let doc = to_document(&Participant::from_first_vote(9, "Caio")).unwrap();
        assert_eq!(doc.get_str("nome").unwrap(), "Caio");
        assert!(doc.get("idade").unwrap().as_null().is_some());
        assert_eq!(doc.get_i64("total_votos").unwrap(), 1);
        assert!(!doc.get_bool("eliminado").unwrap());
        assert!(doc.get_array("premios").unwrap().is_empty());
    }

    #[test]
    fn prize_details_survive_json_output() {
        let prize = Prize::new(300.0).with_detail("descricao", "Viagem");
        let json = serde_json::to_value(&prize).unwrap();
        assert_eq!(json, serde_json::json!({ "valor": 300.0, "descricao": "Viagem" }));
    }

    #[test]
    fn participant_lookup_ignores_case() {
        let show = Show {
            name: "X".into(),
            broadcaster: Some("TV".into()),
            audience_points: 0.0,
            participants: vec![Participant::from_first_vote(1, "Ana")],
        };
        assert_eq!(show.find_participant("aNA").map(|p| p.name.as_str()), Some("Ana"));
        assert!(show.find_participant("Anabela").is_none());
    }
}
