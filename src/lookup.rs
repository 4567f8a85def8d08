//! Client for the remote animal facts service.
//!
//! Given a free-text species name the service returns zero or more
//! structured records (taxonomy, distribution, characteristics). The
//! client is entirely independent of the classification pipeline; the two
//! are composed at the application layer only.

use serde::Deserialize;

/// Base URL of the hosted animals API.
pub const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com/v1";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Lookup service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Scientific classification of a species. Every field is optional; the
/// service omits whatever it does not know.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    #[serde(rename = "class")]
    pub taxonomic_class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub scientific_name: Option<String>,
}

/// Free-form descriptive attributes of a species.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Characteristics {
    pub prey: Option<String>,
    pub name_of_young: Option<String>,
    pub group_behavior: Option<String>,
    pub estimated_population_size: Option<String>,
    pub biggest_threat: Option<String>,
    pub most_distinctive_feature: Option<String>,
    pub gestation_period: Option<String>,
    pub habitat: Option<String>,
    pub predators: Option<String>,
    pub diet: Option<String>,
    pub lifestyle: Option<String>,
    pub common_name: Option<String>,
    pub slogan: Option<String>,
    pub group: Option<String>,
    pub color: Option<String>,
    pub skin_type: Option<String>,
    pub top_speed: Option<String>,
    pub lifespan: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
}

/// One record returned by the lookup service.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimalRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub taxonomy: Taxonomy,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub characteristics: Characteristics,
}

/// An authenticated client for the animal facts service.
pub struct AnimalLookup {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AnimalLookup {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Searches the service for records matching `name`.
    ///
    /// An empty vector means the service knows nothing about the name;
    /// that is a result, not an error.
    pub async fn search(&self, name: &str) -> Result<Vec<AnimalRecord>, LookupError> {
        let response = self
            .client
            .get(format!("{}/animals", self.base_url))
            .query(&[("name", name)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let payload = r#"[{
            "name": "Cheetah",
            "taxonomy": {
                "kingdom": "Animalia",
                "class": "Mammalia",
                "scientific_name": "Acinonyx jubatus"
            },
            "locations": ["Africa", "Asia"],
            "characteristics": {
                "prey": "Gazelle, Wildebeest",
                "top_speed": "70 mph",
                "lifespan": "10 - 12 years"
            }
        }]"#;

        let records: Vec<AnimalRecord> = serde_json::from_str(payload).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.name.as_deref(), Some("Cheetah"));
        assert_eq!(record.taxonomy.kingdom.as_deref(), Some("Animalia"));
        assert_eq!(record.taxonomy.taxonomic_class.as_deref(), Some("Mammalia"));
        assert_eq!(
            record.taxonomy.scientific_name.as_deref(),
            Some("Acinonyx jubatus")
        );
        assert_eq!(record.locations, vec!["Africa", "Asia"]);
        assert_eq!(record.characteristics.top_speed.as_deref(), Some("70 mph"));
        // Fields the service omitted stay empty
        assert!(record.taxonomy.phylum.is_none());
        assert!(record.characteristics.diet.is_none());
    }

    #[test]
    fn test_empty_result_set_deserializes() {
        let records: Vec<AnimalRecord> = serde_json::from_str("[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let payload = r#"[{"name": "Lion", "unexpected": {"nested": true}}]"#;
        let records: Vec<AnimalRecord> = serde_json::from_str(payload).unwrap();
        assert_eq!(records[0].name.as_deref(), Some("Lion"));
    }
}
