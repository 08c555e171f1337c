use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::CatalogSettings;

use super::error::CatalogError;
use super::model::TrackDescriptor;

/// Anything that can answer a free-text track search.
///
/// Implementations keep no per-query state: every call is independent and
/// nothing is retried.
pub trait Catalog: Send {
    fn search(&self, term: &str) -> Result<Vec<TrackDescriptor>, CatalogError>;
}

/// iTunes Search API client.
pub struct ItunesCatalog {
    client: Client,
    base_url: String,
    entity: String,
    limit: usize,
    country: Option<String>,
}

impl ItunesCatalog {
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            entity: settings.entity.clone(),
            limit: settings.limit,
            country: settings.country.clone(),
        })
    }
}

impl Catalog for ItunesCatalog {
    fn search(&self, term: &str) -> Result<Vec<TrackDescriptor>, CatalogError> {
        // `reqwest` handles the URL encoding of the term.
        let mut params: Vec<(&str, String)> = vec![
            ("term", term.to_string()),
            ("media", "music".to_string()),
            ("entity", self.entity.clone()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(country) = &self.country {
            params.push(("country", country.clone()));
        }

        info!(term, "searching catalog");
        let response = self.client.get(&self.base_url).query(&params).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Network(format!("HTTP {status}")));
        }

        let body = response.text()?;
        let hits = parse_search_response(&body, self.limit)?;
        debug!(term, count = hits.len(), "catalog search finished");
        Ok(hits)
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    results: Vec<SearchRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchRecord {
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName")]
    artist_name: Option<String>,
    #[serde(rename = "previewUrl")]
    preview_url: Option<String>,
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
}

impl From<SearchRecord> for TrackDescriptor {
    fn from(r: SearchRecord) -> Self {
        Self::new(
            r.track_name.unwrap_or_default(),
            r.artist_name.unwrap_or_default(),
            r.preview_url.unwrap_or_default(),
            r.artwork_url_100.unwrap_or_default(),
        )
    }
}

/// Parse a search response body into at most `cap` tracks, in provider order.
///
/// Records without a preview are kept; they simply fail to play later.
pub fn parse_search_response(body: &str, cap: usize) -> Result<Vec<TrackDescriptor>, CatalogError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .results
        .into_iter()
        .take(cap)
        .map(TrackDescriptor::from)
        .collect())
}
