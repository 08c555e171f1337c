//! Background searches.
//!
//! Each submitted request runs on its own short-lived thread so a slow query
//! never blocks a newer one; responses come back over a channel in whatever
//! order they finish.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{error, warn};

use super::client::Catalog;
use super::error::CatalogError;
use super::model::TrackDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Issue order, assigned by the caller.
    pub seq: u64,
    pub term: String,
}

#[derive(Debug)]
pub struct SearchResponse {
    pub seq: u64,
    pub term: String,
    pub outcome: Result<Vec<TrackDescriptor>, CatalogError>,
}

pub struct SearchWorker {
    catalog: Arc<dyn Catalog + Sync>,
    responses: Sender<SearchResponse>,
}

impl SearchWorker {
    pub fn new(catalog: Arc<dyn Catalog + Sync>, responses: Sender<SearchResponse>) -> Self {
        Self { catalog, responses }
    }

    /// Start `request` in the background. Returns immediately.
    pub fn submit(&self, request: SearchRequest) {
        let catalog = Arc::clone(&self.catalog);
        let responses = self.responses.clone();
        let seq = request.seq;

        let spawned = thread::Builder::new()
            .name(format!("encore-search-{seq}"))
            .spawn(move || {
                let outcome = catalog.search(&request.term);
                if let Err(e) = &outcome {
                    warn!(seq, term = %request.term, error = %e, "search failed");
                }
                // The receiver is gone only during shutdown.
                let _ = responses.send(SearchResponse {
                    seq,
                    term: request.term,
                    outcome,
                });
            });

        if let Err(e) = spawned {
            error!(seq, error = %e, "could not start search thread");
            let _ = self.responses.send(SearchResponse {
                seq,
                term: String::new(),
                outcome: Err(CatalogError::Network(e.to_string())),
            });
        }
    }
}
