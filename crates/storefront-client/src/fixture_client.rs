//! In-memory backend serving canned responses
//!
//! Used by the tests and by the REPL binary. Search responses are keyed by
//! query text (the empty string stands for "no query"), refinement responses
//! by navigation name and autocomplete responses by the partial query.

use crate::client::{AutocompleteClient, SearchBridge};
use crate::error::ClientError;
use crate::types::{
    AutocompleteRequest, AutocompleteResponse, RefinementsResponse, SearchRequest, SearchResponse,
};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// On-disk representation of a fixture set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureFile {
    pub searches: HashMap<String, SearchResponse>,
    pub fallback: Option<SearchResponse>,
    pub refinements: HashMap<String, RefinementsResponse>,
    pub suggestions: HashMap<String, AutocompleteResponse>,
}

#[derive(Debug, Default)]
struct Fixtures {
    file: FixtureFile,
    delays: HashMap<String, Duration>,
    failures: HashSet<String>,
    requests: Vec<SearchRequest>,
}

/// Canned-response client implementing every backend trait
///
/// Cloning is cheap and clones share the same fixtures and request log.
#[derive(Debug, Clone, Default)]
pub struct FixtureClient {
    inner: Arc<Mutex<Fixtures>>,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a client from an already parsed fixture set
    pub fn from_fixtures(file: FixtureFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Fixtures {
                file,
                ..Fixtures::default()
            })),
        }
    }

    /// Load fixtures from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file {}", path.display()))?;
        let file: FixtureFile = serde_json::from_str(&content).map_err(ClientError::from)?;
        debug!(
            "Loaded {} search fixtures from {}",
            file.searches.len(),
            path.display()
        );
        Ok(Self::from_fixtures(file))
    }

    /// Register the response for a query
    pub fn with_search(self, query: impl Into<String>, response: SearchResponse) -> Self {
        self.lock().file.searches.insert(query.into(), response);
        self
    }

    /// Response used when no query-specific fixture exists
    pub fn with_fallback(self, response: SearchResponse) -> Self {
        self.lock().file.fallback = Some(response);
        self
    }

    /// Register the refinements response for a navigation
    pub fn with_refinements(
        self,
        navigation_name: impl Into<String>,
        response: RefinementsResponse,
    ) -> Self {
        self.lock()
            .file
            .refinements
            .insert(navigation_name.into(), response);
        self
    }

    /// Register the autocomplete response for a partial query
    pub fn with_suggestions(self, query: impl Into<String>, response: AutocompleteResponse) -> Self {
        self.lock().file.suggestions.insert(query.into(), response);
        self
    }

    /// Delay every response for `key` (a query or navigation name)
    pub fn with_delay(self, key: impl Into<String>, delay: Duration) -> Self {
        self.lock().delays.insert(key.into(), delay);
        self
    }

    /// Make every call for `key` fail
    pub fn failing(self, key: impl Into<String>) -> Self {
        self.lock().failures.insert(key.into());
        self
    }

    /// All search requests received so far, in arrival order
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Fixtures> {
        // a poisoned lock only means another test thread panicked mid-insert
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Check injected failures and delays for `key`
    async fn prepare(&self, key: &str) -> Result<(), ClientError> {
        let (delay, failing) = {
            let fixtures = self.lock();
            (
                fixtures.delays.get(key).copied(),
                fixtures.failures.contains(key),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(ClientError::Injected(key.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchBridge for FixtureClient {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        let key = request.query.clone().unwrap_or_default();
        self.lock().requests.push(request.clone());
        self.prepare(&key).await?;

        let fixtures = self.lock();
        let response = fixtures
            .file
            .searches
            .get(&key)
            .or(fixtures.file.fallback.as_ref())
            .cloned()
            .ok_or(ClientError::MissingFixture {
                kind: "search",
                key,
            })?;
        Ok(response)
    }

    async fn refinements(
        &self,
        request: &SearchRequest,
        navigation_name: &str,
    ) -> anyhow::Result<RefinementsResponse> {
        self.lock().requests.push(request.clone());
        self.prepare(navigation_name).await?;

        let response = self
            .lock()
            .file
            .refinements
            .get(navigation_name)
            .cloned()
            .ok_or_else(|| ClientError::MissingFixture {
                kind: "refinements",
                key: navigation_name.to_string(),
            })?;
        Ok(response)
    }
}

#[async_trait]
impl AutocompleteClient for FixtureClient {
    async fn suggestions(
        &self,
        request: &AutocompleteRequest,
    ) -> anyhow::Result<AutocompleteResponse> {
        self.prepare(&request.query).await?;

        // unknown partial queries simply have no suggestions
        Ok(self
            .lock()
            .file
            .suggestions
            .get(&request.query)
            .cloned()
            .unwrap_or_default())
    }
}
