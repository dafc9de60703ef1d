//! Request classification by URL pattern.

use vfl_core::Request;

use crate::config::WorkerConfig;

/// Handling class for an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Backend API call: network-only, offline JSON fallback.
    Api,
    /// Remote font asset: cache-first against the font store.
    FontAsset,
    /// App shell and everything else: cache-first with background fill.
    AppShell,
}

impl std::fmt::Display for RequestClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::FontAsset => write!(f, "font"),
            Self::AppShell => write!(f, "shell"),
        }
    }
}

/// Classifies requests by hostname and path fragments.
///
/// First match wins, in the order: API, font asset, app shell. Matching is
/// substring containment, so `api_hosts: ["railway.app"]` covers any
/// subdomain deployed there.
#[derive(Debug, Clone)]
pub struct Classifier {
    api_hosts: Vec<String>,
    api_path_segment: String,
    font_hosts: Vec<String>,
}

impl Classifier {
    /// Build a classifier from worker configuration.
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self {
            api_hosts: config.api_hosts.clone(),
            api_path_segment: config.api_path_segment.clone(),
            font_hosts: config.font_hosts.clone(),
        }
    }

    /// Classify one request.
    pub fn classify(&self, request: &Request) -> RequestClass {
        let hostname = request.hostname();
        let path = request.path();

        if self.api_hosts.iter().any(|h| hostname.contains(h.as_str()))
            || path.contains(&self.api_path_segment)
        {
            return RequestClass::Api;
        }

        if self.font_hosts.iter().any(|h| hostname.contains(h.as_str())) {
            return RequestClass::FontAsset;
        }

        RequestClass::AppShell
    }
}
