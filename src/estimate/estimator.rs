// src/estimate/estimator.rs
// =============================================================================
// This module drives a whole estimation run.
//
// How it works:
// 1. Check the target URL and derive scheme/host from it
// 2. Download the page (its own size counts toward the total)
// 3. Extract resource references and resolve them to absolute URLs
// 4. Probe each resource (optionally several at once)
// 5. Keep resources that have a known size and match the filter
// 6. Return a report with the totals
//
// Only two things stop a run: an empty URL and a page that cannot be
// fetched. Everything that goes wrong with a single resource just leaves
// that resource out.
// =============================================================================

use crate::estimate::report::{AggregationState, Report, ResourceEntry};
use crate::resource::{
    classify, extract_resource_links, resolve, Category, PageContext, ProbeResult,
    ResolvedResource, ResourceClient,
};
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info};

// The two ways a run can fail. The messages are shown to the user as-is.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Please specify the URL.")]
    MissingUrl,

    #[error("This site can't be reached.")]
    Unreachable { url: String, reason: String },
}

// What to estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationRequest {
    pub target_url: String,
    /// Only count resources of this category; None counts everything
    pub category_filter: Option<Category>,
}

impl EstimationRequest {
    pub fn new(target_url: impl Into<String>, category_filter: Option<Category>) -> Self {
        Self {
            target_url: target_url.into(),
            category_filter,
        }
    }
}

pub struct Estimator<C> {
    client: C,
    concurrency: usize,
}

impl<C: ResourceClient> Estimator<C> {
    // Probes one resource at a time by default.
    pub fn new(client: C) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    // Number of probes in flight at once (at least 1).
    //
    // Results are still consumed in discovery order, so the report does not
    // depend on which probe finishes first.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self, request: &EstimationRequest) -> Result<Report, EstimateError> {
        self.run_with(request, |_| {}).await
    }

    // Like `run`, but hands every counted resource to `on_entry` as soon as
    // it is counted, in discovery order.
    pub async fn run_with<F>(
        &self,
        request: &EstimationRequest,
        mut on_entry: F,
    ) -> Result<Report, EstimateError>
    where
        F: FnMut(&ResourceEntry),
    {
        let target_url = request.target_url.trim();
        if target_url.is_empty() {
            return Err(EstimateError::MissingUrl);
        }

        let context = PageContext::from_url(target_url).map_err(|e| EstimateError::Unreachable {
            url: target_url.to_string(),
            reason: e.to_string(),
        })?;

        info!(url = target_url, "fetching page");
        let page = self
            .client
            .fetch_page(target_url)
            .await
            .map_err(|e| EstimateError::Unreachable {
                url: target_url.to_string(),
                reason: e.to_string(),
            })?;

        let root_size_bytes = page.len() as u64;
        let markup = String::from_utf8_lossy(&page);
        let filter = request.category_filter;

        let references = extract_resource_links(&markup).filter_map(|reference| {
            let resolved = resolve(reference, &context);
            if resolved.is_none() {
                debug!(reference, "skipping invalid reference");
            }
            resolved
        });

        let client = &self.client;
        let mut probes = stream::iter(references)
            .map(|resource| async move {
                let probe = client
                    .probe(&resource.absolute_url, filter.is_some())
                    .await;
                (resource, probe)
            })
            .buffered(self.concurrency);

        let mut totals = AggregationState::seeded(root_size_bytes);
        let mut resources = Vec::new();

        while let Some((resource, probe)) = probes.next().await {
            if let Some(entry) = admit(resource, &probe, filter) {
                totals = totals.record(entry.size_bytes);
                on_entry(&entry);
                resources.push(entry);
            }
        }

        info!(
            url = target_url,
            total_size_bytes = totals.total_size_bytes,
            matched = totals.matched_resource_count,
            "estimation finished"
        );

        Ok(Report {
            url: target_url.to_string(),
            filter,
            root_size_bytes,
            resources,
            totals,
        })
    }
}

// Decides whether a probed resource counts toward the total.
fn admit(
    resource: ResolvedResource,
    probe: &ProbeResult,
    filter: Option<Category>,
) -> Option<ResourceEntry> {
    let Some(size_bytes) = probe.size_bytes else {
        debug!(url = %resource.absolute_url, "size unknown, not counted");
        return None;
    };

    let category = match filter {
        Some(wanted) => {
            let category = classify(&probe.content_type);
            if category != wanted {
                debug!(url = %resource.absolute_url, %category, "filtered out");
                return None;
            }
            Some(category)
        }
        None => None,
    };

    Some(ResourceEntry {
        url: resource.absolute_url,
        size_bytes,
        category,
    })
}
