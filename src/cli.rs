// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage: page-weight <URL> [CATEGORY] [--json] [--concurrency N] [--timeout S]
//
// Both positionals are optional as far as clap is concerned: a missing URL
// is reported by the estimator itself with its own message, and an empty
// category means "count everything".
// =============================================================================

use crate::estimate::EstimationRequest;
use crate::resource::Category;
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "page-weight",
    version = "0.1.0",
    about = "Estimate the total size of a web page and the resources it embeds",
    long_about = "page-weight downloads one page, finds the stylesheets, scripts, images and media \
                  it references, asks each server for their size and adds everything up. \
                  Linked pages are never followed."
)]
pub struct Cli {
    /// Page to estimate (e.g., https://example.com)
    pub url: Option<String>,

    /// Only count resources of one kind: images, documents, media or other
    ///
    /// Leave it out (or pass "") to count every resource.
    pub category: Option<String>,

    /// Output the report as JSON instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// How many resources to probe at the same time
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Log skipped resources and probe failures to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn target_url(&self) -> String {
        self.url.clone().unwrap_or_default()
    }

    // Parses the category argument. An empty value means no filter.
    pub fn category_filter(&self) -> Result<Option<Category>> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => Ok(Some(name.parse()?)),
        }
    }

    // Builds the estimation request.
    //
    // A missing URL wins over a bad category: the category is not looked at
    // until there is a URL, so the estimator can report the missing URL.
    pub fn request(&self) -> Result<EstimationRequest> {
        let target_url = self.target_url();
        let category_filter = if target_url.trim().is_empty() {
            None
        } else {
            self.category_filter()?
        };

        Ok(EstimationRequest::new(target_url, category_filter))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
