// src/resource/mod.rs
// =============================================================================
// This module contains everything that deals with a single embedded resource.
//
// Submodules:
// - links: finds resource references in raw page markup
// - resolve: turns references into absolute, validated URLs
// - probe: asks the server how big a resource is (HEAD request)
// - classify: maps a Content-Type to images / documents / media / other
// =============================================================================

mod classify;
mod links;
mod probe;
mod resolve;

pub use classify::{classify, Category};
pub use links::extract_resource_links;
pub use probe::{HttpClient, ProbeConfig, ProbeResult, ResourceClient};
pub use resolve::{resolve, PageContext, ResolvedResource};
