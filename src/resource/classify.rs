// src/resource/classify.rs
// =============================================================================
// This module turns a raw `Content-Type` header into a coarse category.
//
// The mapping is a plain substring match, checked in priority order:
//   "image"                  -> images
//   "application" or "text"  -> documents
//   "audio" or "video"       -> media
//   anything else            -> other
//
// It is deliberately not a full MIME table. A header like
// "image/svg+xml; charset=utf-8" is an image, "text/css" is a document,
// and an empty header (server did not say) is "other".
// =============================================================================

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// The four buckets a resource can fall into.
//
// Serialized in lowercase so JSON output and the CLI use the same words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Images,
    Documents,
    Media,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Images,
        Category::Documents,
        Category::Media,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Documents => "documents",
            Category::Media => "media",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                anyhow!(
                    "unknown resource category '{}' (expected one of: images, documents, media, other)",
                    s
                )
            })
    }
}

// Maps a raw content type to its category.
//
// Matching is case-insensitive: "Image/PNG" is still an image.
pub fn classify(raw_content_type: &str) -> Category {
    let content_type = raw_content_type.to_ascii_lowercase();

    if content_type.contains("image") {
        Category::Images
    } else if content_type.contains("application") || content_type.contains("text") {
        Category::Documents
    } else if content_type.contains("audio") || content_type.contains("video") {
        Category::Media
    } else {
        Category::Other
    }
}
