// src/resource/links.rs
// =============================================================================
// This module pulls embedded resource references out of raw page markup.
//
// It is a textual scan, not an HTML parser. Two pattern families run over
// the same text, one after the other:
// 1. `href` values of `<link ...>` tags (stylesheets, icons, preloads)
// 2. any `src="..."` / `src='...'` attribute (img, script, video, iframe...)
//
// Matches from both families are chained, so a reference that matches both
// comes out twice. Nothing is de-duplicated here: the estimate counts every
// occurrence. Entities are not decoded, comments are not skipped.
//
// Rust concepts:
// - Iterators: references are produced lazily while the caller consumes them
// - OnceLock: compile each regex once and reuse it for every page
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

// `<link ... href="...">`, case-insensitive, self-closing or not.
// The capture stops at the first closing quote so two tags on one line stay
// separate. `href` must follow whitespace or a quote, so `data-href` is not it.
const LINK_HREF_PATTERN: &str = r#"(?i)<link\b[^>]*?[\s"']href\s*=\s*"([^"]*)"[^>]*>"#;

// `src = "..."` or `src='...'` on any tag.
const SRC_PATTERN: &str = r#"(?i)src\s*=\s*['"]([^'"]+)['"]"#;

fn link_href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant, so failing here is a programmer error
    RE.get_or_init(|| Regex::new(LINK_HREF_PATTERN).expect("link href pattern is valid"))
}

fn src_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SRC_PATTERN).expect("src pattern is valid"))
}

// Extracts raw resource references from a page, in scan order.
//
// Parameters:
//   page: the raw markup of the page (borrowed, references point into it)
//
// Returns: a lazy iterator of non-empty, as-found reference strings
//
// Example:
//   page = r#"<link href="/a.css"><img src="b.png">"#
//   result yields "/a.css", then "b.png"
pub fn extract_resource_links(page: &str) -> impl Iterator<Item = &str> + '_ {
    let link_hrefs = link_href_regex()
        .captures_iter(page)
        .filter_map(|caps| caps.get(1));

    let sources = src_regex()
        .captures_iter(page)
        .filter_map(|caps| caps.get(1));

    link_hrefs
        .chain(sources)
        .map(|capture| capture.as_str())
        .filter(|reference| !reference.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(page: &str) -> Vec<&str> {
        extract_resource_links(page).collect()
    }

    #[test]
    fn test_link_then_src_on_one_line() {
        let page = r#"<html><link href="/style.css"/><img src="pic.png"></html>"#;
        assert_eq!(collect(page), vec!["/style.css", "pic.png"]);
    }

    #[test]
    fn test_link_tag_case_insensitive() {
        let page = r#"<LINK REL="stylesheet" HREF="main.css">"#;
        assert_eq!(collect(page), vec!["main.css"]);
    }

    #[test]
    fn test_link_href_after_other_attributes() {
        let page = r#"<link rel="icon" type="image/png" href="/favicon.png" />"#;
        assert_eq!(collect(page), vec!["/favicon.png"]);
    }

    #[test]
    fn test_data_href_is_not_an_href() {
        let page = r#"<link rel="preload" data-href="/lazy.css" href="/real.css">"#;
        assert_eq!(collect(page), vec!["/real.css"]);

        let page = r#"<link data-href="/lazy.css">"#;
        assert!(collect(page).is_empty());
    }

    #[test]
    fn test_src_single_and_double_quotes() {
        let page = r#"<script src='app.js'></script><img SRC = "logo.svg">"#;
        assert_eq!(collect(page), vec!["app.js", "logo.svg"]);
    }

    #[test]
    fn test_link_family_comes_first() {
        let page = r#"<img src="a.png"><link href="b.css"><img src="c.png">"#;
        assert_eq!(collect(page), vec!["b.css", "a.png", "c.png"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let page = r#"<img src="a.png"><img src="a.png">"#;
        assert_eq!(collect(page), vec!["a.png", "a.png"]);
    }

    #[test]
    fn test_empty_references_are_dropped() {
        let page = r#"<link href=""><img src="">"#;
        assert!(collect(page).is_empty());
    }

    #[test]
    fn test_anchor_links_are_ignored() {
        let page = r#"<a href="/other-page">Other</a>"#;
        assert!(collect(page).is_empty());
    }

    #[test]
    fn test_multiline_page() {
        let page = "<head>\n  <link rel=\"stylesheet\" href=\"/css/site.css\">\n</head>\n\
                    <body>\n  <video src=\"/media/intro.mp4\"></video>\n</body>";
        assert_eq!(collect(page), vec!["/css/site.css", "/media/intro.mp4"]);
    }
}
