//! Asset declarations.
//!
//! A [`Media`] lists the stylesheets and scripts a page must load before the
//! picker scripts run. Nothing here fetches anything; the hosting page
//! decides where and how to emit the tags.

use std::collections::BTreeMap;
use std::fmt;

use crate::attrs::escape_html;

/// Tempus Dominus release the CDN URLs point at.
pub const TEMPUS_DOMINUS_VERSION: &str = "6.7.11";
/// Popper release the CDN URLs point at.
pub const POPPER_VERSION: &str = "2.11.6";

pub const TEMPUS_DOMINUS_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/@eonasdan/tempus-dominus@6.7.11/dist/css/tempus-dominus.min.css";
pub const POPPER_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/@popperjs/core@2.11.6/dist/umd/popper.min.js";
pub const TEMPUS_DOMINUS_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/@eonasdan/tempus-dominus@6.7.11/dist/js/tempus-dominus.min.js";

/// Stylesheets grouped by media type, plus scripts in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    css: BTreeMap<String, Vec<String>>,
    js: Vec<String>,
}

impl Media {
    /// Creates an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Tempus Dominus stylesheet and the Popper and Tempus Dominus
    /// scripts, served from jsDelivr.
    pub fn cdn() -> Self {
        let mut media = Self::new();
        media.add_css("all", TEMPUS_DOMINUS_CSS_URL);
        media.add_js(POPPER_JS_URL);
        media.add_js(TEMPUS_DOMINUS_JS_URL);
        media
    }

    /// Adds a stylesheet for `medium` unless it is already listed.
    pub fn add_css(&mut self, medium: impl Into<String>, url: impl Into<String>) {
        let url = url.into();
        let urls = self.css.entry(medium.into()).or_default();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    /// Appends a script unless it is already listed.
    pub fn add_js(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !self.js.contains(&url) {
            self.js.push(url);
        }
    }

    pub const fn css(&self) -> &BTreeMap<String, Vec<String>> {
        &self.css
    }

    pub fn js(&self) -> &[String] {
        &self.js
    }

    pub fn is_empty(&self) -> bool {
        self.js.is_empty() && self.css.values().all(Vec::is_empty)
    }

    /// Combines two declarations, keeping first-seen order and dropping
    /// duplicates. A form with several pickers uses this to load the
    /// library once.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (medium, urls) in &other.css {
            for url in urls {
                merged.add_css(medium.clone(), url.clone());
            }
        }
        for url in &other.js {
            merged.add_js(url.clone());
        }
        merged
    }

    /// `<link>` tags, one per line.
    pub fn render_css(&self) -> String {
        self.css
            .iter()
            .flat_map(|(medium, urls)| {
                urls.iter().map(move |url| {
                    format!(
                        r#"<link href="{}" media="{}" rel="stylesheet">"#,
                        escape_html(url),
                        escape_html(medium)
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `<script>` tags, one per line.
    pub fn render_js(&self) -> String {
        self.js
            .iter()
            .map(|url| format!(r#"<script src="{}"></script>"#, escape_html(url)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Stylesheets followed by scripts.
    pub fn render(&self) -> String {
        [self.render_css(), self.render_js()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_media() {
        let media = Media::cdn();
        assert_eq!(media.css()["all"], vec![TEMPUS_DOMINUS_CSS_URL.to_string()]);
        assert_eq!(media.js(), [POPPER_JS_URL, TEMPUS_DOMINUS_JS_URL]);
        assert!(TEMPUS_DOMINUS_JS_URL.contains(TEMPUS_DOMINUS_VERSION));
        assert!(POPPER_JS_URL.contains(POPPER_VERSION));
    }

    #[test]
    fn test_empty_media_renders_nothing() {
        let media = Media::new();
        assert!(media.is_empty());
        assert_eq!(media.render(), "");
    }

    #[test]
    fn test_render_order() {
        let rendered = Media::cdn().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("<link href=\"https://cdn.jsdelivr.net"));
        assert!(lines[0].ends_with(r#"media="all" rel="stylesheet">"#));
        assert!(lines[1].contains("popper.min.js"));
        assert!(lines[2].contains("tempus-dominus.min.js"));
    }

    #[test]
    fn test_merge_deduplicates() {
        let mut extra = Media::new();
        extra.add_js("/static/app.js");
        extra.add_js(TEMPUS_DOMINUS_JS_URL);
        extra.add_css("print", "/static/print.css");

        let merged = Media::cdn().merge(&Media::cdn()).merge(&extra);
        assert_eq!(
            merged.js(),
            [POPPER_JS_URL, TEMPUS_DOMINUS_JS_URL, "/static/app.js"]
        );
        assert_eq!(merged.css().len(), 2);
        assert_eq!(merged.css()["all"].len(), 1);
    }

    #[test]
    fn test_render_escapes_urls() {
        let mut media = Media::new();
        media.add_js(r#"/static/x.js?a=1&b="2""#);
        assert_eq!(
            media.render_js(),
            r#"<script src="/static/x.js?a=1&amp;b=&quot;2&quot;"></script>"#
        );
    }
}
