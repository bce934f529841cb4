use crate::config::ExtractConfig;
use crate::error::{PageCleanError, Result};
use ego_tree::NodeId;
use scraper::{Html, Selector};

/// Block elements scanned by the longest-block fallback. Nested matches are
/// all candidates in their own right; a container and one of its children can
/// both compete, and ties keep the first-seen element.
const BLOCK_CANDIDATES: &str = "p, div, section, article";

/// Result of one extraction attempt. The fragment is always present; when an
/// internal error was recovered it is an HTML comment placeholder and the
/// error message is carried alongside for reporting.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub fragment: String,
    pub error: Option<String>,
}

/// Picks the main content region out of a saved page archive.
pub struct ContentExtractor {
    config: ExtractConfig,
}

impl ContentExtractor {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Extracts a best-guess content fragment from raw archive HTML.
    ///
    /// This never fails: content-shape anomalies are expected in third-party
    /// page captures, and one bad archive must not abort the whole batch. Any
    /// internal error is recovered into an HTML comment placeholder.
    pub fn extract(&self, raw_html: &str) -> ExtractedContent {
        match self.try_extract(raw_html) {
            Ok(fragment) => ExtractedContent {
                fragment,
                error: None,
            },
            Err(e) => ExtractedContent {
                fragment: format!("<!-- Error processing file: {} -->", e),
                error: Some(e.to_string()),
            },
        }
    }

    fn try_extract(&self, raw_html: &str) -> Result<String> {
        if raw_html.trim().is_empty() {
            return Ok(self.raw_prefix(raw_html));
        }

        let mut document = Html::parse_document(raw_html);

        // First match in the priority list wins; all elements matched by that
        // selector are concatenated in document order.
        for selector_str in &self.config.selectors {
            let selector = parse_selector(selector_str)?;
            let parts: Vec<String> = document.select(&selector).map(|el| el.html()).collect();
            if !parts.is_empty() {
                return Ok(parts.concat());
            }
        }

        self.strip_noise(&mut document)?;

        if let Some(fragment) = self.longest_block(&document)? {
            return Ok(fragment);
        }

        let body_selector = parse_selector("body")?;
        if let Some(body) = document.select(&body_selector).next() {
            return Ok(body.html());
        }

        Ok(self.raw_prefix(raw_html))
    }

    /// Detaches boilerplate subtrees so they neither serialize into fallback
    /// candidates nor count towards their visible text.
    fn strip_noise(&self, document: &mut Html) -> Result<()> {
        if self.config.strip_elements.is_empty() {
            return Ok(());
        }

        let selector = parse_selector(&self.config.strip_elements.join(", "))?;
        let doomed: Vec<NodeId> = document.select(&selector).map(|el| el.id()).collect();

        for id in doomed {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        Ok(())
    }

    /// Scans block candidates and returns the one with the longest serialized
    /// markup among those whose trimmed visible text exceeds the configured
    /// minimum. Strict comparison keeps the first-seen element on ties.
    fn longest_block(&self, document: &Html) -> Result<Option<String>> {
        let selector = parse_selector(BLOCK_CANDIDATES)?;

        let mut best: Option<String> = None;
        let mut max_len = 0usize;

        for element in document.select(&selector) {
            let markup = element.html();
            let markup_len = markup.chars().count();

            if markup_len <= max_len {
                continue;
            }

            let text: String = element.text().collect();
            if text.trim().chars().count() > self.config.min_text_len {
                max_len = markup_len;
                best = Some(markup);
            }
        }

        Ok(best)
    }

    fn raw_prefix(&self, raw_html: &str) -> String {
        raw_html.chars().take(self.config.raw_fallback_limit).collect()
    }
}

fn parse_selector(input: &str) -> Result<Selector> {
    Selector::parse(input).map_err(|e| PageCleanError::Selector {
        message: format!("{}: {}", input, e),
    })
}
