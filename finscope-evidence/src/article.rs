//! Article reader: fetch a result page and pull out its readable text.
//!
//! Sits beside the retrieval pipeline rather than inside it. Callers use it
//! to read a source in full after the evidence run has pointed them at it,
//! so its errors are returned instead of absorbed.

use crate::config::EvidenceConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::ArticleContent;
use scraper::{Html, Selector};

/// Default maximum bytes of article text to return.
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Elements removed with their content before text extraction.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript", "svg", "iframe",
];

/// Content roots tried in order; the first with any text wins.
const CONTENT_ROOTS: &[&str] = &["article", "main", "[role=\"main\"]", "body"];

/// Download `url` and extract its readable text.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the page cannot be fetched, or
/// [`SearchError::Parse`] if no readable text is found.
pub async fn fetch_article(
    url: &str,
    config: &EvidenceConfig,
    max_chars: usize,
) -> Result<ArticleContent> {
    tracing::trace!(url, "fetching article");
    let client = http::build_client(config)?;

    let html = client
        .get(url)
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("article request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("article host returned {e}")))?
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("article read failed: {e}")))?;

    let article = extract_article(&html, url, max_chars)?;
    tracing::debug!(url, words = article.word_count, "article extracted");
    Ok(article)
}

/// Extract readable text from raw article HTML.
///
/// Strips boilerplate elements, picks the main content root, collapses
/// whitespace and truncates to `max_chars` on a char boundary.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if no readable text remains.
pub fn extract_article(html: &str, url: &str, max_chars: usize) -> Result<ArticleContent> {
    let cleaned = BOILERPLATE_TAGS
        .iter()
        .fold(html.to_owned(), |acc, tag| strip_tag(&acc, tag));
    let document = Html::parse_document(&cleaned);

    let title = extract_title(&document);
    let text = collapse_whitespace(&extract_main_text(&document));
    if text.is_empty() {
        return Err(SearchError::Parse("no extractable content found".into()));
    }

    let text = truncate_to_limit(&text, max_chars);
    let word_count = text.split_whitespace().count();

    Ok(ArticleContent {
        url: url.to_owned(),
        title,
        text,
        word_count,
    })
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}

fn extract_main_text(document: &Html) -> String {
    for root in CONTENT_ROOTS {
        let Ok(selector) = Selector::parse(root) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<Vec<_>>().join(" ");
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_owned();
            }
        }
    }
    String::new()
}

/// Remove every `<tag …>…</tag>` span, matching the tag name exactly.
fn strip_tag(html: &str, tag: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    while let Some(offset) = lower[pos..].find(&open) {
        let start = pos + offset;
        let after = start + open.len();
        let is_exact = lower
            .as_bytes()
            .get(after)
            .map_or(true, |b| matches!(b, b' ' | b'>' | b'/' | b'\n' | b'\r' | b'\t'));
        if !is_exact {
            out.push_str(&html[pos..after]);
            pos = after;
            continue;
        }

        out.push_str(&html[pos..start]);
        pos = match lower[start..].find(&close) {
            Some(offset) => start + offset + close.len(),
            None => lower[start..]
                .find('>')
                .map_or(html.len(), |offset| start + offset + 1),
        };
    }
    out.push_str(&html[pos..]);
    out
}

/// Runs of spaces become one space; runs of 3+ newlines become two.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    let mut newlines: u32 = 0;

    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            newlines += 1;
            prev_space = false;
            if newlines <= 2 {
                out.push('\n');
            }
        } else if ch.is_whitespace() {
            newlines = 0;
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            newlines = 0;
            prev_space = false;
            out.push(ch);
        }
    }

    out.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn truncate_to_limit(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text.to_owned();
    }
    let mut end = max_chars;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = text[..end].to_owned();
    truncated.push_str("\n\n[Content truncated]");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const URL: &str = "https://www.livemint.com/economy/repo-rate";

    fn extract(html: &str) -> Result<ArticleContent> {
        extract_article(html, URL, DEFAULT_MAX_CHARS)
    }

    #[test]
    fn title_and_article_body_extracted() {
        let html = r#"<html><head><title>RBI holds repo rate</title></head><body>
            <nav>Markets | Economy | Opinion</nav>
            <article>The central bank kept the repo rate at 6.5 per cent.</article>
            <footer>Copyright</footer>
        </body></html>"#;
        let article = extract(html).expect("should extract");
        assert_eq!(article.title, "RBI holds repo rate");
        assert!(article.text.contains("6.5 per cent"));
        assert!(!article.text.contains("Markets | Economy"));
        assert!(!article.text.contains("Copyright"));
        assert_eq!(article.url, URL);
    }

    #[test]
    fn main_preferred_over_body() {
        let html = "<html><body><div>Outer</div><main>Main analysis</main></body></html>";
        let article = extract(html).expect("should extract");
        assert_eq!(article.text, "Main analysis");
    }

    #[test]
    fn falls_back_to_body() {
        let article = extract("<html><body>Body only text</body></html>").expect("should extract");
        assert!(article.text.contains("Body only text"));
        assert!(article.title.is_empty());
    }

    #[test]
    fn scripts_and_styles_removed() {
        let html = r#"<html><body>
            <p>Bond yields fell</p>
            <script>track('pageview');</script>
            <style>.x { color: red; }</style>
        </body></html>"#;
        let article = extract(html).expect("should extract");
        assert!(article.text.contains("Bond yields fell"));
        assert!(!article.text.contains("pageview"));
        assert!(!article.text.contains("color: red"));
    }

    #[test]
    fn nav_not_confused_with_similar_tags() {
        let html = "<html><body><nav>Skip</nav><p>Keep navigate text</p></body></html>";
        let article = extract(html).expect("should extract");
        assert!(!article.text.contains("Skip"));
        assert!(article.text.contains("navigate text"));
    }

    #[test]
    fn whitespace_collapsed_and_words_counted() {
        let html = "<html><body>One    two\n\n\n\n\nthree four five</body></html>";
        let article = extract(html).expect("should extract");
        assert!(!article.text.contains("  "));
        assert!(!article.text.contains("\n\n\n"));
        assert_eq!(article.word_count, 5);
    }

    #[test]
    fn long_text_truncated_with_marker() {
        let html = format!("<html><body>{}</body></html>", "crore ".repeat(1000));
        let article = extract_article(&html, URL, 100).expect("should extract");
        assert!(article.text.contains("[Content truncated]"));
        assert!(article.text.len() <= 125);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let html = format!("<html><body>{}</body></html>", "₹".repeat(200));
        let article = extract_article(&html, URL, 50).expect("should extract");
        assert!(article.text.ends_with("[Content truncated]"));
    }

    #[test]
    fn empty_page_is_parse_error() {
        let err = extract("").unwrap_err();
        assert!(err.to_string().contains("no extractable content"));
    }

    #[test]
    fn scripts_only_page_is_parse_error() {
        let html = "<html><head><style>b{}</style></head><body><script>x()</script></body></html>";
        assert!(matches!(extract(html), Err(SearchError::Parse(_))));
    }

    fn test_config() -> EvidenceConfig {
        EvidenceConfig {
            user_agent: Some("finscope-test/1.0".into()),
            provider_timeout_seconds: 5,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fetch_article_downloads_and_extracts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets/gold"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Gold rally</title></head><body><article>Gold hit a record.</article></body></html>",
            ))
            .mount(&server)
            .await;

        let url = format!("{}/markets/gold", server.uri());
        let article = fetch_article(&url, &test_config(), DEFAULT_MAX_CHARS)
            .await
            .expect("fetch should succeed");
        assert_eq!(article.title, "Gold rally");
        assert_eq!(article.text, "Gold hit a record.");
        assert_eq!(article.url, url);
    }

    #[tokio::test]
    async fn fetch_article_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetch_article(&url, &test_config(), DEFAULT_MAX_CHARS)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
    }
}
