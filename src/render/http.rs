// src/render/http.rs
// =============================================================================
// The default renderer: fetch a page with reqwest, query it with scraper.
//
// It does not run JavaScript, but it reports anchors the way a browser's
// `anchor.href` property does:
// - relative hrefs are resolved against the page's final URL (after
//   redirects), or against <base href> when the page declares one
// - an anchor with no href attribute gives None
// - an href that cannot be resolved is returned as written
//
// Like a browser, an error status (404, 500, ...) still renders: its HTML is
// loaded and its links are read. A response counts as "not renderable"
// (NavigationError) only when the content type is present and is not HTML,
// or when the request itself fails (connection, timeout, redirect loop).
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::PageRenderer;
use crate::config::CrawlConfig;
use crate::error::CrawlError;

// The page currently "open" in the renderer
#[derive(Debug)]
struct LoadedPage {
    url: Url,
    html: String,
}

pub struct HttpRenderer {
    client: Client,
    page: Option<LoadedPage>,
}

impl HttpRenderer {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("site-walker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CrawlError::Renderer(format!("HTTP client: {}", e)))?;

        Ok(Self { client, page: None })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
        // Leaving the old page first: a failed navigation leaves nothing loaded
        self.page = None;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::navigation(url, describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "page answered with an error status");
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(CrawlError::navigation(
                    url,
                    format!("not an HTML document (content-type: {})", content_type),
                ));
            }
        }

        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| CrawlError::navigation(url, describe_request_error(&e)))?;

        debug!(url, final_url = %final_url, status = status.as_u16(), bytes = html.len(), "page loaded");
        self.page = Some(LoadedPage { url: final_url, html });
        Ok(())
    }

    async fn query_anchor_hrefs(&mut self) -> Result<Vec<Option<String>>, CrawlError> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| CrawlError::scrape("about:blank", "no page is loaded"))?;

        extract_anchor_hrefs(&page.html, &page.url)
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        // Nothing to shut down besides dropping the page; the client's
        // connection pool goes away with the renderer
        self.page = None;
        Ok(())
    }
}

// Reads the href of every <a> in document order, resolved like `anchor.href`
fn extract_anchor_hrefs(html: &str, page_url: &Url) -> Result<Vec<Option<String>>, CrawlError> {
    let document = Html::parse_document(html);

    let anchors = Selector::parse("a")
        .map_err(|e| CrawlError::scrape(page_url.as_str(), format!("bad selector: {:?}", e)))?;
    let base_tags = Selector::parse("base[href]")
        .map_err(|e| CrawlError::scrape(page_url.as_str(), format!("bad selector: {:?}", e)))?;

    // Only the first <base href> counts, and only if it resolves
    let base = document
        .select(&base_tags)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href).ok())
        .unwrap_or_else(|| page_url.clone());

    let hrefs = document
        .select(&anchors)
        .map(|element| {
            element
                .value()
                .attr("href")
                .map(|href| resolve_href(&base, href))
        })
        .collect();

    Ok(hrefs)
}

// Resolves an href against the document base
//
// Examples (base = "https://site.example/docs/"):
//   "intro"                 -> "https://site.example/docs/intro"
//   "/about"                -> "https://site.example/about"
//   "#top"                  -> "https://site.example/docs/#top"
//   "mailto:a@site.example" -> "mailto:a@site.example"
fn resolve_href(base: &Url, href: &str) -> String {
    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

// Turns reqwest's error into a short reason for the log
fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed ({})", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn renderer() -> HttpRenderer {
        let config = CrawlConfig::new("https://site.example", None)
            .unwrap()
            .with_timeout_secs(5);
        HttpRenderer::new(&config).unwrap()
    }

    #[test]
    fn test_extract_absolute_and_relative() {
        let html = r#"
            <a href="https://www.rust-lang.org/">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
        "#;
        let hrefs = extract_anchor_hrefs(html, &page_url("https://site.example/page/sub")).unwrap();
        assert_eq!(
            hrefs,
            vec![
                Some("https://www.rust-lang.org/".to_string()),
                Some("https://site.example/docs".to_string()),
                Some("https://site.example/about".to_string()),
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_is_none() {
        let html = r#"<a name="top">Top</a><a href="/x">X</a>"#;
        let hrefs = extract_anchor_hrefs(html, &page_url("https://site.example/")).unwrap();
        assert_eq!(hrefs, vec![None, Some("https://site.example/x".to_string())]);
    }

    #[test]
    fn test_duplicates_and_fragments_kept() {
        let html = r##"<a href="/x">1</a><a href="/x">2</a><a href="#part">3</a>"##;
        let hrefs = extract_anchor_hrefs(html, &page_url("https://site.example/a")).unwrap();
        assert_eq!(
            hrefs,
            vec![
                Some("https://site.example/x".to_string()),
                Some("https://site.example/x".to_string()),
                Some("https://site.example/a#part".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_tag_is_honored() {
        let html = r#"
            <html><head><base href="https://cdn.site.example/root/"></head>
            <body><a href="page">P</a></body></html>
        "#;
        let hrefs = extract_anchor_hrefs(html, &page_url("https://site.example/a")).unwrap();
        assert_eq!(hrefs, vec![Some("https://cdn.site.example/root/page".to_string())]);
    }

    #[test]
    fn test_non_http_schemes_pass_through() {
        let html = r#"<a href="mailto:hi@site.example">Mail</a>"#;
        let hrefs = extract_anchor_hrefs(html, &page_url("https://site.example/")).unwrap();
        assert_eq!(hrefs, vec![Some("mailto:hi@site.example".to_string())]);
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Application/XHTML+XML"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("application/json"));
    }

    #[tokio::test]
    async fn test_navigate_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/start")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(r#"<a href="/next">Next</a><a>nothing</a>"#)
            .create_async()
            .await;

        let mut renderer = renderer();
        renderer
            .navigate(&format!("{}/start", server.url()))
            .await
            .unwrap();
        let hrefs = renderer.query_anchor_hrefs().await.unwrap();

        mock.assert_async().await;
        assert_eq!(hrefs, vec![Some(format!("{}/next", server.url())), None]);
    }

    #[tokio::test]
    async fn test_redirect_target_is_the_base() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new/")
            .create_async()
            .await;
        server
            .mock("GET", "/new/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="child">Child</a>"#)
            .create_async()
            .await;

        let mut renderer = renderer();
        renderer.navigate(&format!("{}/old", server.url())).await.unwrap();
        let hrefs = renderer.query_anchor_hrefs().await.unwrap();
        assert_eq!(hrefs, vec![Some(format!("{}/new/child", server.url()))]);
    }

    #[tokio::test]
    async fn test_404_html_page_still_renders() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "text/html")
            .with_body(r#"<h1>Not found</h1><a href="/home">Home</a>"#)
            .create_async()
            .await;

        let mut renderer = renderer();
        renderer
            .navigate(&format!("{}/missing", server.url()))
            .await
            .unwrap();
        let hrefs = renderer.query_anchor_hrefs().await.unwrap();
        assert_eq!(hrefs, vec![Some(format!("{}/home", server.url()))]);
    }

    #[tokio::test]
    async fn test_crawl_continues_past_error_pages() {
        // /a -> /missing (404, links to /d) and /c
        let mut server = mockito::Server::new_async().await;
        let pages: [(&str, usize, &str); 4] = [
            ("/a", 200, r#"<a href="/missing">M</a><a href="/c">C</a>"#),
            ("/missing", 404, r#"<a href="/d">D</a>"#),
            ("/c", 200, "<p>no links</p>"),
            ("/d", 200, "<p>no links</p>"),
        ];
        for (path, status, body) in pages {
            server
                .mock("GET", path)
                .with_status(status)
                .with_header("content-type", "text/html")
                .with_body(body)
                .create_async()
                .await;
        }

        let base = format!("{}/a", server.url());
        let prefix = format!("{}/", server.url());
        let config = CrawlConfig::new(&base, Some(&prefix))
            .unwrap()
            .with_delay_ms(0)
            .with_timeout_secs(5)
            .with_echo(false);
        let renderer = HttpRenderer::new(&config).unwrap();

        let report = crate::crawl::crawl_site(&config, Box::new(renderer)).await;

        assert!(report.completed());
        assert_eq!(
            report.visited,
            vec![
                format!("{}/a", server.url()),
                format!("{}/missing", server.url()),
                format!("{}/c", server.url()),
                format!("{}/d", server.url()),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_html_is_navigation_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/file.pdf")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body("%PDF-1.4")
            .create_async()
            .await;

        let mut renderer = renderer();
        let err = renderer
            .navigate(&format!("{}/file.pdf", server.url()))
            .await
            .unwrap_err();
        match err {
            CrawlError::Navigation { reason, .. } => assert!(reason.contains("application/pdf")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_query_without_page_is_scrape_error() {
        let mut renderer = renderer();
        let err = renderer.query_anchor_hrefs().await.unwrap_err();
        assert!(matches!(err, CrawlError::Scrape { .. }));
    }

    #[tokio::test]
    async fn test_failed_navigation_unloads_previous_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ok")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/x">X</a>"#)
            .create_async()
            .await;
        server
            .mock("GET", "/broken")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "boom"}"#)
            .create_async()
            .await;

        let mut renderer = renderer();
        renderer.navigate(&format!("{}/ok", server.url())).await.unwrap();
        assert!(renderer.navigate(&format!("{}/broken", server.url())).await.is_err());
        assert!(renderer.query_anchor_hrefs().await.is_err());
    }
}
