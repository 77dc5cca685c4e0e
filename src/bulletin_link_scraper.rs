use log::{info, warn};
use reqwest::Url;
use scraper::{Html, Selector};

use crate::requests::RequestClient;

const PDF_SUFFIX: &str = ".pdf";
// The portal links its cookie policy as a PDF too.
const EXCLUDED_SUFFIX: &str = "cookies.pdf";

/// Collects the bulletin PDF links published on the portal's listing page.
#[derive(Debug)]
pub struct BulletinLinkScraper {
    pub url: String,
    pub links: Vec<String>,
}

impl BulletinLinkScraper {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            links: Vec::new(),
        }
    }

    pub async fn scrape(&mut self, client: &RequestClient) -> anyhow::Result<()> {
        info!("Looking for bulletins on: {}", self.url);
        let html = client.fetch_url_body(&self.url).await?;
        self.links = extract_pdf_links(&self.url, &html)?;
        info!("Found {} bulletin links", self.links.len());
        Ok(())
    }
}

/// Absolute URLs of every PDF anchor in `html`, in document order. Duplicates
/// are kept; hrefs that cannot be resolved are logged and dropped.
pub fn extract_pdf_links(page_url: &str, html: &str) -> anyhow::Result<Vec<String>> {
    let base = Url::parse(page_url)?;
    let anchor_selector = Selector::parse("a[href]")
        .map_err(|e| anyhow::anyhow!("invalid anchor selector: {e}"))?;
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for anchor in document.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if !href.ends_with(PDF_SUFFIX) || href.ends_with(EXCLUDED_SUFFIX) {
            continue;
        }
        match base.join(href) {
            Ok(link) => links.push(link.to_string()),
            Err(e) => warn!("Ignoring unresolvable bulletin link {href}: {e}"),
        }
    }
    Ok(links)
}
