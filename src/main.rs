use anyhow::Context;
use dotenv::dotenv;
use olivepress::{
    Bulletin, BulletinLinkScraper, DocumentOutcome, ExtractionError, PriceHistories, RunReport,
    ScrapingContext, output_writer,
};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::{debug, info, warn};

async fn run_crawl_job(context: &ScrapingContext) {
    let mut scraper = BulletinLinkScraper::new(context.scraping_config.portal_url());
    if let Err(e) = scraper.scrape(&context.request_client).await {
        warn!("Could not crawl the bulletin listing, using local documents only: {e:#}");
        return;
    }

    let stats = context
        .local_store
        .save_missing(&context.request_client, &scraper.links)
        .await;
    info!(
        "Downloads: {} saved, {} already present, {} failed",
        stats.saved, stats.skipped, stats.failed
    );
}

fn run_extraction_job(context: &ScrapingContext) -> anyhow::Result<(PriceHistories, RunReport)> {
    let documents = context.local_store.list_documents()?;
    info!(
        "Extracting {} documents from {}",
        documents.len(),
        context.local_store.dir().display()
    );

    let mut histories = PriceHistories::new();
    let mut report = RunReport::default();
    for path in documents {
        let file_name = path.display().to_string();
        let outcome = match Bulletin::load(&path) {
            Ok(bulletin) => {
                debug!("{} has {} pages", file_name, bulletin.page_count());
                histories.ingest(&bulletin, &context.period_resolver)
            }
            Err(e) => DocumentOutcome::Skipped(ExtractionError::UnreadableDocument {
                reason: format!("{e:#}"),
            }),
        };
        report.record(&file_name, outcome);
    }
    Ok((histories, report))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let context = ScrapingContext::new()?;
    if context.scraping_config.skip_crawl() {
        info!("SKIP_CRAWL set, re-parsing local documents only");
    } else {
        run_crawl_job(&context).await;
    }

    let (histories, report) = run_extraction_job(&context)?;
    report.log_summary();

    let histories = histories.finalize();
    output_writer::write_outputs(context.scraping_config.output_dir(), &histories)
        .context("failed to write outputs")
}
