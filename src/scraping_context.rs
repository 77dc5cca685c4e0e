use crate::{
    config::ScrapingConfig, local_store::LocalStore, period::PeriodResolver,
    requests::RequestClient,
};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub period_resolver: PeriodResolver,
    pub request_client: RequestClient,
    pub local_store: LocalStore,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_config = ScrapingConfig::new()?;
        let period_resolver = PeriodResolver::new()?;
        let request_client = RequestClient::new()?;
        let local_store = LocalStore::new(scraping_config.documents_dir());
        Ok(ScrapingContext {
            scraping_config,
            period_resolver,
            request_client,
            local_store,
        })
    }
}
