use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

const DEFAULT_PORTAL_URL: &str = "https://www.mapa.gob.es/es/agricultura/temas/producciones-agricolas/aceite-oliva-y-aceituna-mesa/Evolucion_precios_AO_vegetales.aspx";

/// The env config env vars needed for scraping. All of them are optional.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_portal_url")]
    portal_url: String,
    #[serde(default = "default_documents_dir")]
    documents_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default)]
    skip_crawl: bool,
}

fn default_portal_url() -> String {
    DEFAULT_PORTAL_URL.to_string()
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("pdfs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug)]
pub struct ScrapingConfig {
    portal_url: String,
    documents_dir: PathBuf,
    output_dir: PathBuf,
    skip_crawl: bool,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Ok(Self::from(scraping_env))
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Re-parse what is already on disk without touching the network.
    pub fn skip_crawl(&self) -> bool {
        self.skip_crawl
    }
}

impl From<ScrapingEnv> for ScrapingConfig {
    fn from(env: ScrapingEnv) -> Self {
        Self {
            portal_url: env.portal_url,
            documents_dir: env.documents_dir,
            output_dir: env.output_dir,
            skip_crawl: env.skip_crawl,
        }
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
