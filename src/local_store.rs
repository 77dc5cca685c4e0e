use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{info, warn};
use reqwest::Url;

use crate::requests::RequestClient;

const PARTIAL_SUFFIX: &str = ".part";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Directory of downloaded bulletins. Files are only ever added.
#[derive(Debug)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of the stored PDFs, sorted by name so runs are reproducible.
    pub fn list_documents(&self) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let mut documents = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list {}", self.dir.display()))?
        {
            let path = entry?.path();
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if path.is_file() && is_pdf {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    /// Local file name for a document URL: its final path segment.
    pub fn file_name_for_url(url: &str) -> Option<String> {
        let url = Url::parse(url).ok()?;
        let segment = url.path_segments()?.next_back()?;
        (!segment.is_empty()).then(|| segment.to_string())
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.dir.join(file_name).is_file()
    }

    pub fn save(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        // A crash mid-write must not leave something that `contains` accepts.
        let partial = self.dir.join(format!("{file_name}{PARTIAL_SUFFIX}"));
        std::fs::write(&partial, bytes)
            .with_context(|| format!("failed to write {}", partial.display()))?;
        std::fs::rename(&partial, &path)
            .with_context(|| format!("failed to move {} into place", path.display()))?;
        Ok(path)
    }

    /// Downloads every URL whose file is not stored yet. A failed download is
    /// logged and skipped.
    pub async fn save_missing(&self, client: &RequestClient, urls: &[String]) -> DownloadStats {
        let mut stats = DownloadStats::default();
        for url in urls {
            let Some(file_name) = Self::file_name_for_url(url) else {
                warn!("Cannot derive a file name from {url}");
                stats.failed += 1;
                continue;
            };
            if self.contains(&file_name) {
                stats.skipped += 1;
                continue;
            }

            info!("Downloading {file_name}");
            let saved = match client.fetch_url_bytes(url).await {
                Ok(bytes) => self.save(&file_name, &bytes),
                Err(e) => Err(e),
            };
            match saved {
                Ok(_) => stats.saved += 1,
                Err(e) => {
                    warn!("Failed to download {url}: {e:#}");
                    stats.failed += 1;
                }
            }
        }
        stats
    }
}
