use std::path::Path;

use anyhow::Context;
use lopdf::Document;

use crate::ExtractionError;

/// Extracted text of every page of one downloaded bulletin.
#[derive(Debug, Clone)]
pub struct Bulletin {
    pub file_name: String,
    pages: Vec<String>,
}

impl Bulletin {
    pub fn from_pages(file_name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            pages,
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let document = Document::load(path)
            .with_context(|| format!("failed to load PDF {}", path.display()))?;

        let mut pages = Vec::new();
        for page_number in document.get_pages().keys() {
            let text = document.extract_text(&[*page_number]).with_context(|| {
                format!("failed to extract page {page_number} of {}", path.display())
            })?;
            pages.push(text);
        }

        Ok(Self::from_pages(path.to_string_lossy(), pages))
    }

    /// Text of a 1-based page number.
    pub fn page(&self, number: u32) -> Result<&str, ExtractionError> {
        (number as usize)
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(String::as_str)
            .ok_or(ExtractionError::PageMissing {
                page: number,
                page_count: self.pages.len(),
            })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
