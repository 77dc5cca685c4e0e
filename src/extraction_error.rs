/// Why a single bulletin could not be turned into records.
///
/// Every variant is recoverable at the run level: the document is skipped
/// and the next one is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionError {
    MalformedFilename { file_name: String },
    LabelNotFound { label: String },
    ValueParseError { line: String },
    RegionDataMissing { region: String, ordinal: usize, found: usize },
    PageMissing { page: u32, page_count: usize },
    UnreadableDocument { reason: String },
    DuplicatePeriod { id: i64 },
}

impl ExtractionError {
    /// Short stable name, used when summarizing skip causes.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::MalformedFilename { .. } => "malformed filename",
            ExtractionError::LabelNotFound { .. } => "label not found",
            ExtractionError::ValueParseError { .. } => "value parse error",
            ExtractionError::RegionDataMissing { .. } => "region data missing",
            ExtractionError::PageMissing { .. } => "page missing",
            ExtractionError::UnreadableDocument { .. } => "unreadable document",
            ExtractionError::DuplicatePeriod { .. } => "duplicate period",
        }
    }
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::MalformedFilename { file_name } => {
                write!(f, "Filename does not encode a week and year: {file_name}")
            }
            ExtractionError::LabelNotFound { label } => {
                write!(f, "No line starts with label \"{label}\"")
            }
            ExtractionError::ValueParseError { line } => {
                write!(f, "Could not parse a value from \"{line}\"")
            }
            ExtractionError::RegionDataMissing {
                region,
                ordinal,
                found,
            } => write!(
                f,
                "Region {region} needs at least {} matching lines, found {found}",
                ordinal + 1
            ),
            ExtractionError::PageMissing { page, page_count } => {
                write!(f, "Page {page} requested but document has {page_count} pages")
            }
            ExtractionError::UnreadableDocument { reason } => {
                write!(f, "Could not read document: {reason}")
            }
            ExtractionError::DuplicatePeriod { id } => {
                write!(f, "Period {id} was already extracted from another document")
            }
        }
    }
}

impl std::error::Error for ExtractionError {}
