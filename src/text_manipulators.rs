use crate::{ExtractionError, category::LAYOUT};

/// Removes bold markup from an extracted line. Indentation is kept, so an
/// indented label does not count as starting the line.
pub fn normalize_line(line: &str) -> String {
    line.replace(LAYOUT.markup_marker, "")
}

/// Finds the last line of `text` that starts with `label` and returns what
/// follows the label, trimmed.
///
/// Bulletins repeat category labels across sections and the current week's
/// figure is the last occurrence in extraction order, so the scan runs from
/// the end of the page backwards.
pub fn locate_line(text: &str, label: &str) -> Result<String, ExtractionError> {
    text.lines()
        .rev()
        .map(normalize_line)
        .find_map(|line| line.strip_prefix(label).map(|rest| rest.trim().to_string()))
        .ok_or_else(|| ExtractionError::LabelNotFound {
            label: label.to_string(),
        })
}
