//! Turns bulletin page text into [`PeriodRecord`]s.
//!
//! Values are picked by whitespace token position on reflowed PDF text. This
//! breaks as soon as the upstream layout drifts; the positions live in
//! [`crate::category`] so they can be adjusted without touching this code.

use log::debug;

use crate::{
    ExtractionError,
    bulletin::Bulletin,
    category::{Category, LAYOUT, REGIONS, Region},
    history::{PeriodRecord, RegionalValues},
    period::Period,
    text_manipulators::{locate_line, normalize_line},
};

/// Parses a decimal-comma number such as `3,45`.
pub fn parse_decimal(token: &str) -> Result<f64, ExtractionError> {
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExtractionError::ValueParseError {
            line: token.to_string(),
        })
}

/// National value from the remainder of a located category line.
pub fn extract_category_value(remainder: &str) -> Result<f64, ExtractionError> {
    let token = remainder
        .split_whitespace()
        .nth(LAYOUT.national_value_token)
        .ok_or_else(|| ExtractionError::ValueParseError {
            line: remainder.to_string(),
        })?;
    parse_decimal(token)
}

/// Value of `region` for the category with the given ordinal. `lines` must
/// already be normalized.
pub fn extract_region_value(
    lines: &[String],
    region: &Region,
    ordinal: usize,
) -> Result<f64, ExtractionError> {
    let matches: Vec<&String> = lines
        .iter()
        .filter(|line| line.starts_with(region.label))
        .collect();
    let line = matches
        .get(ordinal)
        .ok_or_else(|| ExtractionError::RegionDataMissing {
            region: region.label.to_string(),
            ordinal,
            found: matches.len(),
        })?;
    let token = line
        .split_whitespace()
        .nth(region.value_token)
        .ok_or_else(|| ExtractionError::ValueParseError {
            line: line.to_string(),
        })?;
    parse_decimal(token)
}

/// Every region's value for one ordinal. Regions without a cell for that
/// ordinal are left out.
pub fn extract_regional_breakdown(
    page_text: &str,
    ordinal: usize,
) -> Result<RegionalValues, ExtractionError> {
    let lines: Vec<String> = page_text.lines().map(normalize_line).collect();
    let mut values = RegionalValues::default();
    for region in REGIONS.iter().filter(|region| ordinal < region.ordinals) {
        values.insert(region.key, extract_region_value(&lines, region, ordinal)?);
    }
    Ok(values)
}

fn extract_category(
    bulletin: &Bulletin,
    period: &Period,
    category: &Category,
) -> Result<PeriodRecord, ExtractionError> {
    let national_page = bulletin.page(LAYOUT.national_page)?;
    let remainder = locate_line(national_page, category.label)?;
    let value = extract_category_value(&remainder)?;
    debug!("{}: {} -> {}", category.id, remainder, value);

    let regions = match category.region_ordinal {
        Some(ordinal) => {
            let regional_page = bulletin.page(LAYOUT.regional_page)?;
            Some(extract_regional_breakdown(regional_page, ordinal)?)
        }
        None => None,
    };

    Ok(PeriodRecord::new(period, value, regions))
}

/// One record per category, in the order given. The first failing category
/// fails the whole document.
pub fn extract_document(
    bulletin: &Bulletin,
    period: &Period,
    categories: &[&Category],
) -> Result<Vec<PeriodRecord>, ExtractionError> {
    categories
        .iter()
        .map(|category| extract_category(bulletin, period, category))
        .collect()
}
