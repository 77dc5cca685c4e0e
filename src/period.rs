use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::ExtractionError;

const MAX_WEEK: u32 = 53;

/// The week a bulletin reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// `year * 100 + week`, so numeric order is chronological order.
    pub id: i64,
    /// Monday of the week.
    pub date: NaiveDate,
    pub label: String,
}

pub struct PeriodResolver {
    // Matches the six leading characters of a bulletin filename: WWYYYY.
    week_year_regex: Regex,
}

impl PeriodResolver {
    pub fn new() -> anyhow::Result<Self> {
        let week_year_regex = Regex::new(r"^(\d{2})(\d{4})$")?;
        Ok(Self { week_year_regex })
    }

    /// Derives the period from a bulletin filename such as
    /// `pdfs/512022boletinsemanalpreciosaceitedeoliva2021-22_tcm30-640308.pdf`.
    pub fn resolve(&self, file_name: &str) -> Result<Period, ExtractionError> {
        let malformed = || ExtractionError::MalformedFilename {
            file_name: file_name.to_string(),
        };

        let segment = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        let Some((head, _)) = segment.split_once('_') else {
            return Err(malformed());
        };
        let prefix: String = head.chars().take(6).collect();
        let Some(caps) = self.week_year_regex.captures(&prefix) else {
            return Err(malformed());
        };
        let (week_text, year_text) = (&caps[1], &caps[2]);
        let week: u32 = week_text.parse().map_err(|_| malformed())?;
        let year: i32 = year_text.parse().map_err(|_| malformed())?;
        if week > MAX_WEEK {
            return Err(malformed());
        }
        let date = monday_of_week(year, week).ok_or_else(malformed)?;

        Ok(Period {
            id: i64::from(year) * 100 + i64::from(week),
            date,
            label: format!("Semana {week_text} de {year_text}"),
        })
    }
}

/// Monday of `week`, counting weeks from the first Monday of January (week 1).
/// Week 0 is the partial week before it and may start in the previous year.
pub fn monday_of_week(year: i32, week: u32) -> Option<NaiveDate> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let offset = (7 - jan_first.weekday().num_days_from_monday()) % 7;
    let first_monday = jan_first.checked_add_signed(Duration::days(i64::from(offset)))?;
    first_monday.checked_add_signed(Duration::weeks(i64::from(week) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PeriodResolver {
        PeriodResolver::new().unwrap()
    }

    #[test]
    fn resolves_a_real_bulletin_name() {
        let period = resolver()
            .resolve("pdfs/512022boletinsemanalpreciosaceitedeoliva2021-22_tcm30-640308.pdf")
            .unwrap();
        assert_eq!(period.id, 202251);
        assert_eq!(period.label, "Semana 51 de 2022");
        assert_eq!(period.date, NaiveDate::from_ymd_opt(2022, 12, 19).unwrap());
    }

    #[test]
    fn id_is_year_first_for_every_week() {
        let resolver = resolver();
        for week in 1..=52u32 {
            let name = format!("{week:02}2023boletin_tcm30.pdf");
            let period = resolver.resolve(&name).unwrap();
            assert_eq!(period.id, 2023 * 100 + i64::from(week));
            assert_eq!(period.label, format!("Semana {week:02} de 2023"));
        }
    }

    #[test]
    fn keeps_leading_zero_in_label() {
        let period = resolver().resolve("052024x_tcm.pdf").unwrap();
        assert_eq!(period.id, 202405);
        assert_eq!(period.label, "Semana 05 de 2024");
    }

    #[test]
    fn dates_are_mondays_counted_from_first_monday() {
        // 2024 starts on a Monday, 2022 on a Saturday.
        assert_eq!(monday_of_week(2024, 1), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(monday_of_week(2022, 1), NaiveDate::from_ymd_opt(2022, 1, 3));
        assert_eq!(monday_of_week(2022, 0), NaiveDate::from_ymd_opt(2021, 12, 27));
        assert_eq!(monday_of_week(2023, 52), NaiveDate::from_ymd_opt(2023, 12, 25));
    }

    #[test]
    fn rejects_malformed_names() {
        let resolver = resolver();
        for name in [
            "512022boletin.pdf",
            "pdfs/5120_x.pdf",
            "ab2022_x.pdf",
            "51abcd_x.pdf",
            "992022_x.pdf",
            "pdfs/cookies.pdf",
        ] {
            assert!(
                matches!(
                    resolver.resolve(name),
                    Err(ExtractionError::MalformedFilename { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn underscores_in_directories_are_ignored() {
        let period = resolver().resolve("my_pdfs/102021boletin_tcm.pdf").unwrap();
        assert_eq!(period.id, 202110);
    }
}
