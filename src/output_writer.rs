use std::path::Path;

use anyhow::Context;
use log::info;
use serde::Serialize;

use crate::{
    category::REGIONS,
    history::{CategoryHistory, PeriodRecord},
};

pub const SNAPSHOT_FILE: &str = "data.json";
const CSV_SEPARATOR: &str = ";";
const NATIONAL_COLUMN: &str = "spain";

#[derive(Serialize)]
struct CategorySnapshot<'a> {
    id: &'a str,
    label: &'a str,
    history: &'a [PeriodRecord],
}

/// JSON snapshot of every category and its history.
pub fn render_snapshot(histories: &[CategoryHistory]) -> serde_json::Result<String> {
    let snapshot: Vec<CategorySnapshot> = histories
        .iter()
        .map(|history| CategorySnapshot {
            id: history.category.id,
            label: history.category.label,
            history: &history.records,
        })
        .collect();
    serde_json::to_string_pretty(&snapshot)
}

/// Semicolon separated table of one category. Regions without a value are
/// written as `0`.
pub fn render_csv(history: &CategoryHistory) -> String {
    let mut columns = vec!["id", "datetime", "label", NATIONAL_COLUMN];
    columns.extend(REGIONS.iter().map(|region| region.key));
    let mut csv = columns.join(CSV_SEPARATOR);
    csv.push('\n');

    for record in &history.records {
        let mut cells = vec![
            record.id.to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            record.label.clone(),
            record.value.to_string(),
        ];
        cells.extend(REGIONS.iter().map(|region| {
            record
                .regions
                .as_ref()
                .and_then(|regions| regions.get(region.key))
                .unwrap_or(0.0)
                .to_string()
        }));
        csv.push_str(&cells.join(CSV_SEPARATOR));
        csv.push('\n');
    }
    csv
}

/// Overwrites the snapshot and one CSV file per category in `output_dir`.
pub fn write_outputs(output_dir: &Path, histories: &[CategoryHistory]) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let snapshot_path = output_dir.join(SNAPSHOT_FILE);
    let snapshot = render_snapshot(histories).context("failed to serialize snapshot")?;
    std::fs::write(&snapshot_path, snapshot)
        .with_context(|| format!("failed to write {}", snapshot_path.display()))?;
    info!("Wrote {}", snapshot_path.display());

    for history in histories {
        let csv_path = output_dir.join(format!("{}.csv", history.category.id));
        std::fs::write(&csv_path, render_csv(history))
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        info!("Wrote {}", csv_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bulletin::Bulletin,
        bulletin_extractor::tests::{national_page, regional_page},
        history::PriceHistories,
        period::PeriodResolver,
    };

    fn sample_bulletins() -> Vec<Bulletin> {
        [("022023a_x.pdf", "3,20"), ("012023a_x.pdf", "3,10")]
            .iter()
            .map(|(name, value)| {
                Bulletin::from_pages(
                    *name,
                    vec![String::new(), national_page(value), regional_page()],
                )
            })
            .collect()
    }

    fn run(bulletins: &[Bulletin]) -> Vec<CategoryHistory> {
        let resolver = PeriodResolver::new().unwrap();
        let mut histories = PriceHistories::new();
        for bulletin in bulletins {
            histories.ingest(bulletin, &resolver);
        }
        histories.finalize()
    }

    #[test]
    fn snapshot_shape() {
        let histories = run(&sample_bulletins());
        let json: serde_json::Value =
            serde_json::from_str(&render_snapshot(&histories).unwrap()).unwrap();

        let aove = &json[0];
        assert_eq!(aove["id"], "aove");
        assert_eq!(aove["label"], "Aceite de oliva virgen extra");
        let first = &aove["history"][0];
        assert_eq!(first["id"], 202301);
        assert_eq!(first["datetime"], "2023-01-02");
        assert_eq!(first["label"], "Semana 01 de 2023");
        assert_eq!(first["value"], 3.1);
        assert_eq!(first["ccaa"]["andalucia"], 3.51);
        assert_eq!(first["ccaa"]["castillaLaMancha"], 3.41);

        let aol = &json[2];
        assert!(aol["history"][0]["ccaa"].get("castillaLaMancha").is_none());
    }

    #[test]
    fn regional_keys_keep_table_order() {
        let histories = run(&sample_bulletins());
        let snapshot = render_snapshot(&histories).unwrap();
        let andalucia = snapshot.find("\"andalucia\"").unwrap();
        let catalunya = snapshot.find("\"catalunya\"").unwrap();
        let castilla = snapshot.find("\"castillaLaMancha\"").unwrap();
        let extremadura = snapshot.find("\"extremadura\"").unwrap();
        assert!(andalucia < catalunya && catalunya < castilla && castilla < extremadura);
    }

    #[test]
    fn categories_without_regions_have_no_regional_field() {
        let histories = run(&sample_bulletins());
        let json: serde_json::Value =
            serde_json::from_str(&render_snapshot(&histories).unwrap()).unwrap();
        let aof = json
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == "aof")
            .unwrap();
        for record in aof["history"].as_array().unwrap() {
            let record = record.as_object().unwrap();
            assert!(!record.contains_key("ccaa"));
            assert!(!record.contains_key("regions"));
        }
    }

    #[test]
    fn csv_rows_fill_missing_regions_with_zero() {
        let histories = run(&sample_bulletins());
        let aol = render_csv(&histories[2]);
        let mut lines = aol.lines();
        assert_eq!(
            lines.next(),
            Some("id;datetime;label;spain;andalucia;catalunya;castillaLaMancha;extremadura")
        );
        assert_eq!(
            lines.next(),
            Some("202301;2023-01-02;Semana 01 de 2023;2.55;3.53;3.63;0;3.33")
        );

        let mso = render_csv(&histories[5]);
        assert_eq!(
            mso.lines().nth(2),
            Some("202302;2023-01-09;Semana 02 de 2023;2.75;0;0;0;0")
        );
    }

    #[test]
    fn rerunning_produces_identical_output() {
        let dir = tempfile::tempdir().unwrap();
        let bulletins = sample_bulletins();

        write_outputs(dir.path(), &run(&bulletins)).unwrap();
        let first = std::fs::read(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let first_csv = std::fs::read(dir.path().join("aove.csv")).unwrap();

        write_outputs(dir.path(), &run(&bulletins)).unwrap();
        let second = std::fs::read(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let second_csv = std::fs::read(dir.path().join("aove.csv")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_csv, second_csv);
    }
}
