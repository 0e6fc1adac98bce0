//! Record sources: the bundled sample collections or a JSON file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ahara_seeker::{food_engine, patient_engine, QueryEngine, Record};
use anyhow::{bail, Context, Result};
use tracing::info;

const FOODS_JSON: &str = include_str!("../data/foods.json");
const PATIENTS_JSON: &str = include_str!("../data/patients.json");

/// Which browser is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Foods,
    Patients,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Foods => "foods",
            Dataset::Patients => "patients",
        }
    }

    /// Search fields of the matching browser.
    pub fn engine(self) -> QueryEngine {
        match self {
            Dataset::Foods => food_engine(),
            Dataset::Patients => patient_engine(),
        }
    }

    /// Table columns, after the id column.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Dataset::Foods => &[
                "name",
                "category",
                "calories",
                "vata_impact",
                "pitta_impact",
                "kapha_impact",
            ],
            Dataset::Patients => &["name", "age", "gender", "prakriti", "status", "conditions"],
        }
    }

    fn bundled(self) -> &'static str {
        match self {
            Dataset::Foods => FOODS_JSON,
            Dataset::Patients => PATIENTS_JSON,
        }
    }

    /// Loads the collection from `path`, or the bundled sample when `None`.
    pub fn load(self, path: Option<&Path>) -> Result<Vec<Record>> {
        let records = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                parse_records(&raw).with_context(|| format!("parsing {}", path.display()))?
            }
            None => parse_records(self.bundled())
                .with_context(|| format!("parsing bundled {} sample", self.name()))?,
        };

        info!(dataset = self.name(), records = records.len(), "loaded records");
        Ok(records)
    }
}

/// Parses a JSON array of flat records and checks ids are unique.
pub fn parse_records(raw: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(raw)?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            bail!("duplicate record id '{}'", record.id);
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahara_seeker::{Seekable, Value};
    use std::io::Write;

    #[test]
    fn bundled_samples_parse() {
        let foods = Dataset::Foods.load(None).unwrap();
        assert_eq!(foods.len(), 16);
        let patients = Dataset::Patients.load(None).unwrap();
        assert_eq!(patients.len(), 10);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "x1", "name": "Amla", "calories": 44}}]"#).unwrap();

        let records = Dataset::Foods.load(Some(file.path())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display("name"), "Amla");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dataset::Foods
            .load(Some(Path::new("/definitely/not/here.json")))
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn null_fields_load_as_absent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "p1", "name": "Meera", "email": null}}, {{"id": "p2", "name": "Arjun"}}]"#
        )
        .unwrap();

        let records = Dataset::Patients.load(Some(file.path())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seeker_field_value("email"), Value::None);
        assert_eq!(records[0].display("name"), "Meera");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_records(r#"[{"id": "a"}, {"id": "a"}]"#).unwrap_err();
        assert!(err.to_string().contains("duplicate record id 'a'"));
    }
}
