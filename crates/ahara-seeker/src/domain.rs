//! Clinic vocabulary layered on top of the generic engine.
//!
//! The engine knows nothing about doshas or food categories. This module
//! maps those concepts onto plain field names and facet values so the food
//! and patient browsers share one spelling of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::QueryEngine;
use crate::error::QueryError;
use crate::query::Query;

/// Fields the food browser searches.
pub const FOOD_SEARCH_FIELDS: [&str; 3] = ["name", "category", "tags"];

/// Fields the patient browser searches.
pub const PATIENT_SEARCH_FIELDS: [&str; 4] = ["name", "email", "conditions", "prakriti"];

/// Impact value a dosha filter selects.
pub const NEGATIVE_IMPACT: &str = "negative";

/// Ayurvedic constitutional category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// All doshas in their traditional order.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }

    /// Record field holding this dosha's impact (`positive`, `neutral`,
    /// `negative`).
    pub fn impact_field(self) -> &'static str {
        match self {
            Dosha::Vata => "vata_impact",
            Dosha::Pitta => "pitta_impact",
            Dosha::Kapha => "kapha_impact",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dosha {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vata" => Ok(Dosha::Vata),
            "pitta" => Ok(Dosha::Pitta),
            "kapha" => Ok(Dosha::Kapha),
            other => Err(QueryError::InvalidArgument(format!(
                "unknown dosha '{}' (expected vata, pitta or kapha)",
                other
            ))),
        }
    }
}

impl Query {
    /// Keeps only records that aggravate `dosha`.
    ///
    /// Only the negative impact is selectable; there is no matching filter
    /// for foods that pacify a dosha.
    pub fn aggravates(self, dosha: Dosha) -> Self {
        self.only(dosha.impact_field(), NEGATIVE_IMPACT)
    }
}

/// Engine configured for the food database browser.
pub fn food_engine() -> QueryEngine {
    QueryEngine::new(FOOD_SEARCH_FIELDS)
}

/// Engine configured for the patient registry.
pub fn patient_engine() -> QueryEngine {
    QueryEngine::new(PATIENT_SEARCH_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("KAPHA".parse::<Dosha>().unwrap(), Dosha::Kapha);
        assert_eq!(" vata ".parse::<Dosha>().unwrap(), Dosha::Vata);
        assert!("ether".parse::<Dosha>().is_err());
    }

    #[test]
    fn impact_fields() {
        let fields: Vec<&str> = Dosha::ALL.iter().map(|d| d.impact_field()).collect();
        assert_eq!(fields, ["vata_impact", "pitta_impact", "kapha_impact"]);
    }

    #[test]
    fn aggravates_selects_negative_impact_only() {
        let foods = vec![
            Record::new("chili")
                .with("name", "Green Chili")
                .with("pitta_impact", "negative"),
            Record::new("coconut")
                .with("name", "Coconut Water")
                .with("pitta_impact", "positive"),
            Record::new("rice").with("name", "Basmati Rice"),
        ];

        let result = food_engine()
            .evaluate(&foods, &Query::new().aggravates(Dosha::Pitta))
            .unwrap();
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.items[0].id, "chili");
    }

    #[test]
    fn patient_engine_searches_conditions() {
        let patients = vec![
            Record::new("p1")
                .with("name", "Asha Rao")
                .with("conditions", vec!["Migraine"]),
            Record::new("p2").with("name", "Dev Mehta"),
        ];

        let result = patient_engine()
            .evaluate(&patients, &Query::new().term("migr"))
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].id, "p1");
    }
}
