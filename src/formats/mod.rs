// src/formats/mod.rs
//! # Export formats
//!
//! Turns fetched [`DetailedSchool`] records into Froide public-body rows.
//! Everything in here is pure: no I/O, no shared state, one output per input,
//! same order.
//!
//! ```text
//! DetailedSchool ─┬─ classify::Classifier ──→ classification
//!                 └─ contact::validate ─────→ problems + contact
//!                                  ↘ project → ExportRecord
//! ```

pub mod classify;
pub mod contact;

use crate::config::consts::{DEFAULT_CATEGORIES, DEFAULT_JURISDICTION_SLUG};
use crate::model::{DetailedSchool, ExportRecord};
use classify::{Classifier, ClassifierMode};

/// Destination constants of the Froide import plus the classifier choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FroideConfig {
    pub jurisdiction_slug: String,
    pub categories: String,
    pub classifier: ClassifierMode,
}

impl Default for FroideConfig {
    fn default() -> Self {
        Self {
            jurisdiction_slug: DEFAULT_JURISDICTION_SLUG.to_string(),
            categories: DEFAULT_CATEGORIES.to_string(),
            classifier: ClassifierMode::default(),
        }
    }
}

fn display_name(school: &DetailedSchool) -> String {
    match school.city.as_deref() {
        Some(city) if !city.is_empty() => format!("{} ({})", school.name, city),
        _ => school.name.clone(),
    }
}

/// Two lines, absent parts left empty. Not trimmed.
fn display_address(school: &DetailedSchool) -> String {
    let part = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();
    format!(
        "{} {}\n{} {}",
        part(&school.street),
        part(&school.house_number),
        part(&school.postcode),
        part(&school.city),
    )
}

pub fn project_one(
    school: &DetailedSchool,
    classifier: &dyn Classifier,
    config: &FroideConfig,
) -> ExportRecord {
    let report = contact::validate(school);

    ExportRecord {
        name: display_name(school),
        email: school.email.clone(),
        fax: school.fax.clone(),
        contact: report.phone_display.clone(),
        address: display_address(school),
        url: school.website.clone(),
        classification: classifier.classify(school),
        jurisdiction_slug: config.jurisdiction_slug.clone(),
        categories: config.categories.clone(),
        problems: report.joined(),
    }
}

/// Project every record, preserving order.
pub fn project(schools: &[DetailedSchool], config: &FroideConfig) -> Vec<ExportRecord> {
    let classifier = config.classifier.classifier();
    schools
        .iter()
        .map(|school| project_one(school, classifier, config))
        .collect()
}

pub fn count_problems(records: &[ExportRecord]) -> usize {
    records.iter().filter(|r| r.has_problems()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_without_city() {
        let school = DetailedSchool { name: "Waldschule".into(), ..Default::default() };
        assert_eq!(display_name(&school), "Waldschule");
        let school = DetailedSchool { city: Some(String::new()), ..school };
        assert_eq!(display_name(&school), "Waldschule");
    }

    #[test]
    fn address_keeps_separators_for_missing_parts() {
        let school = DetailedSchool {
            name: "X".into(),
            postcode: Some("79098".into()),
            ..Default::default()
        };
        assert_eq!(display_address(&school), " \n79098 ");
    }

    #[test]
    fn constants_come_from_config() {
        let config = FroideConfig {
            jurisdiction_slug: "bayern".into(),
            categories: "Bildung".into(),
            classifier: ClassifierMode::NameAcronym,
        };
        let school = DetailedSchool { name: "Realschule".into(), ..Default::default() };
        let out = project(&[school], &config);
        assert_eq!(out[0].jurisdiction_slug, "bayern");
        assert_eq!(out[0].categories, "Bildung");
        assert_eq!(out[0].classification, "Schule");
    }
}
