// src/formats/classify.rs
//! School-type inference.
//!
//! Two strategies share the [`Classifier`] trait:
//! - [`TypeTableClassifier`] maps coarse type codes to labels and refines
//!   vocational schools by branch description. The codes come from the
//!   record's `types` when present, otherwise from its branches.
//! - [`NameAcronymClassifier`] only distinguishes Gymnasium from everything
//!   else, using the school name and a list of academic-track acronyms.
//!
//! Both are total: anything unrecognised ends up as [`GENERIC`].

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Branch, DetailedSchool};

pub const GENERIC: &str = "Schule";
pub const EVENING_SCHOOL: &str = "Abendschule";
pub const VOCATIONAL: &str = "Berufliche Schule";
pub const GYMNASIUM: &str = "Gymnasium";

/// Acronyms of adult evening-track branches.
pub const EVENING_ACRONYMS: [&str; 2] = ["ABGY", "ARS"];

/// Type code → label.
pub const TYPE_LABELS: [(&str, &str); 7] = [
    ("B", VOCATIONAL),
    ("GM", "Gemeinschaftsschule"),
    ("G", "Grundschule"),
    ("GY", GYMNASIUM),
    ("R", "Realschule"),
    ("S", "Förderschule"),
    ("WR", "Werkrealschule"),
];

/// Academic-track branch acronyms (general and vocational Gymnasium profiles).
pub const GYMNASIUM_ACRONYMS: [&str; 25] = [
    "GY", "G8", "G9", "AGY", "BIGY", "SGY", "MGY", "NGY", "SPGY", "KUGY",
    "MUGY", "SPOGY", "HUGY", "BGY", "TG", "WG", "EG", "SG", "AG", "BTG",
    "TGM", "TGI", "TGTM", "WGF", "WGI",
];

/// Branch acronym → type code, for acronyms that are not type codes themselves.
pub const BRANCH_TYPE_CODES: &[(&str, &str)] = &[
    ("GS", "G"),
    ("RS", "R"),
    ("WRS", "WR"),
    ("GMS", "GM"),
    ("SBBZ", "S"),
    ("G8", "GY"), ("G9", "GY"), ("AGY", "GY"), ("BIGY", "GY"), ("SGY", "GY"),
    ("MGY", "GY"), ("NGY", "GY"), ("SPGY", "GY"), ("KUGY", "GY"), ("MUGY", "GY"),
    ("SPOGY", "GY"), ("HUGY", "GY"),
    ("TG", "B"), ("WG", "B"), ("EG", "B"), ("SG", "B"), ("AG", "B"), ("BTG", "B"),
    ("TGM", "B"), ("TGI", "B"), ("TGTM", "B"), ("WGF", "B"), ("WGI", "B"),
];

pub struct VocationalSubtype {
    pub name: &'static str,
    pub patterns: Vec<Regex>,
}

/// Ordered; the first group with a matching pattern wins.
pub static VOCATIONAL_SUBTYPES: LazyLock<Vec<VocationalSubtype>> = LazyLock::new(|| {
    let group = |name: &'static str, sources: &[&str]| VocationalSubtype {
        name,
        patterns: sources
            .iter()
            .map(|src| Regex::new(&format!("(?i){src}")).expect("static pattern"))
            .collect(),
    };
    vec![
        group("Berufliches Gymnasium", &[r"berufliches\s+gymnasium"]),
        group("Berufsfachschule", &["berufsfachschule"]),
        group("Berufskolleg", &["berufskolleg"]),
        group("Berufsoberschule", &["berufsoberschule"]),
        group("Berufsschule", &["berufsschule"]),
        group(
            "Berufsvorbereitender Bildungsgang",
            &["vorqualifizierungsjahr", "berufseinstiegsjahr", "ausbildungsvorbereitung"],
        ),
        group("Fachschule", &["fachschule"]),
    ]
});

static GYMNASIUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)gymnasium").expect("static pattern"));

/// Which strategy the projector uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassifierMode {
    #[default]
    TypeTable,
    NameAcronym,
}

impl ClassifierMode {
    pub fn classifier(self) -> &'static dyn Classifier {
        match self {
            ClassifierMode::TypeTable => &TypeTableClassifier,
            ClassifierMode::NameAcronym => &NameAcronymClassifier,
        }
    }
}

pub trait Classifier: Sync {
    fn classify(&self, school: &DetailedSchool) -> String;
}

pub struct TypeTableClassifier;

impl Classifier for TypeTableClassifier {
    fn classify(&self, school: &DetailedSchool) -> String {
        if school.types.is_empty() {
            let implied = implied_type_codes(&school.branches);
            classify_by_types(&implied, &school.branches).to_string()
        } else {
            classify_by_types(&school.types, &school.branches).to_string()
        }
    }
}

pub struct NameAcronymClassifier;

impl Classifier for NameAcronymClassifier {
    fn classify(&self, school: &DetailedSchool) -> String {
        classify_by_name(&school.name, &school.branches).to_string()
    }
}

pub fn type_label(code: &str) -> Option<&'static str> {
    TYPE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Type code a single branch stands for. Vocational branches are also
/// recognised by their description; anything else has no code.
pub fn branch_type_code(branch: &Branch) -> Option<&'static str> {
    let acronym = branch.acronym.as_str();
    if let Some((code, _)) = TYPE_LABELS.iter().find(|(c, _)| *c == acronym) {
        return Some(*code);
    }
    if let Some((_, code)) = BRANCH_TYPE_CODES.iter().find(|(a, _)| *a == acronym) {
        return Some(*code);
    }
    (vocational_subtype(&branch.description_long) != VOCATIONAL).then_some("B")
}

/// Distinct type codes implied by the branches, in branch order.
pub fn implied_type_codes(branches: &[Branch]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in branches.iter().filter_map(branch_type_code) {
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

fn is_evening_school(branches: &[Branch]) -> bool {
    !branches.is_empty()
        && branches
            .iter()
            .all(|b| EVENING_ACRONYMS.contains(&b.acronym.as_str()))
}

/// Subtype for one branch description, falling back to the generic vocational label.
pub fn vocational_subtype(description: &str) -> &'static str {
    VOCATIONAL_SUBTYPES
        .iter()
        .find(|group| group.patterns.iter().any(|re| re.is_match(description)))
        .map_or(VOCATIONAL, |group| group.name)
}

pub fn classify_by_types(types: &[String], branches: &[Branch]) -> &'static str {
    if is_evening_school(branches) {
        return EVENING_SCHOOL;
    }

    let distinct: HashSet<&str> = types.iter().map(String::as_str).collect();
    if distinct.len() != 1 {
        return GENERIC;
    }

    let Some(label) = distinct.into_iter().next().and_then(type_label) else {
        return GENERIC;
    };

    if label != VOCATIONAL {
        return label;
    }

    // Insertion order is irrelevant; only the count of distinct subtypes matters.
    let subtypes: HashSet<&str> = branches
        .iter()
        .map(|b| vocational_subtype(&b.description_long))
        .collect();

    match subtypes.len() {
        1 => subtypes.into_iter().next().unwrap_or(VOCATIONAL),
        _ => VOCATIONAL,
    }
}

fn is_gymnasium_branch(branch: &Branch) -> bool {
    GYMNASIUM_ACRONYMS.contains(&branch.acronym.as_str())
        || GYMNASIUM_RE.is_match(&branch.description_long)
}

pub fn classify_by_name(name: &str, branches: &[Branch]) -> &'static str {
    if GYMNASIUM_RE.is_match(name) {
        return GYMNASIUM;
    }

    let (gym, other): (Vec<&Branch>, Vec<&Branch>) =
        branches.iter().partition(|b| is_gymnasium_branch(b));

    if !gym.is_empty() && other.is_empty() {
        GYMNASIUM
    } else {
        GENERIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn fachschule_does_not_shadow_berufsfachschule() {
        assert_eq!(vocational_subtype("Zweijährige Berufsfachschule"), "Berufsfachschule");
        assert_eq!(vocational_subtype("Fachschule für Technik"), "Fachschule");
        assert_eq!(vocational_subtype("BERUFLICHES   Gymnasium"), "Berufliches Gymnasium");
        assert_eq!(vocational_subtype("Sonstiges"), VOCATIONAL);
    }

    #[test]
    fn preparatory_program_has_three_spellings() {
        for d in ["Vorqualifizierungsjahr Arbeit/Beruf", "Berufseinstiegsjahr", "Ausbildungsvorbereitung dual"] {
            assert_eq!(vocational_subtype(d), "Berufsvorbereitender Bildungsgang");
        }
    }

    #[test]
    fn duplicate_type_codes_count_once() {
        assert_eq!(classify_by_types(&types(&["R", "R"]), &[]), "Realschule");
    }

    #[test]
    fn no_type_codes_is_generic() {
        assert_eq!(classify_by_types(&[], &[Branch::new("X", "y")]), GENERIC);
    }

    #[test]
    fn vocational_without_branches_stays_generic_vocational() {
        assert_eq!(classify_by_types(&types(&["B"]), &[]), VOCATIONAL);
    }

    #[test]
    fn branch_codes() {
        assert_eq!(branch_type_code(&Branch::new("GY", "Gymnasium (G8)")), Some("GY"));
        assert_eq!(branch_type_code(&Branch::new("GS", "Grundschule")), Some("G"));
        assert_eq!(branch_type_code(&Branch::new("TG", "Technisches Gymnasium")), Some("B"));
        assert_eq!(branch_type_code(&Branch::new("BK1", "Einjähriges Berufskolleg")), Some("B"));
        assert_eq!(branch_type_code(&Branch::new("XY", "Sonderform")), None);
    }

    #[test]
    fn implied_codes_are_distinct() {
        let branches = [
            Branch::new("GS", "Grundschule"),
            Branch::new("G", "Grundschule"),
            Branch::new("WRS", "Werkrealschule"),
        ];
        assert_eq!(implied_type_codes(&branches), types(&["G", "WR"]));
    }

    #[test]
    fn mode_dispatch() {
        let school = DetailedSchool {
            name: "Goethe-Gymnasium".into(),
            types: types(&["G"]),
            ..Default::default()
        };
        assert_eq!(ClassifierMode::TypeTable.classifier().classify(&school), "Grundschule");
        assert_eq!(ClassifierMode::NameAcronym.classifier().classify(&school), GYMNASIUM);
    }
}
