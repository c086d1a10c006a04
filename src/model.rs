// src/model.rs
//! Data contracts for the Schulfinder API and the Froide export.
//!
//! API types double as the shape boundary: `api::shape::decode` deserializes
//! raw JSON into them and rejects anything that does not fit.
//! `null` and a missing key both land as `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One administrative district (`admin_units/5`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub district: String,
    pub value: i64,
}

/// Raw entry of the district lookup; renamed into [`District`] after decoding.
#[derive(Clone, Debug, Deserialize)]
pub struct DistrictEntry {
    pub name: String,
    pub value: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DistrictResponse {
    pub success: bool,
    pub results: Vec<DistrictEntry>,
}

/// School list entry (`schools`). Only `uuid` is needed downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleSchool {
    pub uuid: String,
    pub outpost_number: String,
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub official: i64,
    pub marker_class: String,
    pub marker_label: String,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub branch_id: i64,
    pub acronym: String,
    pub description_long: String,
}

impl Branch {
    pub fn new(acronym: &str, description_long: &str) -> Self {
        Self {
            branch_id: 0,
            acronym: acronym.to_string(),
            description_long: description_long.to_string(),
        }
    }
}

/// Full school record (`school?uuid=`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedSchool {
    pub outpost_number: String,
    pub name: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub official: i64,
    pub branches: Vec<Branch>,
    /// Coarse type codes ("B", "GY", ...). The detail endpoint leaves them
    /// out; the classifier then reads them off the branches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    pub trades: Vec<Value>,
    /// Tablet metadata and anything else the API adds; passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Froide public-body row. Field order is the CSV column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub name: String,
    pub email: Option<String>,
    pub fax: Option<String>,
    pub contact: Option<String>,
    pub address: String,
    pub url: Option<String>,
    pub classification: String,
    #[serde(rename = "jurisdiction__slug")]
    pub jurisdiction_slug: String,
    pub categories: String,
    pub problems: String,
}

impl ExportRecord {
    pub const HEADERS: [&'static str; 10] = [
        "name",
        "email",
        "fax",
        "contact",
        "address",
        "url",
        "classification",
        "jurisdiction__slug",
        "categories",
        "problems",
    ];

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Cells in header order; absent values become empty cells.
    pub fn cells(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.name.clone(),
            opt(&self.email),
            opt(&self.fax),
            opt(&self.contact),
            self.address.clone(),
            opt(&self.url),
            self.classification.clone(),
            self.jurisdiction_slug.clone(),
            self.categories.clone(),
            self.problems.clone(),
        ]
    }
}
