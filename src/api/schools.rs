// src/api/schools.rs
use crate::config::consts::SCHOOLS_ENDPOINT;
use crate::core::{net, ApiClient};
use crate::error::ApiResult;
use crate::model::SimpleSchool;

/// School list for one district.
pub fn fetch_by_district(client: &ApiClient, district: i64) -> ApiResult<Vec<SimpleSchool>> {
    let value = district.to_string();
    let path = net::with_params(SCHOOLS_ENDPOINT, &[("district", value.as_str())]);
    let body = client.get_json(&path)?;
    super::shape::decode(SCHOOLS_ENDPOINT, body)
}

/// School list for an already encoded query string (from a selection link).
pub fn fetch_by_query(client: &ApiClient, query: &str) -> ApiResult<Vec<SimpleSchool>> {
    let body = client.get_json(&query_path(query))?;
    super::shape::decode(SCHOOLS_ENDPOINT, body)
}

pub fn query_path(query: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        SCHOOLS_ENDPOINT.to_string()
    } else {
        format!("{SCHOOLS_ENDPOINT}?{query}")
    }
}
