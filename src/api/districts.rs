// src/api/districts.rs
use serde_json::Value;

use crate::config::consts::DISTRICTS_ENDPOINT;
use crate::core::{net, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::model::{District, DistrictResponse};

pub fn path() -> String {
    net::with_params(DISTRICTS_ENDPOINT, &[("query", ""), ("wildcard", "true")])
}

/// All districts of the state.
pub fn fetch(client: &ApiClient) -> ApiResult<Vec<District>> {
    let body = client.get_json(&path())?;
    parse(body)
}

pub fn parse(body: Value) -> ApiResult<Vec<District>> {
    let raw = body.to_string();
    let resp: DistrictResponse = super::shape::decode(DISTRICTS_ENDPOINT, body)?;

    if !resp.success {
        return Err(ApiError::Rejected { what: "districts".to_string(), body: raw });
    }

    Ok(resp
        .results
        .into_iter()
        .map(|e| District { district: e.name, value: e.value })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_matches_lookup_query() {
        assert_eq!(path(), "admin_units/5/?query=&wildcard=true");
    }

    #[test]
    fn renames_entries() {
        let body = json!({ "success": true, "results": [
            { "name": "Stuttgart", "value": 8111 },
            { "name": "Böblingen", "value": 8115 }
        ]});
        let districts = parse(body).unwrap();
        assert_eq!(districts[1], District { district: "Böblingen".into(), value: 8115 });
    }

    #[test]
    fn unsuccessful_lookup_carries_body() {
        let err = parse(json!({ "success": false, "results": [] })).unwrap_err();
        assert!(matches!(err, ApiError::Rejected { ref body, .. } if body.contains("false")));
        assert!(err.to_string().starts_with("Couldn't fetch districts"));
    }
}
