// src/api/details.rs
use crate::config::consts::DETAILS_ENDPOINT;
use crate::core::{net, ApiClient};
use crate::error::ApiResult;
use crate::model::DetailedSchool;

pub fn fetch(client: &ApiClient, uuid: &str) -> ApiResult<DetailedSchool> {
    let path = net::with_params(DETAILS_ENDPOINT, &[("uuid", uuid)]);
    let body = client.get_json(&path)?;
    super::shape::decode(DETAILS_ENDPOINT, body)
}
