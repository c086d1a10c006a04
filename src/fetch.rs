// src/fetch.rs
use crate::{
    api::{ details, districts, schools, selection::Selection },
    core::{ pool::map_bounded, ApiClient },
    error::ApiResult,
    model::{ DetailedSchool, District, SimpleSchool },
    progress::Progress,
};

pub fn collect_districts(
    client: &ApiClient,
    progress: &mut dyn Progress,
) -> ApiResult<Vec<District>> {
    progress.begin("Looking up districts", None);
    let list = districts::fetch(client)?;
    logf!("Districts: {} found", list.len());
    progress.finish();
    Ok(list)
}

/// School lists of all districts, concatenated in district order.
pub fn collect_by_districts(
    client: &ApiClient,
    districts: Vec<District>,
    workers: usize,
    progress: &mut dyn Progress,
) -> ApiResult<Vec<SimpleSchool>> {
    let total = districts.len();
    progress.begin("Loading school lists", Some(total));

    let worker_client = client.clone();
    let per_district = map_bounded(
        districts,
        workers,
        move |d: &District| schools::fetch_by_district(&worker_client, d.value),
        |d, done| {
            progress.item_done(&d.district, done);
            progress.log(&format!("Loading school list: {} ({}/{})", d.district, done, total));
        },
    )?;

    let schools: Vec<SimpleSchool> = per_district.into_iter().flatten().collect();
    logf!("School lists: {} schools in {} districts", schools.len(), total);
    progress.finish();
    Ok(schools)
}

pub fn collect_by_selection(
    client: &ApiClient,
    selection: &Selection,
    progress: &mut dyn Progress,
) -> ApiResult<Vec<SimpleSchool>> {
    progress.begin("Loading school list", None);
    logd!("Selection query: {}", selection.query);
    let list = schools::fetch_by_query(client, &selection.query)?;
    logf!("Selection: {} schools", list.len());
    progress.finish();
    Ok(list)
}

/// Detail record for every school, in the order of `schools`.
pub fn collect_details(
    client: &ApiClient,
    schools: Vec<SimpleSchool>,
    workers: usize,
    progress: &mut dyn Progress,
) -> ApiResult<Vec<DetailedSchool>> {
    let total = schools.len();
    progress.begin("Fetching school data", Some(total));

    let worker_client = client.clone();
    let detailed = map_bounded(
        schools,
        workers,
        move |s: &SimpleSchool| details::fetch(&worker_client, &s.uuid),
        |s, done| {
            progress.item_done(&s.name, done);
            progress.log(&format!("Fetching school data ({done}/{total})"));
        },
    )
    .inspect_err(|e| loge!("Details: {e}"))?;

    logf!("Details: {} records", detailed.len());
    progress.finish();
    Ok(detailed)
}
