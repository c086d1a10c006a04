// src/runner.rs
use std::error::Error;
use std::path::PathBuf;

use crate::{
    api::selection::Selection,
    config::options::{AppOptions, ExportFormat, SchoolSource},
    core::ApiClient,
    fetch, file, formats,
    model::{DetailedSchool, SimpleSchool},
    progress::Progress,
};

pub const OUTPOST_WARNING: &str =
    "You have included outposts in your query. Importing outposts into Froide is highly discouraged.";

/// Summary of what was produced.
#[derive(Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub school_count: usize,
    pub problem_count: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Done(RunSummary),
    /// The user declined a confirmation.
    Aborted,
}

/// Top-level runner: fetch, then export in the requested format.
/// `confirm` gets a warning about a risky but legal request (outposts in
/// Froide mode) and answers whether to go on. It is asked even when
/// `progress` is silent, so it has to show the warning itself.
pub fn run(
    opts: &AppOptions,
    progress: &mut dyn Progress,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<RunOutcome, Box<dyn Error>> {
    opts.export.check()?;
    let froide = opts.export.format == ExportFormat::Froide;
    let client = ApiClient::new(&opts.fetch);

    logf!("Run: source={:?} format={:?}", opts.fetch.source, opts.export.format);

    let simple: Vec<SimpleSchool> = match &opts.fetch.source {
        SchoolSource::Url(url) => {
            let selection = Selection::from_url(url)?;
            if froide && selection.includes_outposts() {
                logw!("Run: {OUTPOST_WARNING}");
                if !confirm(OUTPOST_WARNING) {
                    logw!("Run: aborted at outpost confirmation");
                    return Ok(RunOutcome::Aborted);
                }
            }
            fetch::collect_by_selection(&client, &selection, progress)?
        }
        SchoolSource::AllDistricts => {
            let districts = fetch::collect_districts(&client, progress)?;
            fetch::collect_by_districts(&client, districts, opts.fetch.district_workers, progress)?
        }
    };

    let detailed = fetch::collect_details(&client, simple, opts.fetch.detail_workers, progress)?;
    let summary = export(opts, &detailed, progress)?;
    Ok(RunOutcome::Done(summary))
}

/// Write already fetched records according to `opts.export`.
pub fn export(
    opts: &AppOptions,
    schools: &[DetailedSchool],
    progress: &mut dyn Progress,
) -> Result<RunSummary, Box<dyn Error>> {
    opts.export.check()?;
    progress.begin("Saving school data", None);

    let written = match opts.export.format {
        ExportFormat::Froide => {
            let records = formats::project(schools, &opts.export.froide);
            file::write_froide(&opts.export, &records)?
        }
        ExportFormat::Json => file::write_json(&opts.export.out_path, schools)?,
    };

    progress.finish();
    if written.problem_count > 0 {
        progress.warn(&format!(
            "Found {} schools with problems. Please review manually.",
            written.problem_count
        ));
    }

    Ok(RunSummary {
        files_written: written.paths,
        school_count: schools.len(),
        problem_count: written.problem_count,
    })
}
