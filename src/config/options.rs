// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::formats::FroideConfig;
use crate::formats::classify::ClassifierMode;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub export: ExportOptions,
    pub quiet: bool,
    pub log_file: Option<PathBuf>,
}

/// Where the school list comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SchoolSource {
    /// Every district, one `schools` request each.
    #[default]
    AllDistricts,
    /// A selection link copied from the web interface.
    Url(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub source: SchoolSource,
    pub base_url: String,
    pub retry_limit: u32,
    pub timeout: Duration,
    pub district_workers: usize,
    pub detail_workers: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            source: SchoolSource::AllDistricts,
            base_url: BASE_URL.to_string(),
            retry_limit: RETRY_LIMIT,
            timeout: Duration::from_millis(TIMEOUT_MS),
            district_workers: DISTRICT_WORKERS,
            detail_workers: DETAIL_WORKERS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raw detail records as a JSON array.
    #[default]
    Json,
    /// Froide public-bodies CSV.
    Froide,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Froide => "csv",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_path: PathBuf,
    /// Froide only: records with problems go here instead.
    pub problems_path: Option<PathBuf>,
    pub froide: FroideConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            out_path: PathBuf::from(format!("schools.{}", ExportFormat::Json.ext())),
            problems_path: None,
            froide: FroideConfig::default(),
        }
    }
}

impl ExportOptions {
    pub fn froide(out_path: impl Into<PathBuf>) -> Self {
        Self {
            format: ExportFormat::Froide,
            out_path: out_path.into(),
            ..Self::default()
        }
    }

    pub fn with_classifier(mut self, mode: ClassifierMode) -> Self {
        self.froide.classifier = mode;
        self
    }

    /// `problems_path` only makes sense for the Froide CSV.
    pub fn check(&self) -> Result<(), String> {
        if self.problems_path.is_some() && self.format != ExportFormat::Froide {
            return Err("Option `--problems` requires `--froide`".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_consts() {
        let opts = AppOptions::default();
        assert_eq!(opts.fetch.retry_limit, 10);
        assert_eq!(opts.fetch.timeout, Duration::from_millis(3000));
        assert_eq!(opts.fetch.detail_workers, 300);
        assert_eq!(opts.fetch.source, SchoolSource::AllDistricts);
        assert_eq!(opts.export.format, ExportFormat::Json);
        assert_eq!(opts.export.froide.jurisdiction_slug, "baden-wuerttemberg");
    }

    #[test]
    fn problems_requires_froide() {
        let mut export = ExportOptions {
            problems_path: Some("problems.csv".into()),
            ..ExportOptions::default()
        };
        assert!(export.check().is_err());
        export.format = ExportFormat::Froide;
        assert!(export.check().is_ok());
    }
}
