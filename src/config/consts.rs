// src/config/consts.rs

// Remote API
pub const HOST: &str = "schulfinder.kultus-bw.de";
pub const BASE_URL: &str = "https://schulfinder.kultus-bw.de/api/";
pub const DISTRICTS_ENDPOINT: &str = "admin_units/5/";
pub const SCHOOLS_ENDPOINT: &str = "schools";
pub const DETAILS_ENDPOINT: &str = "school";
pub const USER_AGENT: &str = concat!("schulfinder/", env!("CARGO_PKG_VERSION"));

// Net
pub const RETRY_LIMIT: u32 = 10;
pub const TIMEOUT_MS: u64 = 3_000;
pub const BACKOFF_BASE_MS: u64 = 100;
pub const BACKOFF_MAX_MS: u64 = 5_000;
/// Statuses worth another attempt; everything else fails at once.
pub const RETRY_STATUSES: [u16; 10] = [408, 413, 429, 500, 502, 503, 504, 521, 522, 524];

// Concurrency
pub const DISTRICT_WORKERS: usize = 16;
pub const DETAIL_WORKERS: usize = 300;

// Export
pub const DEFAULT_JURISDICTION_SLUG: &str = "baden-wuerttemberg";
pub const DEFAULT_CATEGORIES: &str = "Schule";
pub const CSV_SEP: char = ',';
