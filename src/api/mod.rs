// src/api/mod.rs
//! # Schulfinder endpoints
//!
//! One module per remote endpoint. Each knows the path, the query it needs
//! and the data contract of the answer.
//!
//! ## What lives here
//! - **Request shaping** (`admin_units/5/?query=&wildcard=true`,
//!   `schools?district=…`, `school?uuid=…`).
//! - **Shape checks** through [`shape::decode`]: every body is decoded into
//!   the `model` types before anything else sees it, and a mismatch fails
//!   with [`ApiError::Shape`](crate::error::ApiError::Shape) naming the
//!   endpoint.
//! - **Selection links** from the web interface ([`selection`]).
//!
//! ## What does **not** live here
//! - Concurrency and progress (`fetch`).
//! - Classification and contact checks (`formats`); those never see raw JSON.
//!
//! ## Typical call chain
//! ```text
//! runner → fetch::collect_* → api::<endpoint>::fetch(client, …)
//!                                 ↘ core::net::ApiClient::get_json
//!                                 ↘ api::shape::decode
//! ```
pub mod shape;
pub mod districts;
pub mod schools;
pub mod details;
pub mod selection;
