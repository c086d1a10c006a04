// src/core/mod.rs

pub mod net;
pub mod pool;

pub use net::ApiClient;
