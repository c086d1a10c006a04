// src/api/selection.rs
//! Selection links copied from the Schulfinder web interface.
//!
//! The interface encodes its filter as base64 in the `q` parameter, e.g.
//! `https://schulfinder.kultus-bw.de/?q=dHlwZXM9R1kmb3V0cG9zdHM9MA==`
//! which decodes to `types=GY&outposts=0`. That query goes to `schools`
//! unchanged.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use url::{form_urlencoded, Url};

use crate::config::consts::HOST;
use crate::error::{ApiError, ApiResult};

/// Padding optional, stray trailing bits ignored.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub query: String,
}

impl Selection {
    pub fn from_url(raw: &str) -> ApiResult<Self> {
        let raw = raw.trim();
        let invalid = || ApiError::InvalidUrl(raw.to_string());

        let url = Url::parse(raw).map_err(|_| invalid())?;
        if url.host_str() != Some(HOST) {
            return Err(invalid());
        }

        let encoded = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .ok_or_else(invalid)?;

        // query decoding turns an unescaped '+' into a space;
        // URL-safe links use '-' and '_'
        let encoded: String = encoded
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '+',
                '_' => '/',
                c => c,
            })
            .collect();
        let bytes = LENIENT.decode(encoded).map_err(|_| invalid())?;
        let query = String::from_utf8_lossy(&bytes).into_owned();

        Ok(Self { query })
    }

    /// Outposts (Außenstellen) are requested with `outposts=1`.
    pub fn includes_outposts(&self) -> bool {
        form_urlencoded::parse(self.query.trim_start_matches('?').as_bytes())
            .any(|(k, v)| k == "outposts" && v == "1")
    }
}
