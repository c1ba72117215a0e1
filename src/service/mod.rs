//! Stateless request handler for product matching.
//!
//! Mirrors the body a remote caller posts (`{"skinProfile": {...}}`) and
//! answers with `{"recommendations": [...]}`. Scoring goes through
//! [`crate::scoring::recommend`], the same path in-process callers use.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{Product, SkinProfile, Undertone};
use crate::scoring::{recommend, ScoredProduct, ScoringConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("invalid JSON request: {0}")]
    MalformedBody(String),

    #[error("skinProfile requires {0}")]
    MissingField(&'static str),

    #[error("skinProfile.{field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl RequestError {
    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Profile fields as they arrive on the wire, before required-field checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSkinProfile {
    pub melanin_index: Option<i32>,
    pub undertone: Option<String>,
    pub skin_type: Option<String>,
    pub sensitivity_level: Option<u8>,
    pub skin_concerns: Option<Vec<String>>,
}

impl RawSkinProfile {
    pub fn into_profile(self) -> Result<SkinProfile, RequestError> {
        let melanin_index = self
            .melanin_index
            .ok_or(RequestError::MissingField("melaninIndex"))?;
        let undertone = match self.undertone.as_deref().map(str::trim) {
            None | Some("") => return Err(RequestError::MissingField("undertone")),
            Some(raw) => raw.parse::<Undertone>().map_err(|reason| RequestError::InvalidField {
                field: "undertone",
                reason,
            })?,
        };

        Ok(SkinProfile {
            melanin_index,
            undertone,
            skin_type: self.skin_type,
            sensitivity_level: self.sensitivity_level,
            skin_concerns: self.skin_concerns.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub skin_profile: Option<RawSkinProfile>,
}

impl MatchRequest {
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        serde_json::from_str(body).map_err(|e| RequestError::MalformedBody(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResponse {
    pub recommendations: Vec<ScoredProduct>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Validate the request, then score and diversify the catalog.
pub fn handle_match_request(
    request: MatchRequest,
    catalog: &[Product],
    config: &ScoringConfig,
) -> Result<MatchResponse, RequestError> {
    let profile = request
        .skin_profile
        .ok_or(RequestError::MissingField("melaninIndex and undertone"))?
        .into_profile()?;

    if catalog.is_empty() {
        debug!("empty catalog, returning no recommendations");
        return Ok(MatchResponse {
            recommendations: Vec::new(),
        });
    }

    let recommendations = recommend(catalog, &profile, config)
        .into_iter()
        .map(|mut scored| {
            // The wire response carries the score only
            scored.breakdown = None;
            scored
        })
        .collect();

    Ok(MatchResponse { recommendations })
}

/// Run a raw JSON body through the handler and return `(status, json)`.
pub fn handle_json(body: &str, catalog: &[Product], config: &ScoringConfig) -> (u16, String) {
    let outcome = MatchRequest::from_json(body)
        .and_then(|request| handle_match_request(request, catalog, config));

    let (status, payload) = match outcome {
        Ok(response) => (200, serde_json::to_string(&response)),
        Err(e) => {
            warn!(error = %e, "rejected match request");
            (
                e.status_code(),
                serde_json::to_string(&ErrorBody {
                    error: e.to_string(),
                }),
            )
        }
    };

    match payload {
        Ok(json) => (status, json),
        Err(e) => (500, format!("{{\"error\":\"failed to encode response: {}\"}}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, melanin: (i32, i32)) -> Product {
        Product {
            id: id.to_string(),
            brand: "Brand".to_string(),
            name: id.to_string(),
            category: category.to_string(),
            subcategory: None,
            melanin_min: melanin.0,
            melanin_max: melanin.1,
            undertones: vec!["Neutral".to_string()],
            skin_types: vec![],
            concerns: vec![],
            ingredients: vec![],
            safety_rating: None,
            shade_hex: None,
            price_usd: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("lip-a", "lip", (3, 3)),
            product("lip-b", "lip", (2, 4)),
            product("lip-c", "lip", (1, 6)),
            product("base-a", "base", (5, 6)),
        ]
    }

    #[test]
    fn test_valid_request() {
        let request = MatchRequest::from_json(
            r#"{"skinProfile": {"melaninIndex": 3, "undertone": "Warm"}}"#,
        )
        .unwrap();
        let response = handle_match_request(request, &catalog(), &ScoringConfig::default()).unwrap();

        let ids: Vec<_> = response
            .recommendations
            .iter()
            .map(|p| p.product.id.as_str())
            .collect();
        // lip-c (center 3.5, in range) is third in its category and dropped
        assert_eq!(ids, vec!["lip-a", "lip-b", "base-a"]);
        assert!(response.recommendations.iter().all(|p| p.breakdown.is_none()));
    }

    #[test]
    fn test_missing_concerns_default_to_empty() {
        let raw = RawSkinProfile {
            melanin_index: Some(2),
            undertone: Some("Cool".to_string()),
            ..RawSkinProfile::default()
        };
        let profile = raw.into_profile().unwrap();
        assert!(profile.skin_concerns.is_empty());
    }

    #[test]
    fn test_missing_profile() {
        let err = handle_match_request(MatchRequest::default(), &catalog(), &ScoringConfig::default())
            .unwrap_err();
        assert!(matches!(err, RequestError::MissingField(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_missing_melanin_index() {
        let request = MatchRequest::from_json(r#"{"skinProfile": {"undertone": "Warm"}}"#).unwrap();
        let err = handle_match_request(request, &catalog(), &ScoringConfig::default()).unwrap_err();
        assert_eq!(err, RequestError::MissingField("melaninIndex"));
    }

    #[test]
    fn test_empty_undertone() {
        let request =
            MatchRequest::from_json(r#"{"skinProfile": {"melaninIndex": 3, "undertone": " "}}"#)
                .unwrap();
        let err = handle_match_request(request, &catalog(), &ScoringConfig::default()).unwrap_err();
        assert_eq!(err, RequestError::MissingField("undertone"));
    }

    #[test]
    fn test_unknown_undertone() {
        let request =
            MatchRequest::from_json(r#"{"skinProfile": {"melaninIndex": 3, "undertone": "Olive"}}"#)
                .unwrap();
        let err = handle_match_request(request, &catalog(), &ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, RequestError::InvalidField { field: "undertone", .. }));
    }

    #[test]
    fn test_lowercase_undertone_rejected() {
        // Profile files reject it too, so both entry points agree
        let (status, body) = handle_json(
            r#"{"skinProfile": {"melaninIndex": 3, "undertone": "warm"}}"#,
            &catalog(),
            &ScoringConfig::default(),
        );
        assert_eq!(status, 400);
        assert!(body.contains("unknown undertone 'warm'"));
        assert!(serde_json::from_str::<SkinProfile>(r#"{"melaninIndex": 3, "undertone": "warm"}"#).is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let request = MatchRequest::from_json(
            r#"{"skinProfile": {"melaninIndex": 3, "undertone": "Warm"}}"#,
        )
        .unwrap();
        let response = handle_match_request(request, &[], &ScoringConfig::default()).unwrap();
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_handle_json_success() {
        let (status, body) = handle_json(
            r#"{"skinProfile": {"melaninIndex": 3, "undertone": "Warm", "skinConcerns": []}}"#,
            &catalog(),
            &ScoringConfig::default(),
        );
        assert_eq!(status, 200);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let recs = value["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs[0]["matchScore"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_handle_json_malformed() {
        let (status, body) = handle_json("{oops", &catalog(), &ScoringConfig::default());
        assert_eq!(status, 400);
        assert!(body.contains("invalid JSON request"));
    }
}
