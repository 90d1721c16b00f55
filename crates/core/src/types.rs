use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub title: String,
    pub duration: String,
    pub views: ViewCount,
    pub channel: String,
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_points: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamps: Vec<String>,
}

/// The backend sends views either preformatted ("1.2M") or as a raw count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ViewCount {
    Count(u64),
    Text(String),
    Fractional(f64),
}

impl fmt::Display for ViewCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewCount::Count(n) => write!(f, "{}", n),
            ViewCount::Text(s) => f.write_str(s),
            ViewCount::Fractional(n) => write!(f, "{}", n),
        }
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// `GET /api/health`. Older servers report `ai_available` instead of `model_loaded`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "ai_available")]
    pub model_loaded: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_lists_become_empty() {
        let json = r#"{
            "title": "T", "duration": "3:15", "views": "1.2M",
            "channel": "C", "summary": "S", "key_points": null
        }"#;
        let analysis: VideoAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.key_points.is_empty());
        assert!(analysis.timestamps.is_empty());
        assert_eq!(analysis.video_id, None);
    }

    #[test]
    fn views_accept_numbers_and_strings() {
        let numeric: ViewCount = serde_json::from_str("15230").unwrap();
        assert_eq!(numeric.to_string(), "15230");

        let text: ViewCount = serde_json::from_str(r#""1.2M""#).unwrap();
        assert_eq!(text.to_string(), "1.2M");
    }

    #[test]
    fn health_accepts_legacy_field_name() {
        let legacy: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","ai_available":true}"#).unwrap();
        assert!(legacy.model_loaded);

        let missing: HealthStatus = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert!(!missing.model_loaded);
    }
}
