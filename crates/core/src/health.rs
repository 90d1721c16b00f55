use crate::{
    client::AnalysisApi,
    notify::{NotificationRequest, Severity},
};

pub const MODEL_NOT_LOADED_WARNING: &str =
    "Warning: AI model not loaded. Some features may be limited.";

/// Ask the backend whether the model is up.
///
/// Returns the warning to show, if any. Failures are logged and swallowed so a
/// dead health endpoint never gets in the way of analysing a video.
pub async fn probe(api: &dyn AnalysisApi) -> Option<NotificationRequest> {
    match api.health().await {
        Ok(status) if status.model_loaded => {
            tracing::debug!(status = ?status.status, "backend healthy");
            None
        }
        Ok(status) => {
            tracing::info!(status = ?status.status, "backend reports model not loaded");
            Some(NotificationRequest::new(
                MODEL_NOT_LOADED_WARNING,
                Severity::Warning,
            ))
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not check server health");
            None
        }
    }
}
