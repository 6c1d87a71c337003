//! Fire-and-forget trigger for the external feed-generation service.
//!
//! The service produces ranked content rows for a user; this client only asks
//! it to refresh and re-reads the stored rows elsewhere. Delivery is
//! best-effort: the outcome is logged, never surfaced.

/// Build the generation endpoint URL for a user and language
pub fn generation_url(base: &str, user_id: &str, lang: &str) -> String {
    format!(
        "{}/feed/generate/{}/{}",
        base.trim_end_matches('/'),
        user_id,
        lang
    )
}

/// Ask the feed service to regenerate a user's feed.
///
/// Fire-and-forget: failures are logged and never propagated.
pub async fn trigger_generation(http: &reqwest::Client, base: &str, user_id: &str, lang: &str) {
    let url = generation_url(base, user_id, lang);

    match http.post(&url).send().await {
        Ok(response) if response.status().is_success() => {
            tracing::info!("Feed refresh triggered for '{}'", user_id);
        }
        Ok(response) => {
            tracing::warn!("Feed service returned HTTP {}", response.status());
        }
        Err(e) => {
            tracing::warn!("Feed trigger failed: {}", e);
        }
    }
}
