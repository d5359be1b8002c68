use metrics_exporter_prometheus::PrometheusHandle;
use poultry_dx::diagnosis::{FecesColor, FecesConsistency, FecesTexture, LocalizedText};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_consistency(raw: &str) -> Result<FecesConsistency, String> {
    FecesConsistency::parse(raw)
        .ok_or_else(|| format!("unknown feces consistency '{raw}' (normal, soft, watery, hard)"))
}

pub(crate) fn parse_color(raw: &str) -> Result<FecesColor, String> {
    FecesColor::parse(raw)
        .ok_or_else(|| format!("unknown feces color '{raw}' (brown, green, yellow, red, white)"))
}

pub(crate) fn parse_texture(raw: &str) -> Result<FecesTexture, String> {
    FecesTexture::parse(raw)
        .ok_or_else(|| format!("unknown feces texture '{raw}' (normal, watery, mucoid, bloody)"))
}

/// Picks `language`, then English, then whatever the text carries.
pub(crate) fn localized<'a>(text: &'a LocalizedText, language: &str) -> &'a str {
    text.get(language)
        .or_else(|| text.get("en"))
        .or_else(|| text.languages().next().and_then(|fallback| text.get(fallback)))
        .unwrap_or_default()
}
