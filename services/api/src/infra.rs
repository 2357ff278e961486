use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use summit_registration::config::HubSpotConfig;
use summit_registration::workflows::hubspot::{HubSpotEventDirectory, HubSpotFormsClient};
use summit_registration::workflows::intake::RegistrationService;
use summit_registration::workflows::summit::{PricingTable, PricingVariant, RegistrantProfile};

pub(crate) type HubSpotRegistrationService =
    RegistrationService<HubSpotFormsClient, HubSpotEventDirectory>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Both gateways share one connection pool.
pub(crate) fn hubspot_service(
    config: &HubSpotConfig,
    pricing: PricingVariant,
) -> HubSpotRegistrationService {
    let client = reqwest::Client::new();
    RegistrationService::new(
        Arc::new(HubSpotFormsClient::new(client.clone(), config)),
        Arc::new(HubSpotEventDirectory::new(client, config)),
        PricingTable::for_variant(pricing),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_pricing(raw: &str) -> Result<PricingVariant, String> {
    PricingVariant::parse(raw).ok_or_else(|| format!("unknown pricing table '{raw}' (tiered|flat)"))
}

pub(crate) fn parse_profile(raw: &str) -> Result<RegistrantProfile, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "alumni" => Ok(RegistrantProfile::Alumni),
        "level" | "level-member" => Ok(RegistrantProfile::LevelMember),
        "non-member" | "non-level-member" => Ok(RegistrantProfile::NonLevelMember),
        _ => Err(format!(
            "unknown profile '{raw}' (alumni|level-member|non-level-member)"
        )),
    }
}
