//! Summit event directory backed by the CRM custom-object API.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::HubSpotConfig;
use crate::workflows::registration::format_summit_date_range;

const SUMMIT_PROPERTIES: &str = "hs_object_id,start_date,location";
const PAGE_LIMIT: u32 = 100;

/// A scheduled Summit as listed by the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summit {
    pub id: String,
    pub start_date: NaiveDate,
    pub location: String,
}

impl Summit {
    /// e.g. `Summit - Des Moines - March 15-16, 2026`.
    pub fn display_name(&self) -> String {
        format!(
            "Summit - {} - {}",
            self.location,
            format_summit_date_range(self.start_date)
        )
    }

    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.start_date >= today
    }
}

#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// Summits starting on or after `today`, soonest first.
    async fn upcoming(&self, today: NaiveDate) -> Result<Vec<Summit>, EventDirectoryError>;

    /// Any summit by id, past or future. `None` when the id never existed.
    async fn fetch(&self, id: &str) -> Result<Option<Summit>, EventDirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EventDirectoryError {
    #[error("event directory is not configured: {0} is missing")]
    MissingConfiguration(&'static str),
    #[error("event directory responded with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("event directory request failed: {0}")]
    Transport(String),
    #[error("event directory returned an unreadable payload: {0}")]
    Malformed(String),
}

impl EventDirectoryError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, EventDirectoryError::MissingConfiguration(_))
    }
}

impl From<reqwest::Error> for EventDirectoryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            EventDirectoryError::Malformed(error.to_string())
        } else {
            EventDirectoryError::Transport(error.to_string())
        }
    }
}

/// Outcome of resolving a summit reference carried in a registration link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLookup {
    Upcoming(Summit),
    /// Existed, but has already taken place.
    Expired(Summit),
    /// Never existed or was removed.
    Missing,
}

impl EventLookup {
    pub fn status(&self) -> &'static str {
        match self {
            EventLookup::Upcoming(_) => "upcoming",
            EventLookup::Expired(_) => "expired",
            EventLookup::Missing => "missing",
        }
    }

    pub fn summit(&self) -> Option<&Summit> {
        match self {
            EventLookup::Upcoming(summit) | EventLookup::Expired(summit) => Some(summit),
            EventLookup::Missing => None,
        }
    }

    /// Copy shown above the summit selector when the reference is stale.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            EventLookup::Upcoming(_) => None,
            EventLookup::Expired(_) => Some(
                "This summit has already taken place. Please select from an upcoming summit below.",
            ),
            EventLookup::Missing => Some(
                "This summit is no longer available. Please select from an upcoming summit below.",
            ),
        }
    }
}

/// Match `id` against the known upcoming list first; only unknown ids cost a
/// directory fetch.
pub async fn resolve_event<D>(
    directory: &D,
    id: &str,
    upcoming: &[Summit],
    today: NaiveDate,
) -> Result<EventLookup, EventDirectoryError>
where
    D: EventDirectory + ?Sized,
{
    if let Some(summit) = upcoming.iter().find(|summit| summit.id == id) {
        return Ok(EventLookup::Upcoming(summit.clone()));
    }

    match directory.fetch(id).await? {
        Some(summit) if summit.is_upcoming(today) => Ok(EventLookup::Upcoming(summit)),
        Some(summit) => Ok(EventLookup::Expired(summit)),
        None => Ok(EventLookup::Missing),
    }
}

/// Reads summits from the CRM object API with a private-app token.
#[derive(Debug, Clone)]
pub struct HubSpotEventDirectory {
    client: reqwest::Client,
    api_base_url: String,
    token: Option<String>,
    object_type_id: Option<String>,
}

impl HubSpotEventDirectory {
    pub fn new(client: reqwest::Client, config: &HubSpotConfig) -> Self {
        Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.private_app_token.clone(),
            object_type_id: config.summit_object_type_id.clone(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), EventDirectoryError> {
        let token = self
            .token
            .as_deref()
            .ok_or(EventDirectoryError::MissingConfiguration(
                "HUBSPOT_PRIVATE_APP_TOKEN",
            ))?;
        let object_type_id =
            self.object_type_id
                .as_deref()
                .ok_or(EventDirectoryError::MissingConfiguration(
                    "HUBSPOT_SUMMIT_OBJECT_TYPE_ID",
                ))?;
        Ok((token, object_type_id))
    }

    async fn search(
        &self,
        token: &str,
        object_type_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<Summit>, EventDirectoryError> {
        let url = format!(
            "{}/crm/v3/objects/{object_type_id}/search",
            self.api_base_url
        );
        let body = json!({
            "filterGroups": [{
                "filters": [{
                    "propertyName": "start_date",
                    "operator": "GTE",
                    "value": midnight_millis(today).to_string(),
                }],
            }],
            "sorts": [{ "propertyName": "start_date", "direction": "ASCENDING" }],
            "properties": ["hs_object_id", "start_date", "location"],
            "limit": PAGE_LIMIT,
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EventDirectoryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let page: CrmPage = response.json().await?;
        Ok(page.results.into_iter().filter_map(CrmObject::into_summit).collect())
    }

    async fn list_all(
        &self,
        token: &str,
        object_type_id: &str,
    ) -> Result<Vec<Summit>, EventDirectoryError> {
        let mut summits = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/crm/v3/objects/{object_type_id}?properties={SUMMIT_PROPERTIES}&limit={PAGE_LIMIT}",
                self.api_base_url
            );
            if let Some(cursor) = &after {
                url.push_str("&after=");
                url.push_str(cursor);
            }

            let response = self.client.get(url).bearer_auth(token).send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(EventDirectoryError::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }

            let page: CrmPage = response.json().await?;
            summits.extend(page.results.into_iter().filter_map(CrmObject::into_summit));

            after = page.paging.and_then(|paging| paging.next).map(|next| next.after);
            if after.is_none() {
                break;
            }
        }

        Ok(summits)
    }
}

#[async_trait]
impl EventDirectory for HubSpotEventDirectory {
    async fn upcoming(&self, today: NaiveDate) -> Result<Vec<Summit>, EventDirectoryError> {
        let (token, object_type_id) = self.credentials()?;

        let mut summits = match self.search(token, object_type_id, today).await {
            Ok(summits) => {
                tracing::debug!(count = summits.len(), "summits found via search");
                summits
            }
            Err(error) => {
                tracing::warn!(%error, "summit search failed, falling back to pagination");
                self.list_all(token, object_type_id).await?
            }
        };

        summits.retain(|summit| summit.is_upcoming(today));
        summits.sort_by_key(|summit| summit.start_date);
        Ok(summits)
    }

    async fn fetch(&self, id: &str) -> Result<Option<Summit>, EventDirectoryError> {
        let (token, object_type_id) = self.credentials()?;
        if !is_object_id(id) {
            tracing::warn!(%id, "ignoring malformed summit id");
            return Ok(None);
        }
        let url = format!(
            "{}/crm/v3/objects/{object_type_id}/{id}?properties={SUMMIT_PROPERTIES}",
            self.api_base_url
        );

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EventDirectoryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let object: CrmObject = response.json().await?;
        match object.into_summit() {
            Some(summit) => Ok(Some(summit)),
            None => Err(EventDirectoryError::Malformed(format!(
                "summit {id} has no readable start_date"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CrmPage {
    #[serde(default)]
    results: Vec<CrmObject>,
    paging: Option<CrmPaging>,
}

#[derive(Debug, Deserialize)]
struct CrmPaging {
    next: Option<CrmCursor>,
}

#[derive(Debug, Deserialize)]
struct CrmCursor {
    after: String,
}

#[derive(Debug, Deserialize)]
struct CrmObject {
    id: String,
    #[serde(default)]
    properties: CrmSummitProperties,
}

#[derive(Debug, Default, Deserialize)]
struct CrmSummitProperties {
    hs_object_id: Option<String>,
    start_date: Option<String>,
    location: Option<String>,
}

impl CrmObject {
    fn into_summit(self) -> Option<Summit> {
        let properties = self.properties;
        let start_date = match properties.start_date.as_deref().and_then(parse_start_date) {
            Some(date) => date,
            None => {
                tracing::warn!(id = %self.id, "skipping summit without a readable start_date");
                return None;
            }
        };

        let id = properties
            .hs_object_id
            .filter(|id| !id.is_empty())
            .unwrap_or(self.id);

        Some(Summit {
            id,
            start_date,
            location: properties.location.unwrap_or_default(),
        })
    }
}

/// CRM object ids are plain tokens; anything else could rewrite the request path.
fn is_object_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Accepts `YYYY-MM-DD`, an ISO timestamp, or epoch milliseconds.
pub(crate) fn parse_start_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        let millis: i64 = value.parse().ok()?;
        return DateTime::<Utc>::from_timestamp_millis(millis).map(|moment| moment.date_naive());
    }

    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

fn midnight_millis(day: NaiveDate) -> i64 {
    let midnight = NaiveDateTime::new(day, chrono::NaiveTime::default());
    Utc.from_utc_datetime(&midnight).timestamp_millis()
}
