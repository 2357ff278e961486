//! Forms-ingestion gateway used to forward normalized registrations.

use async_trait::async_trait;

use super::payload::FormSubmission;
use crate::config::HubSpotConfig;

/// Which CRM form a submission targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Summit,
    CampEssence,
}

impl FormKind {
    pub const fn label(self) -> &'static str {
        match self {
            FormKind::Summit => "summit",
            FormKind::CampEssence => "camp_essence",
        }
    }

    /// Environment variable that names this form's guid.
    pub const fn guid_variable(self) -> &'static str {
        match self {
            FormKind::Summit => "HUBSPOT_REGISTRATION_FORM_GUID",
            FormKind::CampEssence => "HUBSPOT_CAMP_ESSENCE_FORM_GUID",
        }
    }
}

#[async_trait]
pub trait FormsGateway: Send + Sync {
    async fn submit(&self, form: FormKind, submission: &FormSubmission) -> Result<(), SubmissionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("form submission is not configured: {0} is missing")]
    MissingConfiguration(&'static str),
    #[error("form {form_guid} was not found in portal {portal_id}: {message}")]
    FormNotFound {
        portal_id: String,
        form_guid: String,
        message: String,
    },
    #[error("forms API rejected the submission with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("forms API request failed: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SubmissionError::MissingConfiguration(_))
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(error: reqwest::Error) -> Self {
        SubmissionError::Transport(error.to_string())
    }
}

/// Whether an error body from the forms API means the form guid is unknown.
pub fn is_form_not_found_message(message: &str) -> bool {
    let normalized = message.to_lowercase();
    ["can't be found", "cannot be found", "form with guid"]
        .iter()
        .any(|marker| normalized.contains(marker))
}

/// Prefer the JSON `message` field of an error body, else the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Posts submissions to the public forms-ingestion endpoint.
#[derive(Debug, Clone)]
pub struct HubSpotFormsClient {
    client: reqwest::Client,
    forms_base_url: String,
    portal_id: Option<String>,
    registration_form_guid: Option<String>,
    camp_essence_form_guid: Option<String>,
}

impl HubSpotFormsClient {
    pub fn new(client: reqwest::Client, config: &HubSpotConfig) -> Self {
        Self {
            client,
            forms_base_url: config.forms_base_url.trim_end_matches('/').to_string(),
            portal_id: config.portal_id.clone(),
            registration_form_guid: config.registration_form_guid.clone(),
            camp_essence_form_guid: config.camp_essence_form_guid.clone(),
        }
    }

    fn target(&self, form: FormKind) -> Result<(&str, &str), SubmissionError> {
        let portal_id = self
            .portal_id
            .as_deref()
            .ok_or(SubmissionError::MissingConfiguration("HUBSPOT_PORTAL_ID"))?;
        let form_guid = match form {
            FormKind::Summit => self.registration_form_guid.as_deref(),
            FormKind::CampEssence => self.camp_essence_form_guid.as_deref(),
        }
        .ok_or(SubmissionError::MissingConfiguration(form.guid_variable()))?;
        Ok((portal_id, form_guid))
    }
}

#[async_trait]
impl FormsGateway for HubSpotFormsClient {
    async fn submit(&self, form: FormKind, submission: &FormSubmission) -> Result<(), SubmissionError> {
        let (portal_id, form_guid) = self.target(form)?;
        let url = format!(
            "{}/submissions/v3/integration/submit/{portal_id}/{form_guid}",
            self.forms_base_url
        );

        let response = self.client.post(url).json(submission).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::info!(form = form.label(), %portal_id, %form_guid, "registration forwarded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::error!(
            form = form.label(),
            status = status.as_u16(),
            %portal_id,
            %form_guid,
            error = %body,
            "forms API rejected submission"
        );

        if is_form_not_found_message(&message) {
            return Err(SubmissionError::FormNotFound {
                portal_id: portal_id.to_string(),
                form_guid: form_guid.to_string(),
                message,
            });
        }

        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_form_not_found_markers() {
        assert!(is_form_not_found_message(
            "The form with GUID d994766d can't be found"
        ));
        assert!(is_form_not_found_message("Form Cannot Be Found"));
        assert!(!is_form_not_found_message("Invalid email address"));
    }

    #[test]
    fn error_message_prefers_json_field() {
        assert_eq!(
            error_message(r#"{"status":"error","message":"Form with guid x"}"#),
            "Form with guid x"
        );
        assert_eq!(error_message("upstream exploded"), "upstream exploded");
        assert_eq!(error_message(r#"{"status":"error"}"#), r#"{"status":"error"}"#);
    }

    #[test]
    fn missing_portal_is_a_configuration_error() {
        let config = HubSpotConfig::default();
        let client = HubSpotFormsClient::new(reqwest::Client::new(), &config);

        let error = client.target(FormKind::Summit).expect_err("portal missing");
        assert!(error.is_configuration());
        assert_eq!(
            error.to_string(),
            "form submission is not configured: HUBSPOT_PORTAL_ID is missing"
        );
    }
}
