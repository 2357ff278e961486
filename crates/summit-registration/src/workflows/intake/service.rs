use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::camp::{CampRegistration, CampRegistrationRequest, CAMP_PAGE_NAME};
use crate::workflows::hubspot::{
    resolve_event, EventDirectory, EventDirectoryError, EventLookup, FormKind, FormsGateway,
    SubmissionContext, SubmissionError, Summit,
};
use crate::workflows::registration::ValidationReport;
use crate::workflows::summit::{
    AnswerEdit, PricingTable, RegistrationAnswers, RegistrationSession, SessionSnapshot,
    SummitEventDetails, SummitRegistration, SUMMIT_PAGE_NAME,
};

/// Summit form body: the answers plus optional event labels computed by the
/// page. Any posted price is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummitRegistrationRequest {
    #[serde(flatten)]
    pub answers: RegistrationAnswers,
    pub summit_name: Option<String>,
    pub summit_date: Option<String>,
}

/// Request metadata forwarded with a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorContext {
    pub visitor_token: Option<String>,
    pub page_uri: Option<String>,
}

impl VisitorContext {
    fn for_page(&self, page_name: &str) -> SubmissionContext {
        SubmissionContext::new(
            self.visitor_token.as_deref(),
            self.page_uri.as_deref(),
            page_name,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: &'static str,
    pub total: u32,
}

/// Facade combining the rule engines with the CRM collaborators.
pub struct RegistrationService<F, D> {
    forms: Arc<F>,
    directory: Arc<D>,
    pricing: PricingTable,
    today: Option<NaiveDate>,
}

impl<F, D> RegistrationService<F, D>
where
    F: FormsGateway + 'static,
    D: EventDirectory + 'static,
{
    pub fn new(forms: Arc<F>, directory: Arc<D>, pricing: PricingTable) -> Self {
        Self {
            forms,
            directory,
            pricing,
            today: None,
        }
    }

    /// Pin the calendar date used to split upcoming from past summits.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub async fn submit_summit(
        &self,
        request: SummitRegistrationRequest,
        visitor: &VisitorContext,
    ) -> Result<SubmissionReceipt, RegistrationError> {
        let registration = SummitRegistration::from_answers(&request.answers, &self.pricing)
            .map_err(RegistrationError::Validation)?;

        let event = self.event_details(&request).await;
        let payload = registration.normalize(&event, visitor.for_page(SUMMIT_PAGE_NAME));
        self.forms.submit(FormKind::Summit, &payload).await?;

        tracing::info!(
            summit_id = %registration.summit_id,
            registration_type = registration.registration_type.id(),
            attendees = registration.total_attendees,
            total = registration.quote.total,
            "summit registration submitted"
        );

        Ok(SubmissionReceipt {
            success: true,
            message: "Registration submitted successfully",
            total: registration.quote.total,
        })
    }

    pub async fn submit_camp(
        &self,
        request: CampRegistrationRequest,
        visitor: &VisitorContext,
    ) -> Result<SubmissionReceipt, RegistrationError> {
        let registration =
            CampRegistration::from_request(&request).map_err(RegistrationError::Validation)?;

        let payload = registration.normalize(visitor.for_page(CAMP_PAGE_NAME));
        self.forms.submit(FormKind::CampEssence, &payload).await?;

        tracing::info!(
            attendees = registration.total_attendees,
            total = registration.total,
            "camp essence registration submitted"
        );

        Ok(SubmissionReceipt {
            success: true,
            message: "Camp Essence registration submitted successfully",
            total: registration.total,
        })
    }

    pub async fn upcoming_summits(&self) -> Result<Vec<Summit>, RegistrationError> {
        Ok(self.directory.upcoming(self.today()).await?)
    }

    /// Classify a summit id from a registration link.
    pub async fn lookup_summit(&self, id: &str) -> Result<EventLookup, RegistrationError> {
        let today = self.today();
        let upcoming = self.directory.upcoming(today).await?;
        Ok(resolve_event(self.directory.as_ref(), id, &upcoming, today).await?)
    }

    /// Replay `edits` over `answers` and report the derived state.
    pub fn quote(
        &self,
        answers: RegistrationAnswers,
        edits: Vec<AnswerEdit>,
        validate: bool,
    ) -> SessionSnapshot {
        let mut session = RegistrationSession::resume(answers, self.pricing.clone());
        session.apply_all(edits);
        if validate {
            session.validate();
        }
        session.snapshot()
    }

    /// Labels posted by the page win; otherwise the directory is asked, and a
    /// failed lookup leaves the labels blank rather than blocking the
    /// registration.
    async fn event_details(&self, request: &SummitRegistrationRequest) -> SummitEventDetails {
        if let Some(name) = request.summit_name.as_deref().filter(|name| !name.trim().is_empty()) {
            return SummitEventDetails {
                name: name.trim().to_string(),
                date: request.summit_date.clone().unwrap_or_default(),
            };
        }

        let summit_id = request.answers.summit_id.trim();
        match self.directory.fetch(summit_id).await {
            Ok(Some(summit)) => SummitEventDetails::for_summit(&summit),
            Ok(None) => {
                tracing::warn!(%summit_id, "registration references an unknown summit");
                SummitEventDetails::default()
            }
            Err(error) => {
                tracing::warn!(%summit_id, %error, "summit details unavailable");
                SummitEventDetails::default()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration failed validation on {} field(s)", .0.len())]
    Validation(ValidationReport),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Directory(#[from] EventDirectoryError),
}

impl RegistrationError {
    /// Missing credentials or identifiers, as opposed to upstream failures.
    pub fn is_configuration(&self) -> bool {
        match self {
            RegistrationError::Validation(_) => false,
            RegistrationError::Submission(error) => error.is_configuration(),
            RegistrationError::Directory(error) => error.is_configuration(),
        }
    }
}
