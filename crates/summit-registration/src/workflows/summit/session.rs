use serde::Serialize;

use super::answers::{AnswerEdit, RegistrationAnswers};
use super::payment::{payment_options, PaymentOptionView};
use super::pricing::{AttendeeOption, PriceQuote, PricingTable, RegistrationType};
use super::submission::SummitRegistration;
use super::validation::{requirements, validate_field, validate_registration, FieldRequirements};
use crate::workflows::registration::ValidationReport;

/// Caller-owned update loop for one registration session.
///
/// Every edit synchronously recomputes derived state; nothing is cached
/// between calls. Errors only appear once a submit has been attempted, and
/// after that each edit re-checks just the field it touched.
#[derive(Debug, Clone, Default)]
pub struct RegistrationSession {
    answers: RegistrationAnswers,
    table: PricingTable,
    errors: ValidationReport,
    attempted: bool,
}

impl RegistrationSession {
    pub fn new(table: PricingTable) -> Self {
        Self::resume(RegistrationAnswers::default(), table)
    }

    pub fn resume(answers: RegistrationAnswers, table: PricingTable) -> Self {
        Self {
            answers,
            table,
            errors: ValidationReport::new(),
            attempted: false,
        }
    }

    pub fn answers(&self) -> &RegistrationAnswers {
        &self.answers
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn apply(&mut self, edit: AnswerEdit) {
        let effect = self.answers.apply(edit);
        for field in effect.touched() {
            self.errors.clear_field(field);
        }

        if self.attempted {
            if let Some(field) = effect.edited {
                let refreshed = validate_field(&self.answers, &self.table, field);
                self.errors.merge(refreshed);
            }
        }
    }

    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = AnswerEdit>) {
        for edit in edits {
            self.apply(edit);
        }
    }

    /// Run every rule and remember the outcome for display.
    pub fn validate(&mut self) -> &ValidationReport {
        self.attempted = true;
        self.errors = validate_registration(&self.answers, &self.table);
        &self.errors
    }

    /// Validate and, when clean, freeze the answers into a submittable record.
    /// Answers survive a failed attempt untouched.
    pub fn submit(&mut self) -> Result<SummitRegistration, ValidationReport> {
        if !self.validate().is_empty() {
            return Err(self.errors.clone());
        }
        SummitRegistration::from_answers(&self.answers, &self.table)
    }

    pub fn registration_type(&self) -> Option<RegistrationType> {
        let total = self.answers.total_attendees?;
        Some(self.answers.profile()?.registration_type(total))
    }

    pub fn quote(&self) -> Option<PriceQuote> {
        let total = self.answers.total_attendees?;
        Some(self.table.quote(self.registration_type()?, total))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let attendee_options = self
            .answers
            .profile()
            .map(|profile| self.table.attendee_options(profile))
            .unwrap_or_default();

        SessionSnapshot {
            registration_type: self.registration_type(),
            quote: self.quote(),
            requirements: requirements(&self.answers),
            attendee_options,
            payment_options: payment_options(
                self.answers.loyalty_eligible(),
                &self.answers.salon.state,
                self.answers.payment_method,
            ),
            errors: self.errors.clone(),
            focus: self.errors.first_error().map(str::to_string),
        }
    }
}

/// Everything the presentation layer derives from the current answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub registration_type: Option<RegistrationType>,
    pub quote: Option<PriceQuote>,
    pub requirements: FieldRequirements,
    pub attendee_options: Vec<AttendeeOption>,
    pub payment_options: Vec<PaymentOptionView>,
    pub errors: ValidationReport,
    pub focus: Option<String>,
}
