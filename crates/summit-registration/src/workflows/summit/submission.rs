use serde::Serialize;

use super::answers::RegistrationAnswers;
use super::payment::PaymentMethod;
use super::pricing::{PriceQuote, PricingTable, RegistrationType};
use super::validation::{
    validate_registration, ALUMNI_REQUIRED, ATTENDEES_REQUIRED, LEVEL_MEMBER_REQUIRED,
    PAYMENT_REQUIRED,
};
use crate::workflows::hubspot::{FormField, FormSubmission, Summit, SubmissionContext};
use crate::workflows::registration::{AttendeeName, PrimaryAttendee, SalonInfo, ValidationReport};

pub const SUMMIT_PAGE_NAME: &str = "Summit Registration";

/// Event metadata stamped onto the outbound payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummitEventDetails {
    pub name: String,
    pub date: String,
}

impl SummitEventDetails {
    pub fn for_summit(summit: &Summit) -> Self {
        Self {
            name: summit.display_name(),
            date: summit.start_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A fully validated Summit registration, priced and ready to forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummitRegistration {
    pub summit_id: String,
    pub salon: SalonInfo,
    pub primary_attendee: PrimaryAttendee,
    pub is_alumni: bool,
    pub is_level_member: bool,
    pub registration_type: RegistrationType,
    pub total_attendees: u8,
    pub additional_attendees: Vec<AttendeeName>,
    pub payment_method: PaymentMethod,
    pub quote: PriceQuote,
}

impl SummitRegistration {
    /// Validate `answers` and price them. The quote is always recomputed
    /// here; a client-supplied total is never trusted.
    pub fn from_answers(
        answers: &RegistrationAnswers,
        table: &PricingTable,
    ) -> Result<Self, ValidationReport> {
        let report = validate_registration(answers, table);
        if !report.is_empty() {
            return Err(report);
        }

        let is_alumni = required(answers.is_alumni, "isAlumni", ALUMNI_REQUIRED)?;
        let profile = required(answers.profile(), "isLevelMember", LEVEL_MEMBER_REQUIRED)?;
        let total_attendees =
            required(answers.total_attendees, "totalAttendees", ATTENDEES_REQUIRED)?;
        let payment_method = required(answers.payment_method, "paymentMethod", PAYMENT_REQUIRED)?;

        let registration_type = profile.registration_type(total_attendees);

        Ok(Self {
            summit_id: answers.summit_id.trim().to_string(),
            salon: answers.salon.clone(),
            primary_attendee: answers.primary_attendee.clone(),
            is_alumni,
            is_level_member: answers.is_level_member.unwrap_or(false),
            registration_type,
            total_attendees,
            additional_attendees: answers.additional_attendees.clone(),
            payment_method,
            quote: table.quote(registration_type, total_attendees),
        })
    }

    /// `1. Name` per line, in roster order.
    pub fn additional_attendee_block(&self) -> String {
        self.additional_attendees
            .iter()
            .enumerate()
            .map(|(index, attendee)| format!("{}. {}", index + 1, attendee.full_name.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn normalize(&self, event: &SummitEventDetails, context: SubmissionContext) -> FormSubmission {
        let attendee = &self.primary_attendee;
        let mut fields = vec![
            FormField::new("summit_registration_summit_name", &event.name),
            FormField::new("summit_registration_summit_date", &event.date),
            FormField::new("summit_registration_salon_name", self.salon.salon_name.trim()),
            FormField::new("summit_registration_salon_city", self.salon.city.trim()),
            FormField::new("summit_registration_salon_state", self.salon.state.trim()),
            FormField::new("summit_registration_alumni", self.is_alumni.to_string()),
            FormField::new(
                "summit_registration_level_member",
                self.is_level_member.to_string(),
            ),
            FormField::new(
                "summit_registration_number_of_attendees",
                self.total_attendees.to_string(),
            ),
            FormField::new("firstname", attendee.first_name.trim()),
            FormField::new("lastname", attendee.last_name.trim()),
            FormField::new("email", attendee.email.trim()),
        ];

        if let Some(phone) = attendee.phone_number() {
            fields.push(FormField::new("mobilephone", phone));
        }

        fields.extend([
            FormField::new(
                "summit_registration_additional_attendees",
                self.additional_attendee_block(),
            ),
            FormField::new(
                "summit_registration_payment_method",
                self.payment_method.external_value(),
            ),
            FormField::new(
                "summit_registration_total_amount",
                self.quote.total.to_string(),
            ),
        ]);

        FormSubmission { fields, context }
    }
}

fn required<T>(value: Option<T>, path: &str, message: &str) -> Result<T, ValidationReport> {
    value.ok_or_else(|| {
        let mut report = ValidationReport::new();
        report.push(path, message);
        report
    })
}
