use serde::Serialize;

use super::domain::{
    camp_total, CampPaymentMethod, CampRegistrationRequest, CAMP_ESSENCE_EVENT_DATE_TIMESTAMP_MS,
    CAMP_ESSENCE_LOCATION,
};
use super::validation::{validate_camp_registration, PAYMENT_REQUIRED};
use crate::workflows::hubspot::{FormField, FormSubmission, SubmissionContext};
use crate::workflows::registration::{AttendeeContact, PrimaryAttendee, SalonInfo, ValidationReport};

pub const CAMP_PAGE_NAME: &str = "Camp Essence Registration";

/// A validated Camp Essence registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampRegistration {
    pub salon: SalonInfo,
    pub primary_attendee: PrimaryAttendee,
    pub total_attendees: u8,
    pub additional_attendees: Vec<AttendeeContact>,
    pub payment_method: CampPaymentMethod,
    pub total: u32,
}

impl CampRegistration {
    pub fn from_request(request: &CampRegistrationRequest) -> Result<Self, ValidationReport> {
        let report = validate_camp_registration(request);
        if !report.is_empty() {
            return Err(report);
        }

        let payment_method = CampPaymentMethod::parse(&request.payment_method).ok_or_else(|| {
            let mut report = ValidationReport::new();
            report.push("paymentMethod", PAYMENT_REQUIRED);
            report
        })?;

        Ok(Self {
            salon: request.salon.clone(),
            primary_attendee: request.primary_attendee.clone(),
            total_attendees: request.total_attendees,
            additional_attendees: request.additional_attendees.clone(),
            payment_method,
            total: camp_total(request.total_attendees),
        })
    }

    /// Blank-line separated blocks, numbered from 2 since the registrant is 1.
    pub fn additional_attendee_block(&self) -> String {
        self.additional_attendees
            .iter()
            .enumerate()
            .map(|(index, attendee)| {
                format!(
                    "Attendee {}:\nName: {}\nEmail: {}\nPhone: {}",
                    index + 2,
                    attendee.full_name.trim(),
                    attendee.email.trim(),
                    attendee.phone.trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn normalize(&self, context: SubmissionContext) -> FormSubmission {
        let attendee = &self.primary_attendee;
        let fields = vec![
            FormField::new("camp_essence_registration_location", CAMP_ESSENCE_LOCATION),
            FormField::new(
                "camp_essence_registration_event_date",
                CAMP_ESSENCE_EVENT_DATE_TIMESTAMP_MS.to_string(),
            ),
            FormField::new("camp_essence_registration_salon_name", self.salon.salon_name.trim()),
            FormField::new("camp_essence_registration_salon_city", self.salon.city.trim()),
            FormField::new("camp_essence_registration_salon_state", self.salon.state.trim()),
            FormField::new(
                "camp_essence_registration_number_of_attendees",
                self.total_attendees.to_string(),
            ),
            FormField::new(
                "camp_essence_registration_additional_attendees",
                self.additional_attendee_block(),
            ),
            FormField::new(
                "camp_essence_registration_payment_method",
                self.payment_method.as_str(),
            ),
            FormField::new("camp_essence_registration_total_amount", self.total.to_string()),
            FormField::new("camp_essence_cancellation_policy", "true"),
            FormField::new("firstname", attendee.first_name.trim()),
            FormField::new("lastname", attendee.last_name.trim()),
            FormField::new("email", attendee.email.trim()),
        ];

        FormSubmission { fields, context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::camp::validation::{POLICY_REQUIRED, ROSTER_MISMATCH, STATE_REQUIRED};

    fn contact(name: &str, email: &str) -> AttendeeContact {
        AttendeeContact {
            full_name: name.to_string(),
            email: email.to_string(),
            phone: "303-555-0142".to_string(),
        }
    }

    fn request() -> CampRegistrationRequest {
        CampRegistrationRequest {
            salon: SalonInfo {
                salon_name: "Alpine Strand".to_string(),
                city: "Boulder".to_string(),
                state: "CO".to_string(),
            },
            primary_attendee: PrimaryAttendee {
                first_name: "Jules".to_string(),
                last_name: "Marten".to_string(),
                email: "jules@alpinestrand.com".to_string(),
                phone: Some("720 555 0100".to_string()),
            },
            total_attendees: 4,
            additional_attendees: vec![
                contact("Ari Lane", "ari@alpinestrand.com"),
                contact("Bea Cho", "bea@alpinestrand.com"),
                contact("Cy Ortiz", "cy@alpinestrand.com"),
            ],
            payment_method: "credit_card_payment_plan".to_string(),
            cancellation_policy_accepted: true,
        }
    }

    #[test]
    fn four_attendees_total_7800() {
        let registration = CampRegistration::from_request(&request()).expect("valid");
        assert_eq!(registration.total, 7800);

        let payload = registration.normalize(SubmissionContext::new(None, None, CAMP_PAGE_NAME));
        assert_eq!(payload.field("camp_essence_registration_total_amount"), Some("7800"));
        assert_eq!(
            payload.field("camp_essence_registration_event_date"),
            Some("1784764800000")
        );
        assert_eq!(
            payload.field("camp_essence_registration_payment_method"),
            Some("credit_card_payment_plan")
        );
        assert_eq!(payload.context.hutk, None);
        assert_eq!(payload.field_names().first(), Some(&"camp_essence_registration_location"));
        assert_eq!(payload.field_names().last(), Some(&"email"));
    }

    #[test]
    fn roster_must_match_attendee_count() {
        let mut short = request();
        short.additional_attendees.pop();
        let errors = CampRegistration::from_request(&short).expect_err("two of three");
        assert_eq!(errors.messages("additionalAttendees"), [ROSTER_MISMATCH]);
    }

    #[test]
    fn attendee_block_numbers_from_two() {
        let mut single = request();
        single.set_total_attendees(2);
        let registration = CampRegistration::from_request(&single).expect("valid");

        assert_eq!(
            registration.additional_attendee_block(),
            "Attendee 2:\nName: Ari Lane\nEmail: ari@alpinestrand.com\nPhone: 303-555-0142"
        );
    }

    #[test]
    fn every_failing_rule_is_reported() {
        let mut bad = request();
        bad.salon.state = "XX".to_string();
        bad.primary_attendee.phone = None;
        bad.payment_method = "combo".to_string();
        bad.cancellation_policy_accepted = false;
        bad.total_attendees = 7;
        bad.additional_attendees[1].phone = "12345".to_string();

        let errors = validate_camp_registration(&bad);
        assert_eq!(errors.messages("state"), [STATE_REQUIRED]);
        assert_eq!(
            errors.messages("primaryAttendee.phone"),
            ["Mobile phone is required"]
        );
        assert_eq!(errors.messages("paymentMethod"), [PAYMENT_REQUIRED]);
        assert_eq!(errors.messages("cancellationPolicyAccepted"), [POLICY_REQUIRED]);
        assert_eq!(errors.messages("totalAttendees"), ["Maximum 6 attendees"]);
        assert_eq!(
            errors.messages("additionalAttendees.1.phone"),
            ["Please enter a valid US/CA phone number"]
        );
        assert_eq!(errors.first_error(), Some("state"));
    }
}
