//! Visibility-gated requiredness for the Summit classification questions,
//! layered over the simple per-field schema rules.

use serde::Serialize;

use super::answers::RegistrationAnswers;
use super::pricing::PricingTable;
use crate::workflows::registration::schema::{self, PhoneRule};
use crate::workflows::registration::{additional_slots, ValidationReport};

pub const SUMMIT_REQUIRED: &str = "Please select a summit";
pub const STATE_REQUIRED: &str = "Please select a valid state";
pub const ALUMNI_REQUIRED: &str = "Please tell us whether you have attended The Summit before";
pub const LEVEL_MEMBER_REQUIRED: &str = "Please tell us whether you are a LEVEL Loyalty member";
pub const ATTENDEES_REQUIRED: &str = "Please select the number of attendees";
pub const PAYMENT_REQUIRED: &str = "Please select a payment method";
pub const LOYALTY_INELIGIBLE: &str = "Loyalty points are only available to alumni and LEVEL members";
pub const ROSTER_MISMATCH: &str = "Please provide names for all additional attendees";

const MOBILE_PHONE_INVALID: &str = "Please enter a valid US/CA mobile phone number";

/// Which classification fields the form currently shows as required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRequirements {
    pub is_alumni: bool,
    pub is_level_member: bool,
    pub total_attendees: bool,
    pub payment_method: bool,
    pub additional_attendee_slots: usize,
}

pub fn requirements(answers: &RegistrationAnswers) -> FieldRequirements {
    let is_level_member = answers.is_alumni == Some(false);
    let total_attendees = match answers.is_alumni {
        Some(true) => true,
        Some(false) => answers.is_level_member.is_some(),
        None => false,
    };
    // A count posted while its question is hidden does not count as answered.
    let counted = answers.total_attendees.filter(|_| total_attendees);

    FieldRequirements {
        is_alumni: true,
        is_level_member,
        total_attendees,
        payment_method: counted.is_some(),
        additional_attendee_slots: counted.map(additional_slots).unwrap_or(0),
    }
}

/// Cross-field rules only. Every failing rule is reported.
pub fn validate_answers(answers: &RegistrationAnswers, table: &PricingTable) -> ValidationReport {
    let mut report = ValidationReport::new();
    let required = requirements(answers);

    if answers.is_alumni.is_none() {
        report.push("isAlumni", ALUMNI_REQUIRED);
    }

    if required.is_level_member && answers.is_level_member.is_none() {
        report.push("isLevelMember", LEVEL_MEMBER_REQUIRED);
    }

    if required.total_attendees {
        match (answers.total_attendees, answers.profile()) {
            (None, _) => report.push("totalAttendees", ATTENDEES_REQUIRED),
            (Some(total), Some(profile)) if !table.admits(profile, total) => {
                let (min, max) = table.admitted_range(profile);
                report.push(
                    "totalAttendees",
                    format!("Please select between {min} and {max} attendees"),
                );
            }
            _ => {}
        }
    }

    if required.payment_method {
        match answers.payment_method {
            None => report.push("paymentMethod", PAYMENT_REQUIRED),
            Some(method) if method.uses_loyalty() && !answers.loyalty_eligible() => {
                report.push("paymentMethod", LOYALTY_INELIGIBLE)
            }
            Some(_) => {}
        }
    }

    if required.payment_method
        && answers.additional_attendees.len() != required.additional_attendee_slots
    {
        report.push("additionalAttendees", ROSTER_MISMATCH);
    }

    report
}

/// Schema rules, cross-field rules, and per-item roster rules combined.
pub fn validate_registration(
    answers: &RegistrationAnswers,
    table: &PricingTable,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if answers.summit_id.trim().is_empty() {
        report.push("summitId", SUMMIT_REQUIRED);
    }
    schema::check_salon(&mut report, &answers.salon, STATE_REQUIRED);
    schema::check_primary_attendee(
        &mut report,
        &answers.primary_attendee,
        PhoneRule::Optional {
            invalid: MOBILE_PHONE_INVALID,
        },
    );

    let roster_visible = requirements(answers).payment_method;
    report.merge(validate_answers(answers, table));

    for (index, attendee) in answers
        .additional_attendees
        .iter()
        .enumerate()
        .filter(|_| roster_visible)
    {
        schema::check_text(
            &mut report,
            &format!("additionalAttendees.{index}.fullName"),
            &attendee.full_name,
            schema::FULL_NAME,
        );
    }

    report
}

/// Re-run the rules that govern `field` and return only its messages.
pub fn validate_field(
    answers: &RegistrationAnswers,
    table: &PricingTable,
    field: &str,
) -> ValidationReport {
    let top_level = field.split('.').next().unwrap_or(field);
    validate_registration(answers, table).extract(top_level)
}
