use super::domain::{CampPaymentMethod, CampRegistrationRequest, CAMP_ESSENCE_MAX_ATTENDEES};
use crate::workflows::registration::schema::{self, PhoneRule};
use crate::workflows::registration::{additional_slots, ValidationReport};

pub const STATE_REQUIRED: &str = "Please select a state/province";
pub const PAYMENT_REQUIRED: &str = "Please select a payment method";
pub const POLICY_REQUIRED: &str =
    "You must acknowledge the cancellation and refund policy to continue";
pub const ROSTER_MISMATCH: &str = "Please provide details for all additional attendees";

/// Every Camp Essence rule, reported together.
pub fn validate_camp_registration(request: &CampRegistrationRequest) -> ValidationReport {
    let mut report = ValidationReport::new();

    schema::check_salon(&mut report, &request.salon, STATE_REQUIRED);
    schema::check_primary_attendee(
        &mut report,
        &request.primary_attendee,
        PhoneRule::Required {
            missing: "Mobile phone is required",
            invalid: "Please enter a valid US/CA mobile phone number",
        },
    );

    if request.total_attendees < 1 {
        report.push("totalAttendees", "At least 1 attendee is required");
    } else if request.total_attendees > CAMP_ESSENCE_MAX_ATTENDEES {
        report.push(
            "totalAttendees",
            format!("Maximum {CAMP_ESSENCE_MAX_ATTENDEES} attendees"),
        );
    }

    let max_additional = usize::from(CAMP_ESSENCE_MAX_ATTENDEES - 1);
    if request.additional_attendees.len() > max_additional {
        report.push(
            "additionalAttendees",
            format!("Maximum {max_additional} additional attendees"),
        );
    }
    for (index, attendee) in request.additional_attendees.iter().enumerate() {
        schema::check_attendee_contact(&mut report, index, attendee);
    }

    if CampPaymentMethod::parse(&request.payment_method).is_none() {
        report.push("paymentMethod", PAYMENT_REQUIRED);
    }

    if !request.cancellation_policy_accepted {
        report.push("cancellationPolicyAccepted", POLICY_REQUIRED);
    }

    if request.additional_attendees.len() != additional_slots(request.total_attendees) {
        report.push("additionalAttendees", ROSTER_MISMATCH);
    }

    report
}
