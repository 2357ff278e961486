use super::common::*;
use crate::workflows::hubspot::SubmissionContext;
use crate::workflows::summit::{
    PaymentMethod, PricingTable, RegistrationType, SummitEventDetails, SummitRegistration,
    SUMMIT_PAGE_NAME,
};

fn context() -> SubmissionContext {
    SubmissionContext::new(
        Some("visitor-1"),
        Some("https://summit.example.com/register?summit=18233"),
        SUMMIT_PAGE_NAME,
    )
}

#[test]
fn payload_fields_follow_form_order() {
    let registration =
        SummitRegistration::from_answers(&complete_answers(), &PricingTable::tiered())
            .expect("valid registration");
    let payload = registration.normalize(&SummitEventDetails::for_summit(&summit()), context());

    assert_eq!(
        payload.field_names(),
        [
            "summit_registration_summit_name",
            "summit_registration_summit_date",
            "summit_registration_salon_name",
            "summit_registration_salon_city",
            "summit_registration_salon_state",
            "summit_registration_alumni",
            "summit_registration_level_member",
            "summit_registration_number_of_attendees",
            "firstname",
            "lastname",
            "email",
            "mobilephone",
            "summit_registration_additional_attendees",
            "summit_registration_payment_method",
            "summit_registration_total_amount",
        ]
    );
    assert_eq!(
        payload.field("summit_registration_summit_name"),
        Some("Summit - Des Moines - March 15-16, 2026")
    );
    assert_eq!(payload.field("summit_registration_summit_date"), Some("2026-03-15"));
    assert_eq!(payload.field("summit_registration_alumni"), Some("true"));
    assert_eq!(payload.field("summit_registration_level_member"), Some("false"));
    assert_eq!(
        payload.field("summit_registration_additional_attendees"),
        Some("1. Rae Okafor\n2. Milo Brandt")
    );
    assert_eq!(payload.field("summit_registration_payment_method"), Some("level"));
    assert_eq!(payload.field("summit_registration_total_amount"), Some("1850"));
    assert_eq!(payload.context.page_name, "Summit Registration");
}

#[test]
fn mobilephone_omitted_without_phone() {
    let mut answers = complete_answers();
    answers.primary_attendee.phone = Some("  ".to_string());

    let registration = SummitRegistration::from_answers(&answers, &PricingTable::tiered())
        .expect("blank phone is optional");
    let payload = registration.normalize(&SummitEventDetails::default(), context());

    assert_eq!(payload.field("mobilephone"), None);
    assert_eq!(payload.field("summit_registration_summit_name"), Some(""));
}

#[test]
fn combo_passes_through_and_credit_maps() {
    let mut answers = complete_answers();
    answers.payment_method = Some(PaymentMethod::Combo);
    let registration =
        SummitRegistration::from_answers(&answers, &PricingTable::tiered()).expect("valid");
    let payload = registration.normalize(&SummitEventDetails::default(), context());
    assert_eq!(payload.field("summit_registration_payment_method"), Some("combo"));

    answers.payment_method = Some(PaymentMethod::Credit);
    let registration =
        SummitRegistration::from_answers(&answers, &PricingTable::tiered()).expect("valid");
    let payload = registration.normalize(&SummitEventDetails::default(), context());
    assert_eq!(
        payload.field("summit_registration_payment_method"),
        Some("credit_card")
    );
}

#[test]
fn roster_mismatch_blocks_submission() {
    let mut answers = complete_answers();
    answers.additional_attendees.pop();

    let errors = SummitRegistration::from_answers(&answers, &PricingTable::tiered())
        .expect_err("roster short by one");
    assert_eq!(
        errors.messages("additionalAttendees"),
        ["Please provide names for all additional attendees"]
    );
}

#[test]
fn flat_table_prices_level_members_from_one_included() {
    let mut answers = complete_answers();
    answers.is_alumni = Some(false);
    answers.is_level_member = Some(true);

    let registration =
        SummitRegistration::from_answers(&answers, &PricingTable::flat()).expect("valid");
    assert_eq!(registration.registration_type, RegistrationType::LevelMember);
    assert_eq!(registration.quote.total, 1450 + 2 * 600);
}
