use chrono::NaiveDate;

use crate::workflows::hubspot::Summit;
use crate::workflows::registration::{PrimaryAttendee, SalonInfo};
use crate::workflows::summit::{
    AnswerEdit, PaymentOption, PricingTable, RegistrationAnswers, RegistrationSession,
};

pub(super) fn salon() -> SalonInfo {
    SalonInfo {
        salon_name: "Copper & Comb".to_string(),
        city: "Des Moines".to_string(),
        state: "IA".to_string(),
    }
}

pub(super) fn registrant() -> PrimaryAttendee {
    PrimaryAttendee {
        first_name: "Dana".to_string(),
        last_name: "Whitfield".to_string(),
        email: "dana@copperandcomb.com".to_string(),
        phone: Some("(515) 555-0199".to_string()),
    }
}

pub(super) fn summit() -> Summit {
    Summit {
        id: "18233".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date"),
        location: "Des Moines".to_string(),
    }
}

/// Edits that fill every field before the classification questions.
pub(super) fn contact_edits() -> Vec<AnswerEdit> {
    let salon = salon();
    vec![
        AnswerEdit::SelectSummit(summit().id),
        AnswerEdit::SalonName(salon.salon_name),
        AnswerEdit::City(salon.city),
        AnswerEdit::State(salon.state),
        AnswerEdit::PrimaryAttendee(registrant()),
    ]
}

/// Alumni bringing three people, paying with loyalty points.
pub(super) fn alumni_session() -> RegistrationSession {
    let mut session = RegistrationSession::new(PricingTable::tiered());
    session.apply_all(contact_edits());
    session.apply_all([
        AnswerEdit::Alumni(true),
        AnswerEdit::TotalAttendees(3),
        AnswerEdit::AdditionalAttendee {
            index: 0,
            full_name: "Rae Okafor".to_string(),
        },
        AnswerEdit::AdditionalAttendee {
            index: 1,
            full_name: "Milo Brandt".to_string(),
        },
        AnswerEdit::TogglePayment(PaymentOption::Loyalty),
    ]);
    session
}

pub(super) fn complete_answers() -> RegistrationAnswers {
    alumni_session().answers().clone()
}
