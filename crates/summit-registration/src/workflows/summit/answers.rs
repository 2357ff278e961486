use serde::{Deserialize, Serialize};

use super::payment::{toggle_payment, PaymentMethod, PaymentOption};
use super::pricing::RegistrantProfile;
use super::validation::requirements;
use crate::workflows::registration::{sync_roster, AttendeeName, PrimaryAttendee, SalonInfo};

/// Answers collected over one Summit registration session.
///
/// Classification answers are tri-state: `None` means the question has not
/// been answered (or was reset because an upstream answer changed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationAnswers {
    pub summit_id: String,
    #[serde(flatten)]
    pub salon: SalonInfo,
    pub primary_attendee: PrimaryAttendee,
    pub is_alumni: Option<bool>,
    pub is_level_member: Option<bool>,
    pub total_attendees: Option<u8>,
    pub additional_attendees: Vec<AttendeeName>,
    pub payment_method: Option<PaymentMethod>,
}

/// A single user edit applied by the session update loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum AnswerEdit {
    SelectSummit(String),
    SalonName(String),
    City(String),
    State(String),
    PrimaryAttendee(PrimaryAttendee),
    Alumni(bool),
    LevelMember(bool),
    TotalAttendees(u8),
    AdditionalAttendee { index: usize, full_name: String },
    TogglePayment(PaymentOption),
}

/// Fields touched by an edit: the one edited, plus downstream answers the
/// edit invalidated and reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditEffect {
    pub edited: Option<&'static str>,
    pub reset: Vec<&'static str>,
}

impl EditEffect {
    fn edited(field: &'static str) -> Self {
        Self {
            edited: Some(field),
            reset: Vec::new(),
        }
    }

    fn ignored() -> Self {
        Self::default()
    }

    pub fn touched(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.edited.into_iter().chain(self.reset.iter().copied())
    }
}

impl RegistrationAnswers {
    pub fn profile(&self) -> Option<RegistrantProfile> {
        RegistrantProfile::resolve(self.is_alumni, self.is_level_member)
    }

    pub fn loyalty_eligible(&self) -> bool {
        self.profile()
            .map(RegistrantProfile::loyalty_eligible)
            .unwrap_or(false)
    }

    /// Apply `edit`, cascading resets to answers that depended on it.
    pub fn apply(&mut self, edit: AnswerEdit) -> EditEffect {
        let effect = match edit {
            AnswerEdit::SelectSummit(id) => {
                self.summit_id = id;
                EditEffect::edited("summitId")
            }
            AnswerEdit::SalonName(name) => {
                self.salon.salon_name = name;
                EditEffect::edited("salonName")
            }
            AnswerEdit::City(city) => {
                self.salon.city = city;
                EditEffect::edited("city")
            }
            AnswerEdit::State(state) => {
                self.salon.state = state;
                EditEffect::edited("state")
            }
            AnswerEdit::PrimaryAttendee(attendee) => {
                self.primary_attendee = attendee;
                EditEffect::edited("primaryAttendee")
            }
            AnswerEdit::Alumni(value) => self.set_alumni(value),
            AnswerEdit::LevelMember(value) => self.set_level_member(value),
            AnswerEdit::TotalAttendees(total) => self.set_total_attendees(total),
            AnswerEdit::AdditionalAttendee { index, full_name } => {
                match self.additional_attendees.get_mut(index) {
                    Some(attendee) => {
                        attendee.full_name = full_name;
                        EditEffect::edited("additionalAttendees")
                    }
                    None => EditEffect::ignored(),
                }
            }
            AnswerEdit::TogglePayment(option) => self.toggle_payment(option),
        };

        self.drop_ineligible_payment();
        effect
    }

    fn set_alumni(&mut self, value: bool) -> EditEffect {
        if self.is_alumni == Some(value) {
            return EditEffect::edited("isAlumni");
        }

        self.is_alumni = Some(value);
        self.is_level_member = None;
        self.total_attendees = None;
        self.additional_attendees.clear();
        self.payment_method = None;

        EditEffect {
            edited: Some("isAlumni"),
            reset: vec![
                "isLevelMember",
                "totalAttendees",
                "additionalAttendees",
                "paymentMethod",
            ],
        }
    }

    fn set_level_member(&mut self, value: bool) -> EditEffect {
        if self.is_alumni != Some(false) {
            return EditEffect::ignored();
        }
        if self.is_level_member == Some(value) {
            return EditEffect::edited("isLevelMember");
        }

        self.is_level_member = Some(value);
        self.total_attendees = None;
        self.additional_attendees.clear();
        self.payment_method = None;

        EditEffect {
            edited: Some("isLevelMember"),
            reset: vec!["totalAttendees", "additionalAttendees", "paymentMethod"],
        }
    }

    fn set_total_attendees(&mut self, total: u8) -> EditEffect {
        if !requirements(self).total_attendees {
            return EditEffect::ignored();
        }
        self.total_attendees = Some(total);
        sync_roster(&mut self.additional_attendees, total);

        EditEffect {
            edited: Some("totalAttendees"),
            reset: vec!["additionalAttendees"],
        }
    }

    fn toggle_payment(&mut self, option: PaymentOption) -> EditEffect {
        if option == PaymentOption::Loyalty && !self.loyalty_eligible() {
            return EditEffect::ignored();
        }
        self.payment_method = toggle_payment(self.payment_method, option);
        EditEffect::edited("paymentMethod")
    }

    fn drop_ineligible_payment(&mut self) {
        let uses_loyalty = self
            .payment_method
            .map(PaymentMethod::uses_loyalty)
            .unwrap_or(false);
        if uses_loyalty && !self.loyalty_eligible() {
            self.payment_method = None;
        }
    }
}
