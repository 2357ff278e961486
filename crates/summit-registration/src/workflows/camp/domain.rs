use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::registration::{sync_roster, AttendeeContact, PrimaryAttendee, SalonInfo};

pub const CAMP_ESSENCE_FORM_GUID: &str = "d994766d-5dce-4837-a6d3-4cd464a75b79";
pub const CAMP_ESSENCE_EVENT_NAME: &str = "Camp Essence";
pub const CAMP_ESSENCE_LOCATION: &str = "Colorado";
pub const CAMP_ESSENCE_START_DATE: &str = "2026-07-23";
pub const CAMP_ESSENCE_END_DATE: &str = "2026-07-26";
/// Start date at UTC midnight, as the CRM date property expects it.
pub const CAMP_ESSENCE_EVENT_DATE_TIMESTAMP_MS: i64 = 1_784_764_800_000;
pub const CAMP_ESSENCE_PRICE_PER_ATTENDEE: u32 = 1950;
pub const CAMP_ESSENCE_MAX_ATTENDEES: u8 = 6;

/// Camp payment choices. Values pass through to the CRM verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampPaymentMethod {
    CreditCard,
    LoyaltyPoints,
    CreditCardPaymentPlan,
}

impl CampPaymentMethod {
    pub const ALL: [CampPaymentMethod; 3] = [
        CampPaymentMethod::CreditCard,
        CampPaymentMethod::LoyaltyPoints,
        CampPaymentMethod::CreditCardPaymentPlan,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CampPaymentMethod::CreditCard => "credit_card",
            CampPaymentMethod::LoyaltyPoints => "loyalty_points",
            CampPaymentMethod::CreditCardPaymentPlan => "credit_card_payment_plan",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampPaymentOption {
    pub id: CampPaymentMethod,
    pub label: &'static str,
    pub description: &'static str,
}

pub fn camp_payment_options() -> Vec<CampPaymentOption> {
    CampPaymentMethod::ALL
        .into_iter()
        .map(|id| {
            let (label, description) = match id {
                CampPaymentMethod::CreditCard => {
                    ("Credit Card", "We'll send you a secure payment link.")
                }
                CampPaymentMethod::LoyaltyPoints => (
                    "Loyalty Points",
                    "Apply eligible loyalty points toward your registration.",
                ),
                CampPaymentMethod::CreditCardPaymentPlan => (
                    "Credit Card Payment Plan",
                    "Split payment across installments on a credit card.",
                ),
            };
            CampPaymentOption {
                id,
                label,
                description,
            }
        })
        .collect()
}

/// Flat per-attendee price.
pub fn camp_total(total_attendees: u8) -> u32 {
    u32::from(total_attendees) * CAMP_ESSENCE_PRICE_PER_ATTENDEE
}

pub fn camp_dates() -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(CAMP_ESSENCE_START_DATE, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(CAMP_ESSENCE_END_DATE, "%Y-%m-%d").ok()?;
    Some((start, end))
}

/// Camp Essence form as posted by the browser.
///
/// The payment method stays a raw string so an unknown value surfaces as a
/// field error rather than a body rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampRegistrationRequest {
    #[serde(flatten)]
    pub salon: SalonInfo,
    pub primary_attendee: PrimaryAttendee,
    pub total_attendees: u8,
    pub additional_attendees: Vec<AttendeeContact>,
    pub payment_method: String,
    pub cancellation_policy_accepted: bool,
}

impl Default for CampRegistrationRequest {
    fn default() -> Self {
        Self {
            salon: SalonInfo::default(),
            primary_attendee: PrimaryAttendee::default(),
            total_attendees: 1,
            additional_attendees: Vec::new(),
            payment_method: String::new(),
            cancellation_policy_accepted: false,
        }
    }
}

impl CampRegistrationRequest {
    /// Resize the contact roster after the attendee count changes.
    pub fn set_total_attendees(&mut self, total_attendees: u8) {
        self.total_attendees = total_attendees;
        sync_roster(&mut self.additional_attendees, total_attendees);
    }

    pub fn total(&self) -> u32 {
        camp_total(self.total_attendees)
    }
}
