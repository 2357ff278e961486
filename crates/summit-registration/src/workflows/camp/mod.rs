//! Camp Essence: a single fixed-price event with a flat per-attendee rate,
//! full contact details for every attendee, and a required policy
//! acknowledgment.

pub mod domain;
pub mod submission;
pub mod validation;

pub use domain::{
    camp_dates, camp_payment_options, camp_total, CampPaymentMethod, CampPaymentOption,
    CampRegistrationRequest, CAMP_ESSENCE_END_DATE, CAMP_ESSENCE_EVENT_DATE_TIMESTAMP_MS,
    CAMP_ESSENCE_EVENT_NAME, CAMP_ESSENCE_FORM_GUID, CAMP_ESSENCE_LOCATION,
    CAMP_ESSENCE_MAX_ATTENDEES, CAMP_ESSENCE_PRICE_PER_ATTENDEE, CAMP_ESSENCE_START_DATE,
};
pub use submission::{CampRegistration, CAMP_PAGE_NAME};
pub use validation::validate_camp_registration;
