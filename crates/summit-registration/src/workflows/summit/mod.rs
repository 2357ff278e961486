//! Summit registration: classification answers, tiered pricing, cross-field
//! validation, and the normalized CRM payload.
//!
//! Derived values are plain functions of [`RegistrationAnswers`]. A
//! [`RegistrationSession`] owns the answers and reruns them on each edit.

pub mod answers;
pub mod payment;
pub mod pricing;
pub mod session;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use answers::{AnswerEdit, EditEffect, RegistrationAnswers};
pub use payment::{payment_options, toggle_payment, PaymentMethod, PaymentOption, PaymentOptionView, PaymentSelection};
pub use pricing::{
    resolve_registration_type, AttendeeOption, PriceQuote, PriceTier, PricingTable,
    PricingVariant, RegistrantProfile, RegistrationType, ADDITIONAL_ATTENDEE_FEE,
    MAX_SUMMIT_ATTENDEES,
};
pub use session::{RegistrationSession, SessionSnapshot};
pub use submission::{SummitEventDetails, SummitRegistration, SUMMIT_PAGE_NAME};
pub use validation::{requirements, validate_answers, validate_registration, FieldRequirements};
