//! Building blocks shared by the Summit and Camp Essence registration forms.
//!
//! Both products collect the same salon and primary-attendee details, keep an
//! additional-attendee roster sized from the attendee count, and report failures
//! as a field-path keyed [`ValidationReport`].

pub mod domain;
pub mod format;
pub mod locale;
pub mod report;
pub mod roster;
pub mod schema;

pub use domain::{AttendeeContact, AttendeeName, PrimaryAttendee, SalonInfo};
pub use format::{format_currency, format_date_range, format_summit_date_range};
pub use locale::{is_canadian_province, is_known_region};
pub use report::{ValidationReport, FOCUS_ORDER};
pub use roster::{additional_slots, sync_roster};
