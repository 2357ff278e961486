//! CRM collaborators: the forms-ingestion endpoint that receives registrations
//! and the custom-object directory that lists scheduled summits.

pub mod events;
pub mod forms;
pub mod payload;

pub use events::{
    resolve_event, EventDirectory, EventDirectoryError, EventLookup, HubSpotEventDirectory, Summit,
};
pub use forms::{is_form_not_found_message, FormKind, FormsGateway, HubSpotFormsClient, SubmissionError};
pub use payload::{visitor_token_from_cookies, FormField, FormSubmission, SubmissionContext};
