//! HTTP intake: the service facade over the CRM gateways and the axum router
//! that exposes it.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::{registration_router, QuoteRequest};
pub use service::{
    RegistrationError, RegistrationService, SubmissionReceipt, SummitRegistrationRequest,
    VisitorContext,
};
