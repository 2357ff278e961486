use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::hubspot::{
    EventDirectory, EventDirectoryError, FormKind, FormSubmission, FormsGateway, SubmissionError,
    Summit,
};
use crate::workflows::intake::{registration_router, RegistrationService};
use crate::workflows::summit::PricingTable;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date")
}

pub(super) fn summit(id: &str, year: i32, month: u32, day: u32, location: &str) -> Summit {
    Summit {
        id: id.to_string(),
        start_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        location: location.to_string(),
    }
}

/// Forms gateway that records payloads, or fails the way it was told to.
#[derive(Default)]
pub(super) struct RecordingForms {
    pub submissions: Mutex<Vec<(FormKind, FormSubmission)>>,
    pub failure: Option<FormsFailure>,
}

#[derive(Clone, Copy)]
pub(super) enum FormsFailure {
    Unconfigured,
    FormNotFound,
    Rejected,
}

impl RecordingForms {
    pub fn failing(failure: FormsFailure) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    pub fn recorded(&self) -> Vec<(FormKind, FormSubmission)> {
        self.submissions.lock().expect("forms mutex poisoned").clone()
    }
}

#[async_trait]
impl FormsGateway for RecordingForms {
    async fn submit(&self, form: FormKind, submission: &FormSubmission) -> Result<(), SubmissionError> {
        match self.failure {
            None => {
                self.submissions
                    .lock()
                    .expect("forms mutex poisoned")
                    .push((form, submission.clone()));
                Ok(())
            }
            Some(FormsFailure::Unconfigured) => {
                Err(SubmissionError::MissingConfiguration("HUBSPOT_PORTAL_ID"))
            }
            Some(FormsFailure::FormNotFound) => Err(SubmissionError::FormNotFound {
                portal_id: "4455".to_string(),
                form_guid: "missing-guid".to_string(),
                message: "Form with guid missing-guid can't be found".to_string(),
            }),
            Some(FormsFailure::Rejected) => Err(SubmissionError::Rejected {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        }
    }
}

/// In-memory directory holding every summit ever scheduled.
#[derive(Default)]
pub(super) struct MemoryDirectory {
    pub summits: Vec<Summit>,
    pub unconfigured: bool,
}

impl MemoryDirectory {
    pub fn with_schedule() -> Self {
        Self {
            summits: vec![
                summit("900", 2025, 9, 14, "Omaha"),
                summit("18233", 2026, 3, 15, "Des Moines"),
                summit("18301", 2026, 4, 19, "Denver"),
            ],
            unconfigured: false,
        }
    }
}

#[async_trait]
impl EventDirectory for MemoryDirectory {
    async fn upcoming(&self, today: NaiveDate) -> Result<Vec<Summit>, EventDirectoryError> {
        if self.unconfigured {
            return Err(EventDirectoryError::MissingConfiguration(
                "HUBSPOT_PRIVATE_APP_TOKEN",
            ));
        }
        Ok(self
            .summits
            .iter()
            .filter(|summit| summit.is_upcoming(today))
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Summit>, EventDirectoryError> {
        if self.unconfigured {
            return Err(EventDirectoryError::MissingConfiguration(
                "HUBSPOT_PRIVATE_APP_TOKEN",
            ));
        }
        Ok(self.summits.iter().find(|summit| summit.id == id).cloned())
    }
}

pub(super) type TestService = RegistrationService<RecordingForms, MemoryDirectory>;

pub(super) fn build_service(forms: RecordingForms, directory: MemoryDirectory) -> (Arc<TestService>, Arc<RecordingForms>) {
    let forms = Arc::new(forms);
    let service = RegistrationService::new(forms.clone(), Arc::new(directory), PricingTable::tiered())
        .with_today(today());
    (Arc::new(service), forms)
}

pub(super) fn router_with(forms: RecordingForms, directory: MemoryDirectory) -> (axum::Router, Arc<RecordingForms>) {
    let (service, forms) = build_service(forms, directory);
    (registration_router(service), forms)
}

pub(super) fn summit_body() -> Value {
    json!({
        "summitId": "18233",
        "salonName": "Copper & Comb",
        "city": "Des Moines",
        "state": "IA",
        "primaryAttendee": {
            "firstName": "Dana",
            "lastName": "Whitfield",
            "email": "dana@copperandcomb.com",
            "phone": "(515) 555-0199"
        },
        "isAlumni": true,
        "totalAttendees": 3,
        "additionalAttendees": [
            { "fullName": "Rae Okafor" },
            { "fullName": "Milo Brandt" }
        ],
        "paymentMethod": "credit",
        "totalPrice": 1
    })
}

pub(super) fn camp_body() -> Value {
    json!({
        "salonName": "Alpine Strand",
        "city": "Boulder",
        "state": "CO",
        "primaryAttendee": {
            "firstName": "Jules",
            "lastName": "Marten",
            "email": "jules@alpinestrand.com",
            "phone": "720 555 0100"
        },
        "totalAttendees": 2,
        "additionalAttendees": [
            { "fullName": "Ari Lane", "email": "ari@alpinestrand.com", "phone": "303-555-0142" }
        ],
        "paymentMethod": "loyalty_points",
        "cancellationPolicyAccepted": true
    })
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
