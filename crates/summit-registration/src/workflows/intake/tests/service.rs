use super::common::*;
use crate::workflows::camp::CampRegistrationRequest;
use crate::workflows::hubspot::{EventLookup, FormKind};
use crate::workflows::intake::{RegistrationError, SummitRegistrationRequest, VisitorContext};

fn summit_request() -> SummitRegistrationRequest {
    serde_json::from_value(summit_body()).expect("summit request parses")
}

#[tokio::test]
async fn posted_summit_labels_win_over_directory() {
    let (service, forms) = build_service(RecordingForms::default(), MemoryDirectory::with_schedule());
    let mut request = summit_request();
    request.summit_name = Some("Summit - Des Moines - Spring".to_string());
    request.summit_date = Some("2026-03-15".to_string());

    service
        .submit_summit(request, &VisitorContext::default())
        .await
        .expect("submits");

    let recorded = forms.recorded();
    let (_, payload) = &recorded[0];
    assert_eq!(
        payload.field("summit_registration_summit_name"),
        Some("Summit - Des Moines - Spring")
    );
    assert_eq!(payload.context.hutk, None);
    assert_eq!(payload.context.page_uri, "");
}

#[tokio::test]
async fn unknown_summit_leaves_labels_blank() {
    let (service, forms) = build_service(RecordingForms::default(), MemoryDirectory::default());

    service
        .submit_summit(summit_request(), &VisitorContext::default())
        .await
        .expect("lookup failure does not block submission");

    let recorded = forms.recorded();
    assert_eq!(recorded[0].1.field("summit_registration_summit_name"), Some(""));
}

#[tokio::test]
async fn camp_submission_targets_camp_form() {
    let (service, forms) = build_service(RecordingForms::default(), MemoryDirectory::default());
    let request: CampRegistrationRequest =
        serde_json::from_value(camp_body()).expect("camp request parses");

    let receipt = service
        .submit_camp(request, &VisitorContext::default())
        .await
        .expect("submits");

    assert_eq!(receipt.total, 3900);
    let recorded = forms.recorded();
    assert_eq!(recorded[0].0, FormKind::CampEssence);
    assert_eq!(recorded[0].1.context.page_name, "Camp Essence Registration");
    assert_eq!(
        recorded[0].1.field("camp_essence_registration_payment_method"),
        Some("loyalty_points")
    );
}

#[tokio::test]
async fn camp_validation_failure_keeps_gateway_idle() {
    let (service, forms) = build_service(RecordingForms::default(), MemoryDirectory::default());
    let mut request: CampRegistrationRequest =
        serde_json::from_value(camp_body()).expect("camp request parses");
    request.cancellation_policy_accepted = false;

    let error = service
        .submit_camp(request, &VisitorContext::default())
        .await
        .expect_err("policy not acknowledged");

    match error {
        RegistrationError::Validation(report) => {
            assert!(report.contains("cancellationPolicyAccepted"))
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(forms.recorded().is_empty());
}

#[tokio::test]
async fn lookup_distinguishes_upcoming_expired_and_missing() {
    let (service, _) = build_service(RecordingForms::default(), MemoryDirectory::with_schedule());

    assert!(matches!(
        service.lookup_summit("18301").await.expect("lookup"),
        EventLookup::Upcoming(summit) if summit.location == "Denver"
    ));
    assert!(matches!(
        service.lookup_summit("900").await.expect("lookup"),
        EventLookup::Expired(_)
    ));
    assert_eq!(
        service.lookup_summit("1").await.expect("lookup"),
        EventLookup::Missing
    );
}

#[tokio::test]
async fn configuration_failures_are_flagged() {
    let (service, _) = build_service(
        RecordingForms::failing(FormsFailure::Unconfigured),
        MemoryDirectory::with_schedule(),
    );

    let error = service
        .submit_summit(summit_request(), &VisitorContext::default())
        .await
        .expect_err("gateway unconfigured");
    assert!(error.is_configuration());
}
