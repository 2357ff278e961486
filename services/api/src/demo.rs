use crate::infra::{parse_date, parse_pricing, parse_profile};
use chrono::NaiveDate;
use clap::Args;
use summit_registration::error::AppError;
use summit_registration::workflows::camp::{
    CampRegistration, CampRegistrationRequest, CAMP_ESSENCE_EVENT_NAME, CAMP_PAGE_NAME,
};
use summit_registration::workflows::hubspot::{FormSubmission, Summit, SubmissionContext};
use summit_registration::workflows::registration::{
    format_currency, AttendeeContact, PrimaryAttendee, SalonInfo,
};
use summit_registration::workflows::summit::{
    AnswerEdit, PaymentOption, PricingTable, PricingVariant, RegistrantProfile,
    RegistrationSession, SessionSnapshot, SummitEventDetails, SUMMIT_PAGE_NAME,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Registrant profile: alumni, level-member, or non-level-member
    #[arg(long, value_parser = parse_profile)]
    pub(crate) profile: RegistrantProfile,
    /// Level-member pricing table (tiered or flat)
    #[arg(long, value_parser = parse_pricing, default_value = "tiered")]
    pub(crate) pricing: PricingVariant,
    /// Emit JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Start date of the demo summit (YYYY-MM-DD). Defaults to 2026-03-15.
    #[arg(long, value_parser = parse_date)]
    pub(crate) summit_date: Option<NaiveDate>,
    /// Level-member pricing table (tiered or flat)
    #[arg(long, value_parser = parse_pricing)]
    pub(crate) pricing: Option<PricingVariant>,
    /// Skip the Camp Essence portion of the demo.
    #[arg(long)]
    pub(crate) skip_camp: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let table = PricingTable::for_variant(args.pricing);
    let options = table.attendee_options(args.profile);

    if args.json {
        match serde_json::to_string_pretty(&options) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Attendee options unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "Attendee options for {:?} ({} pricing)",
        args.profile,
        table.variant().label()
    );
    for option in options {
        let quote = table.quote(args.profile.registration_type(option.count), option.count);
        println!(
            "- {} [{}: base {} + {} additional]",
            option.label,
            quote.registration_type_name,
            format_currency(quote.base),
            format_currency(quote.additional)
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        summit_date,
        pricing,
        skip_camp,
    } = args;

    let table = PricingTable::for_variant(pricing.unwrap_or(PricingVariant::Tiered));
    let summit = Summit {
        id: "demo-summit".to_string(),
        start_date: summit_date
            .or_else(|| NaiveDate::from_ymd_opt(2026, 3, 15))
            .unwrap_or_default(),
        location: "Des Moines".to_string(),
    };

    println!("Summit registration demo: {}", summit.display_name());
    let mut session = RegistrationSession::new(table);

    session.apply_all([
        AnswerEdit::SelectSummit(summit.id.clone()),
        AnswerEdit::SalonName("Copper & Comb".to_string()),
        AnswerEdit::City("Des Moines".to_string()),
        AnswerEdit::State("IA".to_string()),
        AnswerEdit::PrimaryAttendee(PrimaryAttendee {
            first_name: "Dana".to_string(),
            last_name: "Whitfield".to_string(),
            email: "dana@copperandcomb.com".to_string(),
            phone: Some("(515) 555-0199".to_string()),
        }),
        AnswerEdit::Alumni(false),
        AnswerEdit::LevelMember(true),
        AnswerEdit::TotalAttendees(3),
    ]);
    print_snapshot("After choosing three attendees", &session.snapshot());

    println!("\nSubmitting before naming the extra attendees:");
    if let Err(errors) = session.submit() {
        for (path, messages) in errors.iter() {
            println!("  - {path}: {}", messages.join("; "));
        }
        println!("  focus -> {}", errors.first_error().unwrap_or("none"));
    }

    session.apply_all([
        AnswerEdit::AdditionalAttendee {
            index: 0,
            full_name: "Rae Okafor".to_string(),
        },
        AnswerEdit::AdditionalAttendee {
            index: 1,
            full_name: "Milo Brandt".to_string(),
        },
        AnswerEdit::TogglePayment(PaymentOption::Credit),
        AnswerEdit::TogglePayment(PaymentOption::Loyalty),
    ]);
    print_snapshot("\nAfter naming attendees and choosing combo payment", &session.snapshot());

    let context = SubmissionContext::new(
        None,
        Some("https://summit.example.com/register"),
        SUMMIT_PAGE_NAME,
    );
    match session.submit() {
        Ok(registration) => {
            let payload =
                registration.normalize(&SummitEventDetails::for_summit(&summit), context);
            print_payload("\nSummit payload", &payload);
        }
        Err(errors) => println!("  Registration still invalid: {} field(s)", errors.len()),
    }

    if skip_camp {
        return Ok(());
    }

    println!("\n{CAMP_ESSENCE_EVENT_NAME} registration demo");
    let mut request = CampRegistrationRequest {
        salon: SalonInfo {
            salon_name: "Alpine Strand".to_string(),
            city: "Boulder".to_string(),
            state: "CO".to_string(),
        },
        primary_attendee: PrimaryAttendee {
            first_name: "Jules".to_string(),
            last_name: "Marten".to_string(),
            email: "jules@alpinestrand.com".to_string(),
            phone: Some("720 555 0100".to_string()),
        },
        payment_method: "credit_card".to_string(),
        cancellation_policy_accepted: true,
        ..CampRegistrationRequest::default()
    };
    request.set_total_attendees(2);
    request.additional_attendees[0] = AttendeeContact {
        full_name: "Ari Lane".to_string(),
        email: "ari@alpinestrand.com".to_string(),
        phone: "303-555-0142".to_string(),
    };

    match CampRegistration::from_request(&request) {
        Ok(registration) => {
            println!("- Total due: {}", format_currency(registration.total));
            let context = SubmissionContext::new(None, None, CAMP_PAGE_NAME);
            print_payload("Camp Essence payload", &registration.normalize(context));
        }
        Err(errors) => println!("  Camp registration invalid: {} field(s)", errors.len()),
    }

    Ok(())
}

fn print_snapshot(title: &str, snapshot: &SessionSnapshot) {
    println!("{title}");
    match &snapshot.quote {
        Some(quote) => println!(
            "- {}: {} ({} included, {} additional)",
            quote.registration_type_name,
            format_currency(quote.total),
            quote.included_attendees,
            quote.additional_attendee_count
        ),
        None => println!("- No price yet"),
    }
    println!(
        "- Additional attendee slots: {}",
        snapshot.requirements.additional_attendee_slots
    );
    let payments: Vec<&str> = snapshot
        .payment_options
        .iter()
        .map(|option| option.name)
        .collect();
    println!("- Payment options: {}", payments.join(", "));
}

fn print_payload(title: &str, payload: &FormSubmission) {
    println!("{title}");
    for field in &payload.fields {
        println!("  {} = {}", field.name, field.value.replace('\n', " | "));
    }
}
