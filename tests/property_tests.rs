/// Property-based tests using proptest
/// Tests invariants of sanitization, validation and outcome decisions for all inputs
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use shipping_lead_api::lead_intake::{
    generate_reference_number, missing_required_fields, parse_monthly_shipments,
    sanitize_submission, REQUIRED_FIELDS,
};
use shipping_lead_api::outcome::SubmissionOutcome;

// Property: monthlyShipments parsing keeps the digits and nothing else
proptest! {
    #[test]
    fn decorated_shipment_counts_keep_digits(
        count in 0u32..=9_999_999u32,
        prefix in "[a-zA-Z ~]{0,6}",
        suffix in "[a-zA-Z ]{0,8}"
    ) {
        let input = format!("{}{}{}", prefix, count, suffix);
        prop_assert_eq!(parse_monthly_shipments(Some(&json!(input))), i64::from(count));
    }

    #[test]
    fn digitless_strings_parse_to_zero(input in "[^0-9]*") {
        prop_assert_eq!(parse_monthly_shipments(Some(&json!(input))), 0);
    }

    #[test]
    fn monthly_shipments_never_negative(value in any::<i64>()) {
        prop_assert!(parse_monthly_shipments(Some(&json!(value))) >= 0);
    }

    #[test]
    fn sanitization_never_panics(raw in "\\PC*") {
        let _ = sanitize_submission(&json!({ "name": raw, "monthlyShipments": raw }));
    }
}

// Property: exactly the omitted required fields are reported, in order
proptest! {
    #[test]
    fn missing_fields_are_exactly_the_omitted_ones(present in prop::array::uniform5(any::<bool>())) {
        let mut submission = Map::new();
        for (field, keep) in REQUIRED_FIELDS.iter().zip(present.iter()) {
            if *keep {
                submission.insert(field.to_string(), json!(format!("value for {}", field)));
            } else {
                submission.insert(field.to_string(), json!("   "));
            }
        }

        let lead = sanitize_submission(&Value::Object(submission));
        let expected: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .zip(present.iter())
            .filter(|(_, keep)| !**keep)
            .map(|(field, _)| *field)
            .collect();

        prop_assert_eq!(missing_required_fields(&lead), expected);
    }
}

// Property: reference numbers are EST plus eight digits
proptest! {
    #[test]
    fn reference_number_format(millis in 0i64..=4_102_444_800_000i64) {
        let now = Utc.timestamp_millis_opt(millis).unwrap();
        let reference = generate_reference_number(now);

        prop_assert_eq!(reference.len(), 11);
        prop_assert!(reference.starts_with("EST"));
        prop_assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));
    }
}

// Property: failure is reported only when no collaborator confirmed the lead
proptest! {
    #[test]
    fn hard_failure_only_without_any_confirmation(
        reachable in any::<bool>(),
        inserted in any::<bool>(),
        emailed in any::<bool>()
    ) {
        let outcome = SubmissionOutcome::decide(reachable, inserted, emailed);
        let hard = outcome == SubmissionOutcome::HardFailure;
        prop_assert_eq!(hard, reachable && !inserted && !emailed);
        if !reachable {
            prop_assert_eq!(outcome, SubmissionOutcome::EmailOnlyFallback);
        }
    }
}
