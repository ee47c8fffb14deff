//! Property-based tests for the transform engine

use proptest::prelude::*;
use rfi_format::{parse_records, InjectedField, Record};
use rfi_test_utils::strategies::{arb_data_file, arb_value, ANCHOR};
use rfi_transform::{transform, TransformPlan};

const INJECTED: [&str; 2] = ["authorName", "authorLinkedin"];

fn plan() -> TransformPlan {
    TransformPlan::new(ANCHOR).with_fields(vec![
        InjectedField::string("authorName", "Inspire India").expect("field"),
        InjectedField::string("authorLinkedin", "https://example.test/in").expect("field"),
    ])
}

fn keys(record: &Record) -> Vec<&str> {
    record
        .fields
        .iter()
        .filter_map(|field| field.key.as_deref())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn transform_is_idempotent(src in arb_data_file()) {
        let first = transform(&src, &plan());
        prop_assume!(first.is_ok());
        let first = first.unwrap();
        let second = transform(&first.text, &plan()).expect("second run");
        prop_assert_eq!(&second.text, &first.text);
        prop_assert!(!second.report.changed);
    }

    #[test]
    fn unanchored_records_are_preserved(src in arb_data_file()) {
        let output = transform(&src, &plan());
        prop_assume!(output.is_ok());
        let output = output.unwrap();

        let unanchored = |text: &str| -> Vec<String> {
            parse_records(text)
                .expect("records")
                .iter()
                .filter(|record| !record.has_field(ANCHOR))
                .map(|record| text[record.span.clone()].to_string())
                .collect()
        };
        prop_assert_eq!(unanchored(&src), unanchored(&output.text));
    }

    #[test]
    fn injected_fields_appear_once_right_after_anchor(src in arb_data_file()) {
        let output = transform(&src, &plan());
        prop_assume!(output.is_ok());
        let text = output.unwrap().text;

        for record in parse_records(&text).expect("records") {
            let keys = keys(&record);
            let Some(anchor_at) = keys.iter().position(|key| *key == ANCHOR) else {
                continue;
            };
            for name in INJECTED {
                prop_assert_eq!(keys.iter().filter(|key| **key == name).count(), 1);
            }
            prop_assert_eq!(&keys[anchor_at + 1..anchor_at + 3], &INJECTED[..]);
        }
    }

    #[test]
    fn untouched_fields_keep_their_order(src in arb_data_file()) {
        let output = transform(&src, &plan());
        prop_assume!(output.is_ok());
        let text = output.unwrap().text;

        let before = parse_records(&src).expect("records");
        let after = parse_records(&text).expect("records");
        prop_assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            let strip = |keys: Vec<&str>| -> Vec<String> {
                keys.into_iter()
                    .filter(|key| !INJECTED.contains(key))
                    .map(str::to_string)
                    .collect()
            };
            if old.has_field(ANCHOR) {
                prop_assert_eq!(strip(keys(old)), strip(keys(new)));
            }
        }
    }

    #[test]
    fn nested_anchor_values_are_injected_after_their_end(value in arb_value()) {
        let src = format!("[{{ id: 1, achievements: {}, name: \"X\" }}]", value);
        let text = transform(&src, &plan()).expect("transform").text;
        let expected = format!(
            "[{{ id: 1, achievements: {}, authorName: \"Inspire India\", authorLinkedin: \"https://example.test/in\", name: \"X\" }}]",
            value
        );
        prop_assert_eq!(text, expected);
    }
}
