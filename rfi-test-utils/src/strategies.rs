//! Proptest strategies for generated data modules

use proptest::prelude::*;

use crate::{DataFile, Layout, RecordBuilder};

/// Anchor field used by the generated records
pub const ANCHOR: &str = "achievements";

/// Keys records are drawn from; includes near-miss prefixes of the author fields
pub const KEYS: [&str; 7] = [
    "id",
    "name",
    "authorName",
    "authorNameLegacy",
    ANCHOR,
    "quote",
    "authorLinkedin",
];

/// Array literal broken across lines, one item per line
pub fn arb_multiline_array() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u16>(), 1..4).prop_map(|items| {
        let body: String = items
            .iter()
            .map(|n| format!("\n      {},", n))
            .collect();
        format!("[{}\n    ]", body)
    })
}

/// Arbitrary value literal, possibly nested or spanning several lines
pub fn arb_value() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        any::<i32>().prop_map(|n| n.to_string()),
        arb_multiline_array(),
        Just("[\n      \"First in space\",\n      [\"STS-87\", \"STS-107\"],\n    ]".to_string()),
        "[a-zA-Z ,:\\[\\]{}]{0,12}".prop_map(|s| serde_json::to_string(&s).expect("string literal")),
        Just(r#""authorName: \"fake\",""#.to_string()),
        Just("`tmpl ${[1, 2].length} ]`".to_string()),
        Just("true".to_string()),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            prop::collection::vec(inner, 0..3).prop_map(|items| {
                let body: Vec<String> = items
                    .iter()
                    .enumerate()
                    .map(|(i, value)| format!("k{}: {}", i, value))
                    .collect();
                format!("{{ {} }}", body.join(", "))
            }),
        ]
    })
}

/// Arbitrary record layout
pub fn arb_layout() -> impl Strategy<Value = Layout> {
    prop_oneof![
        Just(Layout::Inline),
        (2usize..6).prop_map(|indent| Layout::Multiline { indent }),
    ]
}

/// Arbitrary record drawn from [`KEYS`] in any order
pub fn arb_record() -> impl Strategy<Value = RecordBuilder> {
    let keys = prop::sample::subsequence(KEYS.to_vec(), 1..=KEYS.len()).prop_shuffle();
    (
        keys,
        prop::collection::vec(arb_value(), KEYS.len()),
        arb_layout(),
        any::<bool>(),
    )
        .prop_map(|(keys, values, layout, trailing_comma)| {
            keys.iter().zip(values).fold(
                RecordBuilder::new()
                    .layout(layout)
                    .trailing_comma(trailing_comma),
                |record, (key, value)| record.raw(key, &value),
            )
        })
}

/// Arbitrary data module with 1..6 records
pub fn arb_data_file() -> impl Strategy<Value = String> {
    (prop::collection::vec(arb_record(), 1..6), any::<bool>()).prop_map(|(records, crlf)| {
        records
            .into_iter()
            .fold(DataFile::new("personalities").crlf(crlf), DataFile::record)
            .render()
    })
}
