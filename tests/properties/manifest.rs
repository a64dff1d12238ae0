//! Property tests for manifest decoding.

use std::path::Path;

use proptest::prelude::*;

use denim::domain::entities::{is_resource, strip_compiler_token, BuildManifest};

fn token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_@./-]{1,16}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: decoding never panics on arbitrary input.
    #[test]
    fn property_from_json_never_panics(content in "(?s).{0,256}") {
        let _ = BuildManifest::from_json(&content, Path::new("m.json"), "clang");
    }

    /// PROPERTY: only a leading compiler token is removed.
    #[test]
    fn property_strip_removes_at_most_leading_compiler(
        prefix in prop_oneof![
            Just("clang".to_string()),
            Just("clang.exe".to_string()),
            Just("/opt/ollvm/bin/clang".to_string()),
        ],
        rest in proptest::collection::vec(
            token().prop_filter("not a compiler", |t| !t.ends_with("clang") && !t.ends_with("clang.exe")),
            0..8,
        ),
    ) {
        let mut tokens = vec![prefix];
        tokens.extend(rest.clone());
        prop_assert_eq!(strip_compiler_token(tokens, "clang"), rest.clone());

        prop_assert_eq!(strip_compiler_token(rest.clone(), "clang"), rest);
    }

    /// PROPERTY: every link input lands in exactly one of inputs or skipped resources.
    #[test]
    fn property_link_inputs_partition(
        inputs in proptest::collection::vec(
            prop_oneof![
                token().prop_map(|t| format!("{}.o", t)),
                token().prop_map(|t| format!("{}.res", t)),
            ],
            0..10,
        ),
    ) {
        let json = serde_json::json!({
            "compile": [],
            "link": inputs,
            "outputFile": "out",
        })
        .to_string();

        let manifest = BuildManifest::from_json(&json, Path::new("m.json"), "clang").unwrap();
        let link = &manifest.link;

        prop_assert_eq!(link.inputs.len() + link.skipped_resources.len(), inputs.len());
        prop_assert!(link.inputs.iter().all(|i| !is_resource(i)));
        prop_assert!(link.skipped_resources.iter().all(|i| is_resource(i)));
        prop_assert_eq!(link.arguments().len(), link.inputs.len() + 3);
    }
}
