//! Property-based tests for config loading and cell coercion
//!
//! These tests verify that:
//! - Any well-formed `NAME=VALUE` file loads to exactly its entries
//! - Duplicate names keep the last value
//! - Lines with a wrong number of separators abort the load and are named
//! - Cell coercions agree with the values they were rendered from

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::HashMap;

    use databaselib::config::parse_configuration;
    use databaselib::{Cell, DatabaseError};

    // Test infrastructure

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_.]{0,15}".prop_map(|s: String| s)
    }

    fn arb_value() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_./:@ -]{1,24}".prop_map(|s: String| s)
    }

    fn arb_entries() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec((arb_name(), arb_value()), 0..12)
    }

    fn render(entries: &[(String, String)]) -> String {
        entries
            .iter()
            .map(|(name, value)| format!("{}={}\n", name, value))
            .collect()
    }

    // Property tests

    proptest! {
        /// A file without comments loads to exactly its entries, last duplicate winning
        #[test]
        fn prop_well_formed_files_round_trip(entries in arb_entries()) {
            let loaded = parse_configuration(&render(&entries)).unwrap();

            let mut expected: HashMap<String, String> = HashMap::new();
            for (name, value) in &entries {
                expected.insert(name.clone(), value.clone());
            }

            prop_assert_eq!(loaded.len(), expected.len());
            for (name, value) in &expected {
                prop_assert_eq!(loaded[name].as_str(), Some(value.as_str()));
            }
        }

        /// Comment lines never affect the result, whatever they contain
        #[test]
        fn prop_comments_are_ignored(entries in arb_entries(), comment in "#[^\r\n]{0,30}") {
            let plain = parse_configuration(&render(&entries)).unwrap();
            let commented = parse_configuration(&format!("{}\n{}", comment, render(&entries))).unwrap();
            prop_assert_eq!(plain, commented);
        }

        /// A line with two or more separators fails and the error names it
        #[test]
        fn prop_extra_separators_fail(
            entries in arb_entries(),
            name in arb_name(),
            values in prop::collection::vec(arb_value(), 2..4),
        ) {
            let bad_line = format!("{}={}", name, values.join("="));
            let content = format!("{}{}\n", render(&entries), bad_line);
            match parse_configuration(&content) {
                Err(DatabaseError::ConfigParse(msg)) => prop_assert!(msg.contains(&bad_line)),
                other => prop_assert!(false, "Expected ConfigParse, got {:?}", other),
            }
        }

        /// A line without a separator fails and the error names it
        #[test]
        fn prop_missing_separator_fails(entries in arb_entries(), bad_line in "[a-zA-Z0-9 ]{1,20}") {
            let content = format!("{}\n{}", bad_line, render(&entries));
            match parse_configuration(&content) {
                Err(DatabaseError::ConfigParse(msg)) => prop_assert!(msg.contains(&bad_line)),
                other => prop_assert!(false, "Expected ConfigParse, got {:?}", other),
            }
        }

        /// Integers survive the text round trip through a cell
        #[test]
        fn prop_integer_cells(value in any::<i64>()) {
            let cell = Cell::from(value.to_string());
            prop_assert_eq!(cell.to_long().unwrap(), value);
            prop_assert!(cell == value);
            prop_assert_eq!(cell.to_int().is_ok(), i32::try_from(value).is_ok());
            prop_assert_eq!(cell.to_byte().is_ok(), i8::try_from(value).is_ok());
        }

        /// Doubles survive the text round trip through a cell
        #[test]
        fn prop_double_cells(value in proptest::num::f64::NORMAL) {
            let cell = Cell::from(value.to_string());
            prop_assert_eq!(cell.to_double().unwrap(), value);
        }

        /// Only "1" and "true" in any case are true
        #[test]
        fn prop_boolean_cells(text in "[a-zA-Z0-9]{0,6}") {
            let expected = text == "1" || text.eq_ignore_ascii_case("true");
            prop_assert_eq!(Cell::from(text.as_str()).to_boolean(), expected);
        }
    }
}
