//! Property-based tests for the lenient reader.
//!
//! Test coverage:
//! - Inputs without headers: everything lands in the global section
//! - The global section exists for any parseable input, and bracket-free input always parses
//! - Raw values are exactly the text after the separator, left-trimmed
//! - Comment stripping is idempotent

use proptest::prelude::*;

use lenient_ini::{Configuration, Parser, ParserOptions, strip_comments};

/// Keys without separators, brackets or surrounding whitespace.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.-]{0,15}"
}

/// Values may contain anything printable except line terminators.
fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

/// Option lines that can never be mistaken for headers.
fn option_line_strategy() -> impl Strategy<Value = String> {
    (key_strategy(), "[ \t]{0,3}", value_strategy())
        .prop_map(|(key, padding, value)| format!("{padding}{key} ={value}"))
}

proptest! {
    #[test]
    fn header_free_input_stays_global(
        lines in prop::collection::vec(option_line_strategy(), 0..20),
    ) {
        let configuration = lines
            .join("\n")
            .parse::<Configuration>()
            .expect("option lines always parse");

        prop_assert!(configuration.sections().is_empty());

        for line in &lines {
            let (key, _) = line.split_once('=').expect("generated with a separator");
            prop_assert!(configuration.global().contains_key(key.trim()));
        }
    }

    #[test]
    fn global_section_always_exists(text in "[ -Z^-~\n]{0,200}") {
        let configuration = text
            .parse::<Configuration>()
            .expect("bracket-free input always parses");

        prop_assert_eq!(configuration.global().name(), "");
        prop_assert!(configuration.sections().is_empty());
        prop_assert_eq!(configuration.all_sections().count(), 1);
    }

    #[test]
    fn raw_value_is_text_after_separator(key in key_strategy(), value in value_strategy()) {
        let line = format!("[s]\n{key} = {value}");
        let configuration = line.parse::<Configuration>().expect("option lines always parse");

        prop_assert_eq!(
            configuration.sections()[0].value_of(&key),
            Some(value.trim_start())
        );
    }

    #[test]
    fn stripping_is_idempotent(
        raw in "[ -~]{0,60}",
        markers in prop::collection::vec(prop_oneof![Just('#'), Just(';'), Just('!')], 0..3),
    ) {
        let once = strip_comments(&raw, &markers);

        prop_assert_eq!(strip_comments(once, &markers), once);
    }

    #[test]
    fn stripped_view_never_holds_a_marker(key in key_strategy(), value in value_strategy()) {
        let parser = Parser::new(ParserOptions::default().with_comment_markers(['#', ';']));
        let configuration = parser
            .parse_str(&format!("{key}={value}"), None)
            .expect("option lines always parse");
        let stripped = configuration
            .global()
            .value_without_comments(&key)
            .expect("key was just written");

        prop_assert!(!stripped.contains(['#', ';']));
        prop_assert!(value.trim_start().starts_with(stripped));
    }
}
