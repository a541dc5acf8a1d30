//! Property-based tests for the hex codec.
//!
//! These hold for every input:
//! - The display transform reverses the first four bytes and nothing else
//! - The display transform is its own inverse
//! - Short text passes through unchanged
//! - Validation accepts exactly non-empty uppercase hex
//! - Random identifiers have the requested length and validate

use hce_uid::codec::{
    bytes_to_hex, from_display, hex_to_bytes, normalize, random_hex, to_display, validate,
    validate_with, ValidationMode,
};
use hce_uid::types::Identifier;
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn uid_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 4..16)
}

fn short_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[\\x20-\\x7E]{0,7}").unwrap()
}

fn upper_hex_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9A-F]{1,32}").unwrap()
}

// =============================================================================
// DISPLAY TRANSFORM
// =============================================================================

mod display_properties {
    use super::*;

    proptest! {
        /// The first four byte pairs come out in reverse order, the tail as is
        #[test]
        fn reverses_first_four_bytes(bytes in uid_bytes_strategy()) {
            let canonical = bytes_to_hex(&bytes);
            let display = to_display(&canonical);

            let mut head = bytes[..4].to_vec();
            head.reverse();
            prop_assert_eq!(&display[..8], bytes_to_hex(&head));
            prop_assert_eq!(&display[8..], &canonical[8..]);
        }

        /// Applying the transform twice restores the input
        #[test]
        fn is_an_involution(bytes in uid_bytes_strategy()) {
            let canonical = bytes_to_hex(&bytes);
            prop_assert_eq!(to_display(&to_display(&canonical)), canonical.clone());
            prop_assert_eq!(from_display(&to_display(&canonical)), canonical);
        }

        /// Text shorter than eight characters is left alone
        #[test]
        fn short_text_passes_through(text in short_text_strategy()) {
            prop_assert_eq!(to_display(&text), text);
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

mod validation_properties {
    use super::*;

    proptest! {
        /// Uppercase hex always validates
        #[test]
        fn accepts_upper_hex(text in upper_hex_strategy()) {
            prop_assert!(validate(&text));
            prop_assert!(validate_with(&text, ValidationMode::Lenient).is_ok());
        }

        /// validate agrees with a direct character-class check
        #[test]
        fn matches_character_class(text in ".{0,24}") {
            let expected = !text.is_empty()
                && text.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c));
            prop_assert_eq!(validate(&text), expected);
        }

        /// Lowercase hex letters fail until normalized
        #[test]
        fn lowercase_needs_normalizing(text in "[0-9a-f]{0,16}[a-f][0-9a-f]{0,16}") {
            prop_assert!(!validate(&text));
            prop_assert!(validate(&normalize(&text)));
        }

        /// Strict mode accepts exactly the even-length texts lenient mode accepts
        #[test]
        fn strict_requires_whole_bytes(text in upper_hex_strategy()) {
            let strict = validate_with(&text, ValidationMode::Strict).is_ok();
            prop_assert_eq!(strict, text.len() % 2 == 0);
        }

        /// Whole-byte hex decodes back to the bytes it came from
        #[test]
        fn hex_decodes_to_source_bytes(bytes in prop::collection::vec(any::<u8>(), 1..16)) {
            prop_assert_eq!(hex_to_bytes(&bytes_to_hex(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn rejects_empty_and_lowercase() {
        assert!(!validate(""));
        assert!(!validate("04a1"));
        assert!(!validate("12G4"));
        assert!(!validate(" 04A1"));
    }
}

// =============================================================================
// GENERATION
// =============================================================================

mod generation_properties {
    use super::*;

    proptest! {
        /// random_hex(n) is 2n valid characters
        #[test]
        fn random_hex_is_valid(n in 1usize..32) {
            let text = random_hex(n);
            prop_assert_eq!(text.len(), 2 * n);
            prop_assert!(validate(&text));
        }

        /// Random identifiers are whole bytes
        #[test]
        fn random_identifier_is_whole_bytes(n in 1usize..16) {
            let id = Identifier::random(n).unwrap();
            prop_assert!(id.is_whole_bytes());
            prop_assert_eq!(id.byte_len(), n);
        }
    }
}
