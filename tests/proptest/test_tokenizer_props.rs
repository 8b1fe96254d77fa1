//! Property-based tests for the tokenizer
//!
//! Tokenization is total, so every property here must hold for
//! arbitrary input, not just well-formed command lines.

use micashell::tokenizer::{command_name, tokenize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_tokenize_never_panics(s in "\\PC*") {
        let _ = tokenize(&s);
    }

    #[test]
    fn test_tokens_are_never_empty(s in "\\PC*") {
        let tokens = tokenize(&s);
        prop_assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_simple_words_round_trip(
        words in prop::collection::vec("[a-z0-9_.-]{1,12}", 1..8),
    ) {
        let line = words.join(" ");
        prop_assert_eq!(tokenize(&line), words);
    }

    #[test]
    fn test_whitespace_only_lines_yield_nothing(ws in "[ \t]{0,30}") {
        prop_assert!(tokenize(&ws).is_empty());
    }

    #[test]
    fn test_quote_free_tokens_contain_no_whitespace(s in "[^\"']*") {
        let tokens = tokenize(&s);
        prop_assert!(tokens
            .iter()
            .all(|t| !t.chars().any(char::is_whitespace)));
    }

    #[test]
    fn test_quote_free_content_is_preserved(s in "[^\"']*") {
        // Splitting only removes separators; every other char survives
        let kept: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(tokenize(&s).concat(), kept);
    }

    #[test]
    fn test_double_quoted_payload_is_one_token(
        cmd in "[a-z]{1,8}",
        payload in "[a-z0-9 ]{0,20}",
    ) {
        let line = format!("{} \"{}\"", cmd, payload);
        let tokens = tokenize(&line);

        if payload.is_empty() {
            prop_assert_eq!(tokens, vec![cmd]);
        } else {
            prop_assert_eq!(tokens, vec![cmd, payload]);
        }
    }

    #[test]
    fn test_single_quoted_payload_is_one_token(
        cmd in "[a-z]{1,8}",
        payload in "[a-z0-9 ]{1,20}",
    ) {
        let line = format!("{} '{}'", cmd, payload);
        let tokens = tokenize(&line);

        prop_assert_eq!(tokens, vec![cmd, payload]);
    }

    #[test]
    fn test_appending_a_word_adds_one_token(
        line in "[a-z0-9 ]{0,30}",
        word in "[a-z]{1,10}",
    ) {
        let before = tokenize(&line).len();
        let after = tokenize(&format!("{} {}", line, word)).len();
        prop_assert_eq!(after, before + 1);
    }

    #[test]
    fn test_command_name_agrees_with_tokenize(s in "\\PC*") {
        let head = tokenize(&s).into_iter().next().map(|t| t.to_lowercase());
        prop_assert_eq!(command_name(&s), head);
    }

    #[test]
    fn test_tokenize_is_deterministic(s in "\\PC*") {
        prop_assert_eq!(tokenize(&s), tokenize(&s));
    }
}
