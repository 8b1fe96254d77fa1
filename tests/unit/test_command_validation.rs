//! Unit tests for command name resolution and line tokenization
//!
//! These cover the two decisions the dispatcher makes before any
//! handler runs: how a raw line splits into tokens, and whether the
//! head token names a builtin.

use micashell::commands::is_builtin;
use micashell::tokenizer::{command_name, tokenize};
use micashell::Builtin;

#[cfg(test)]
mod command_validation_tests {
    use super::*;

    // ---- alias table ----

    #[test]
    fn test_every_canonical_name_resolves() {
        let canonical = [
            "ls", "cd", "mkdir", "touch", "rm", "cp", "mv", "cat", "pwd", "echo", "clear",
            "find", "grep", "chmod", "history", "zip", "unzip", "whoami", "date", "bg",
            "jobs", "help", "exit",
        ];

        for name in canonical {
            let builtin = Builtin::lookup(name);
            assert!(builtin.is_some(), "'{}' should resolve", name);
            assert_eq!(builtin.unwrap().canonical_name(), name);
        }
    }

    #[test]
    fn test_alias_pairs_share_a_builtin() {
        let pairs = [
            ("dir", "ls"),
            ("new-item", "touch"),
            ("del", "rm"),
            ("copy", "cp"),
            ("move", "mv"),
            ("type", "cat"),
            ("cls", "clear"),
            ("search", "find"),
            ("compress", "zip"),
            ("extract", "unzip"),
            ("quit", "exit"),
        ];

        for (alias, canonical) in pairs {
            assert_eq!(
                Builtin::lookup(alias),
                Builtin::lookup(canonical),
                "'{}' should be an alias of '{}'",
                alias,
                canonical
            );
        }
    }

    #[test]
    fn test_name_table_is_sorted_and_duplicate_free() {
        let names = Builtin::names();

        assert_eq!(names.len(), 34);
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_listed_name_resolves_back() {
        let names = Builtin::names();

        for name in &names {
            let builtin = Builtin::lookup(name).unwrap();
            // The canonical name is always itself a listed name
            assert!(names.contains(&builtin.canonical_name()));
        }
    }

    #[test]
    fn test_lookup_rejects_near_misses() {
        assert_eq!(Builtin::lookup("lss"), None);
        assert_eq!(Builtin::lookup("l"), None);
        assert_eq!(Builtin::lookup("new_item"), None);
        assert_eq!(Builtin::lookup(" ls"), None);
        assert_eq!(Builtin::lookup("ls "), None);
    }

    #[test]
    fn test_lookup_table_is_lowercase_only() {
        // Case folding happens in the dispatcher, not the table
        assert_eq!(Builtin::lookup("Ls"), None);
        assert_eq!(Builtin::lookup("EXIT"), None);
        assert!(Builtin::lookup("exit").is_some());
    }

    #[test]
    fn test_is_builtin_matches_lookup() {
        assert!(is_builtin("pwd"));
        assert!(is_builtin("compress"));
        assert!(!is_builtin("python3"));
        assert!(!is_builtin(""));
    }

    // ---- tokenization ----

    #[test]
    fn test_flags_pass_through_verbatim() {
        assert_eq!(tokenize("rm -rf build"), vec!["rm", "-rf", "build"]);
        assert_eq!(tokenize("ls -a --long"), vec!["ls", "-a", "--long"]);
    }

    #[test]
    fn test_quoted_path_with_separators_is_one_token() {
        assert_eq!(
            tokenize("cat \"dir with spaces/file.txt\""),
            vec!["cat", "dir with spaces/file.txt"]
        );
    }

    #[test]
    fn test_mixed_quote_styles_in_one_line() {
        assert_eq!(
            tokenize("cp 'source file' \"dest file\""),
            vec!["cp", "source file", "dest file"]
        );
    }

    #[test]
    fn test_unicode_arguments_survive() {
        assert_eq!(tokenize("echo héllo wörld"), vec!["echo", "héllo", "wörld"]);
        assert_eq!(tokenize("cat 'résumé.txt'"), vec!["cat", "résumé.txt"]);
    }

    #[test]
    fn test_leading_and_trailing_whitespace_is_dropped() {
        assert_eq!(tokenize("  echo hi  "), vec!["echo", "hi"]);
    }

    #[test]
    fn test_bang_prefix_stays_attached_to_the_head() {
        assert_eq!(tokenize("!3"), vec!["!3"]);
        assert_eq!(tokenize("! 3"), vec!["!", "3"]);
    }

    // ---- head classification ----

    #[test]
    fn test_command_name_folds_case_for_dispatch() {
        assert_eq!(command_name("PWD"), Some("pwd".to_string()));
        assert_eq!(command_name("Echo SHOUTING"), Some("echo".to_string()));
        assert_eq!(command_name("   "), None);
    }

    #[test]
    fn test_classification_of_whole_lines() {
        let cases = [
            ("ls -la", true),
            ("DIR", true),
            ("New-Item notes.txt", true),
            ("python3 script.py", false),
            ("git status", false),
            ("/bin/echo hi", false),
        ];

        for (line, expect_builtin) in cases {
            let head = command_name(line).unwrap();
            assert_eq!(
                is_builtin(&head),
                expect_builtin,
                "head of {:?} misclassified",
                line
            );
        }
    }
}
