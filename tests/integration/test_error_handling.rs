//! Integration tests for error handling
//!
//! Dispatch must turn every fault into a tagged error record and leave
//! the session usable. No input line may panic or poison later
//! dispatches.

use std::path::Path;

use micashell::{Config, OutputTag, Session};
use tempfile::TempDir;

#[cfg(test)]
mod error_handling_tests {
    use super::*;

    fn session_in(dir: &Path) -> Session {
        let mut config = Config::default();
        config.shell.startup_directory = Some(dir.to_path_buf());
        Session::with_config(config).unwrap()
    }

    /// Dispatch a line and return the single record after the input echo,
    /// asserting it carries the error tag
    fn error_text(session: &mut Session, line: &str) -> String {
        let outcome = session.dispatch(line);
        assert_eq!(
            outcome.records.len(),
            2,
            "expected exactly one record after the echo for {:?}",
            line
        );
        let record = &outcome.records[1];
        assert_eq!(record.tag, OutputTag::Error, "for {:?}", line);
        record.text.clone()
    }

    // ---- usage errors ----

    #[test]
    fn test_missing_argument_messages() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let cases = [
            ("mkdir", "mkdir requires a directory name"),
            ("touch", "touch requires a file name"),
            ("rm", "rm requires a file or directory name"),
            ("rm -rf", "rm requires a file or directory name"),
            ("cp", "cp requires source and destination"),
            ("cp lonely.txt", "cp requires source and destination"),
            ("mv", "mv requires source and destination"),
            ("mv lonely.txt", "mv requires source and destination"),
            ("cat", "cat requires a file name"),
            ("chmod", "chmod requires mode and file name"),
            ("chmod 755", "chmod requires mode and file name"),
            ("find", "find requires a search pattern"),
            ("grep", "grep requires a pattern and file name"),
            ("grep pattern", "grep requires a pattern and file name"),
            ("zip", "zip requires archive name and files"),
            ("zip bundle.zip", "zip requires archive name and files"),
            ("unzip", "unzip requires archive name"),
        ];

        for (line, expected) in cases {
            assert_eq!(error_text(&mut session, line), expected);
        }
    }

    #[test]
    fn test_usage_errors_are_aliased_too() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        // Alias resolves to the same handler, so the same message
        assert_eq!(error_text(&mut session, "del"), "rm requires a file or directory name");
        assert_eq!(error_text(&mut session, "compress"), "zip requires archive name and files");
    }

    // ---- path errors ----

    #[test]
    fn test_cd_to_missing_directory() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "cd nowhere");

        assert_eq!(
            text,
            format!("Directory not found: {}", temp.path().join("nowhere").display())
        );
        assert_eq!(session.current_dir(), temp.path());
    }

    #[test]
    fn test_cd_onto_a_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("plain.txt"), "x").unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "cd plain.txt");

        assert!(text.starts_with("Not a directory: "));
    }

    #[test]
    fn test_cat_on_directory_and_on_missing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let mut session = session_in(temp.path());

        assert!(error_text(&mut session, "cat sub").starts_with("Not a file: "));
        assert!(error_text(&mut session, "cat ghost.txt").starts_with("Not a file: "));
    }

    #[test]
    fn test_ls_of_missing_path() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "ls nope");

        assert_eq!(
            text,
            format!("No such file or directory: {}", temp.path().join("nope").display())
        );
    }

    #[test]
    fn test_rm_missing_target_without_force() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "rm ghost.txt");

        assert!(text.starts_with("No such file or directory: "));
    }

    #[test]
    fn test_grep_on_missing_file() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "grep pattern ghost.txt");

        assert!(text.starts_with("No such file or directory: "));
    }

    #[test]
    fn test_chmod_on_missing_file() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "chmod 644 ghost.txt");

        assert!(text.starts_with("No such file or directory: "));
    }

    // ---- malformed input errors ----

    #[test]
    fn test_grep_with_invalid_regex() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("log.txt"), "text\n").unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "grep [unclosed log.txt");

        assert!(text.starts_with("Invalid pattern: "));
    }

    #[test]
    fn test_find_with_invalid_regex() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "find [unclosed");

        assert!(text.starts_with("Invalid pattern: "));
    }

    #[test]
    fn test_chmod_with_non_octal_mode() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("f.txt"), "x").unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "chmod banana f.txt");

        assert_eq!(text, "Error changing permissions: invalid octal mode 'banana'");
    }

    #[test]
    fn test_unzip_of_non_archive() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("fake.zip"), "not a zip").unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "unzip fake.zip");

        assert!(text.starts_with("Error extracting zip archive: "));
    }

    #[test]
    fn test_recall_index_beyond_usize() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let text = error_text(&mut session, "!99999999999999999999999999");

        assert_eq!(text, "Invalid history index: 99999999999999999999999999");
    }

    // ---- containment ----

    #[test]
    fn test_failures_leave_later_dispatches_working() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("cd nowhere");
        session.dispatch("cat ghost.txt");
        session.dispatch("grep [bad pattern.txt");

        let outcome = session.dispatch("pwd");
        assert_eq!(outcome.records[1].text, temp.path().display().to_string());
        assert_eq!(session.history().len(), 4);
    }

    #[test]
    fn test_hostile_input_never_panics() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let lines = [
            "",
            "   ",
            "\t\t",
            "\"",
            "'",
            "\"\"",
            "''",
            "!",
            "!!",
            "!-1",
            "! 5",
            "!0x10",
            "cat \"",
            "rm -",
            "cp - - -",
            "echo \u{0}",
            "echo 🦀 crab",
            "ls\u{00a0}nbsp",
        ];

        for line in lines {
            session.dispatch(line);
        }
        let long_line = format!("echo {}", "a".repeat(10_000));
        session.dispatch(&long_line);

        let outcome = session.dispatch("pwd");
        assert_eq!(outcome.records[1].text, temp.path().display().to_string());
    }

    #[test]
    fn test_error_lines_stay_recallable() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("cat typo.txt");

        let outcome = session.dispatch("!0");
        assert_eq!(
            outcome.action,
            Some(micashell::SessionAction::Recall("cat typo.txt".to_string()))
        );
    }
}
