//! Integration tests for multi-step dispatch flows
//!
//! These tests chain several dispatches through one session and check
//! that state (directory cursor, history, recall) carries across them
//! the way an interactive user would experience it.

use std::path::Path;

use micashell::{BackgroundTask, Config, OutputTag, Session, SessionAction};
use tempfile::TempDir;

#[cfg(test)]
mod dispatch_flow_tests {
    use super::*;

    fn session_in(dir: &Path) -> Session {
        let mut config = Config::default();
        config.shell.startup_directory = Some(dir.to_path_buf());
        Session::with_config(config).unwrap()
    }

    fn last_text(session: &mut Session, line: &str) -> String {
        session
            .dispatch(line)
            .records
            .last()
            .map(|r| r.text.clone())
            .unwrap_or_default()
    }

    // ---- working sessions ----

    #[test]
    fn test_full_working_session() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("mkdir project");
        session.dispatch("cd project");
        session.dispatch("touch notes.txt");

        let listing = session.dispatch("ls");
        assert!(listing.records.iter().any(|r| r.text == "  notes.txt"));

        session.dispatch("mv notes.txt journal.txt");
        let listing = session.dispatch("ls");
        assert!(listing.records.iter().any(|r| r.text == "  journal.txt"));
        assert!(!listing.records.iter().any(|r| r.text == "  notes.txt"));

        session.dispatch("rm journal.txt");
        assert_eq!(last_text(&mut session, "ls"), "Directory is empty.");
    }

    #[test]
    fn test_relative_paths_follow_the_cursor() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("mkdir a/b");
        session.dispatch("cd a");
        session.dispatch("touch b/inner.txt");

        assert!(temp.path().join("a/b/inner.txt").is_file());
    }

    #[test]
    fn test_quoted_filenames_survive_the_whole_flow() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("touch \"my file.txt\"");
        assert!(temp.path().join("my file.txt").is_file());

        let listing = session.dispatch("ls");
        assert!(listing.records.iter().any(|r| r.text == "  my file.txt"));

        let viewed = session.dispatch("cat 'my file.txt'");
        // Empty file between the two banners
        assert_eq!(viewed.records.len(), 4);
        assert_eq!(viewed.records[2].text, "");
    }

    #[test]
    fn test_argument_case_is_preserved() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("MKDIR Upper");

        assert!(temp.path().join("Upper").is_dir());
        assert!(!temp.path().join("upper").exists());
    }

    // ---- history and recall ----

    #[test]
    fn test_recall_then_resubmit_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());
        session.dispatch("echo alpha");

        let outcome = session.dispatch("!0");
        let recalled = match outcome.action {
            Some(SessionAction::Recall(text)) => text,
            other => panic!("expected a recall action, got {:?}", other),
        };
        assert_eq!(recalled, "echo alpha");

        // The frontend puts the text back in the input and the user submits it
        let rerun = session.dispatch(&recalled);
        assert_eq!(rerun.records[1].text, "alpha");
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().get(2).unwrap().text, "echo alpha");
    }

    #[test]
    fn test_bang_lines_are_themselves_recallable() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());
        session.dispatch("pwd");
        session.dispatch("!0");

        // Entry 1 is the literal "!0" line
        let outcome = session.dispatch("!1");

        assert_eq!(
            outcome.action,
            Some(SessionAction::Recall("!0".to_string()))
        );
    }

    #[test]
    fn test_recall_error_does_not_derail_the_session() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let outcome = session.dispatch("!42");
        assert!(outcome.records.last().unwrap().is_error());

        assert_eq!(last_text(&mut session, "pwd"), temp.path().display().to_string());
    }

    #[test]
    fn test_history_accumulates_across_many_commands() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        for i in 0..50 {
            session.dispatch(&format!("echo line {}", i));
        }

        assert_eq!(session.history().len(), 50);
        assert_eq!(session.history().get(0).unwrap().text, "echo line 0");
        assert_eq!(session.history().get(49).unwrap().text, "echo line 49");

        let outcome = session.dispatch("history");
        // Echo + header + 50 earlier entries + the history line itself
        assert_eq!(outcome.records.len(), 53);
        assert_eq!(outcome.records.last().unwrap().text, "50: history");
    }

    #[test]
    fn test_clear_resets_the_log_but_not_history() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());
        session.dispatch("echo before");

        let outcome = session.dispatch("clear");
        assert_eq!(outcome.action, Some(SessionAction::ClearLog));

        let listed = session.dispatch("history");
        assert!(listed.records.iter().any(|r| r.text == "0: echo before"));
    }

    // ---- external fallback ----

    #[cfg(unix)]
    #[test]
    fn test_external_commands_run_in_the_cursor_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let mut session = session_in(temp.path());
        session.dispatch("cd sub");

        let outcome = session.dispatch("sh -c pwd");

        assert_eq!(outcome.records[1].tag, OutputTag::None);
        assert!(outcome.records[1].text.ends_with("sub"));
    }

    #[cfg(unix)]
    #[test]
    fn test_builtin_and_external_output_interleave_in_one_session() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        assert_eq!(last_text(&mut session, "echo builtin"), "builtin");
        assert_eq!(last_text(&mut session, "/bin/echo external"), "external");
        assert_eq!(last_text(&mut session, "echo builtin again"), "builtin again");
    }

    #[test]
    fn test_external_launch_failure_is_contained() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let outcome = session.dispatch("no-such-binary-2718 --flag");

        assert!(outcome.records[1].is_error());
        assert!(outcome.records[1]
            .text
            .starts_with("Error executing command: "));
        // The failed line is still recallable
        let recall = session.dispatch("!0");
        assert_eq!(
            recall.action,
            Some(SessionAction::Recall("no-such-binary-2718 --flag".to_string()))
        );
    }

    #[test]
    fn test_exit_asks_only_while_frontend_work_is_registered() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let plain = session.dispatch("exit");
        assert_eq!(
            plain.action,
            Some(SessionAction::Exit {
                needs_confirmation: false
            })
        );

        session.register_background_task(BackgroundTask::new("long upload"));
        let guarded = session.dispatch("exit");
        assert_eq!(
            guarded.action,
            Some(SessionAction::Exit {
                needs_confirmation: true
            })
        );
    }

    // ---- session isolation ----

    #[test]
    fn test_two_sessions_do_not_share_state() {
        let temp_a = TempDir::new().unwrap();
        let temp_b = TempDir::new().unwrap();
        std::fs::create_dir(temp_a.path().join("only_in_a")).unwrap();
        let mut session_a = session_in(temp_a.path());
        let mut session_b = session_in(temp_b.path());

        session_a.dispatch("cd only_in_a");
        session_a.dispatch("echo from a");

        assert_eq!(session_b.current_dir(), temp_b.path());
        assert!(session_b.history().is_empty());
        assert_ne!(session_a.id(), session_b.id());

        session_b.dispatch("pwd");
        assert_eq!(session_b.history().len(), 1);
        assert_eq!(session_a.history().len(), 2);
    }

    #[test]
    fn test_cursor_never_touches_the_process_directory() {
        let before = std::env::current_dir().unwrap();
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let mut session = session_in(temp.path());

        session.dispatch("cd sub");

        assert!(session.current_dir().ends_with("sub"));
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
