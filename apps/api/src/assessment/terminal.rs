//! Scripted terminal: a linear state machine over a scenario's steps.
//!
//! The step counter lives on the server. A scenario is complete only when the
//! counter has moved past the last step.

use serde::{Deserialize, Serialize};

use crate::assessment::bank::{TerminalScenario, TerminalStep};

const WELCOME_BANNER: [&str; 2] = [
    "Welcome to FirstCommit Terminal v2.0",
    "Type 'help' for instructions.",
];

/// Lines kept in the recorded result.
pub const HISTORY_TAIL: usize = 10;

/// Lines kept in the live session. Older lines are dropped.
pub const MAX_HISTORY_LINES: usize = 100;

/// Longest command accepted, in characters.
pub const MAX_COMMAND_LEN: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerminalSession {
    pub scenario_id: String,
    pub step: usize,
    pub history: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Accepted,
    Rejected,
    Completed,
    Cleared,
    Help,
    AlreadyCompleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub status: CommandStatus,
    /// Lines produced by this command, including the echoed prompt.
    pub output: Vec<String>,
}

impl TerminalSession {
    pub fn start(scenario: &TerminalScenario) -> Self {
        let mut history: Vec<String> = WELCOME_BANNER.iter().map(|l| l.to_string()).collect();
        history.push(format!("SCENARIO: {}", scenario.id.to_uppercase()));
        if let Some(first) = scenario.steps.first() {
            history.push(format!("Task 1: {}", first.instruction));
        }
        Self {
            scenario_id: scenario.id.to_string(),
            step: 0,
            history,
        }
    }

    pub fn is_complete(&self, scenario: &TerminalScenario) -> bool {
        self.step >= scenario.steps.len()
    }

    /// Last `HISTORY_TAIL` lines of the transcript.
    pub fn history_tail(&self) -> &[String] {
        let start = self.history.len().saturating_sub(HISTORY_TAIL);
        &self.history[start..]
    }

    pub fn submit(&mut self, scenario: &TerminalScenario, raw_command: &str) -> CommandOutcome {
        let cmd = raw_command.trim();

        if cmd == "clear" {
            self.history.clear();
            return CommandOutcome {
                status: CommandStatus::Cleared,
                output: vec![],
            };
        }

        if cmd.chars().count() > MAX_COMMAND_LEN {
            let echoed: String = cmd.chars().take(MAX_COMMAND_LEN).collect();
            let output = vec![
                format!("$ {echoed}..."),
                format!("Command too long (max {MAX_COMMAND_LEN} characters)."),
            ];
            self.append(&output);
            return CommandOutcome {
                status: CommandStatus::Rejected,
                output,
            };
        }

        let mut output = vec![format!("$ {cmd}")];
        let status = match scenario.steps.get(self.step) {
            None => {
                output.push("Test already completed.".to_string());
                CommandStatus::AlreadyCompleted
            }
            Some(step) if cmd == "help" => {
                output.push(format!("Current task: {}", step.instruction));
                output.push(format!("Hint: {}", step.hint));
                CommandStatus::Help
            }
            Some(step) if command_matches(step, cmd) => {
                output.push(step.success_message.to_string());
                self.step += 1;
                match scenario.steps.get(self.step) {
                    Some(next) => {
                        output.push(format!("\n[NEXT TASK]: {}", next.instruction));
                        CommandStatus::Accepted
                    }
                    None => {
                        output.push(
                            "\n[SYSTEM] All tasks completed successfully. Verifying...".to_string(),
                        );
                        CommandStatus::Completed
                    }
                }
            }
            Some(step) => {
                output.push("Command not recognized or incorrect for this task.".to_string());
                output.push(format!("Hint: {}", step.hint));
                CommandStatus::Rejected
            }
        };

        self.append(&output);
        CommandOutcome { status, output }
    }

    fn append(&mut self, lines: &[String]) {
        self.history.extend_from_slice(lines);
        let overflow = self.history.len().saturating_sub(MAX_HISTORY_LINES);
        self.history.drain(..overflow);
    }
}

/// Exact match, or prefix match for allow-list entries ending in `*`.
pub fn command_matches(step: &TerminalStep, cmd: &str) -> bool {
    step.valid_commands.iter().any(|valid| match valid.strip_suffix('*') {
        Some(prefix) => cmd.starts_with(prefix),
        None => cmd == *valid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::bank::scenario;

    fn basics() -> &'static TerminalScenario {
        scenario("basics").unwrap()
    }

    #[test]
    fn test_start_shows_banner_and_first_task() {
        let s = TerminalSession::start(basics());
        assert_eq!(s.step, 0);
        assert_eq!(s.history[0], "Welcome to FirstCommit Terminal v2.0");
        assert_eq!(s.history[2], "SCENARIO: BASICS");
        assert_eq!(s.history[3], "Task 1: List all files (including hidden ones).");
    }

    #[test]
    fn test_full_run_completes() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        assert_eq!(s.submit(sc, "ls -la").status, CommandStatus::Accepted);
        assert_eq!(s.submit(sc, "  mkdir proyectos ").status, CommandStatus::Accepted);
        let last = s.submit(sc, "top");
        assert_eq!(last.status, CommandStatus::Completed);
        assert!(last.output.last().unwrap().contains("All tasks completed"));
        assert!(s.is_complete(sc));
    }

    #[test]
    fn test_wrong_command_gives_hint_and_stays() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        let out = s.submit(sc, "dir");
        assert_eq!(out.status, CommandStatus::Rejected);
        assert_eq!(out.output[0], "$ dir");
        assert_eq!(out.output[2], "Hint: Try 'ls' with flags like -a");
        assert_eq!(s.step, 0);
    }

    #[test]
    fn test_steps_must_be_done_in_order() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        assert_eq!(s.submit(sc, "ps").status, CommandStatus::Rejected);
        assert_eq!(s.step, 0);
    }

    #[test]
    fn test_prefix_commands_not_matched_without_wildcard() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        assert_eq!(s.submit(sc, "ls -la /etc").status, CommandStatus::Rejected);
    }

    #[test]
    fn test_wildcard_entry_matches_prefix() {
        let step = TerminalStep {
            instruction: "Inspect a log",
            valid_commands: &["cat *", "less"],
            success_message: "ok",
            hint: "cat it",
        };
        assert!(command_matches(&step, "cat /var/log/syslog"));
        assert!(command_matches(&step, "less"));
        assert!(!command_matches(&step, "less /var/log/syslog"));
        assert!(!command_matches(&step, "tail -f x"));
    }

    #[test]
    fn test_clear_wipes_history_keeps_step() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        s.submit(sc, "ls -a");
        let out = s.submit(sc, "clear");
        assert_eq!(out.status, CommandStatus::Cleared);
        assert!(s.history.is_empty());
        assert_eq!(s.step, 1);
    }

    #[test]
    fn test_help_repeats_task() {
        let sc = scenario("file_ops").unwrap();
        let mut s = TerminalSession::start(sc);
        let out = s.submit(sc, "help");
        assert_eq!(out.status, CommandStatus::Help);
        assert!(out.output[1].contains("Print current working directory"));
        assert_eq!(s.step, 0);
    }

    #[test]
    fn test_commands_after_completion() {
        let sc = scenario("file_ops").unwrap();
        let mut s = TerminalSession::start(sc);
        for cmd in ["pwd", "touch log.txt", "rm ./log.txt"] {
            s.submit(sc, cmd);
        }
        let out = s.submit(sc, "pwd");
        assert_eq!(out.status, CommandStatus::AlreadyCompleted);
        assert_eq!(out.output[1], "Test already completed.");
    }

    #[test]
    fn test_clear_after_completion_keeps_completed() {
        let sc = scenario("file_ops").unwrap();
        let mut s = TerminalSession::start(sc);
        for cmd in ["pwd", "touch log.txt", "rm ./log.txt"] {
            s.submit(sc, cmd);
        }
        let out = s.submit(sc, "clear");
        assert_eq!(out.status, CommandStatus::Cleared);
        assert!(out.output.is_empty());
        assert!(s.history.is_empty());
        assert!(s.is_complete(sc));
        assert_eq!(s.submit(sc, "ls").status, CommandStatus::AlreadyCompleted);
    }

    #[test]
    fn test_history_capped_under_flood() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        let huge = "x".repeat(100_000);
        for _ in 0..200 {
            let out = s.submit(sc, &huge);
            assert_eq!(out.status, CommandStatus::Rejected);
        }
        assert!(s.history.len() <= MAX_HISTORY_LINES);
        assert!(s.history.iter().all(|l| l.chars().count() <= MAX_COMMAND_LEN + 8));
        assert!(serde_json::to_string(&s).unwrap().len() < 64 * 1024);
        assert_eq!(s.step, 0);
    }

    #[test]
    fn test_overlong_command_rejected_without_advancing() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        let padded = format!("ls -la{}", " ".repeat(MAX_COMMAND_LEN));
        // Trailing spaces are trimmed, so this is still a valid command.
        assert_eq!(s.submit(sc, &padded).status, CommandStatus::Accepted);
        let long = format!("mkdir {}", "p".repeat(MAX_COMMAND_LEN));
        let out = s.submit(sc, &long);
        assert_eq!(out.status, CommandStatus::Rejected);
        assert!(out.output[1].starts_with("Command too long"));
        assert_eq!(s.step, 1);
    }

    #[test]
    fn test_history_tail_bounded() {
        let sc = basics();
        let mut s = TerminalSession::start(sc);
        for _ in 0..10 {
            s.submit(sc, "whoami");
        }
        assert_eq!(s.history_tail().len(), HISTORY_TAIL);
        assert_eq!(s.history_tail().last().unwrap(), "Hint: Try 'ls' with flags like -a");
    }
}
