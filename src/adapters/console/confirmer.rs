//! Confirmer adapters.
//!
//! - **StdinConfirmer** - Asks on the terminal and reads the answer from stdin
//! - **FixedConfirmer** - Always answers the same way (`--yes`, tests)

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::Confirmer;

/// Answers accepted as agreement, compared case-insensitively.
const AFFIRMATIVE: [&str; 3] = ["y", "yes", "ya"];

/// Prompts on stderr and reads one line from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirmer;

impl StdinConfirmer {
    pub fn new() -> Self {
        Self
    }
}

/// True if `answer` is one of the affirmative replies.
fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();

        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{} [y/N] ", prompt);
            let _ = stderr.flush();

            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt task failed");
                false
            }
        }
    }
}

/// Gives a fixed answer and records every prompt it was shown.
#[derive(Debug, Clone)]
pub struct FixedConfirmer {
    answer: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FixedConfirmer {
    pub fn accepting() -> Self {
        Self::new(true)
    }

    pub fn declining() -> Self {
        Self::new(false)
    }

    fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Confirmer for FixedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        for answer in ["y", "Y\n", " yes ", "YA"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
    }

    #[test]
    fn anything_else_declines() {
        for answer in ["", "\n", "n", "no", "tidak", "yess"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }

    #[tokio::test]
    async fn fixed_confirmer_records_prompts() {
        let confirmer = FixedConfirmer::declining();

        assert!(!confirmer.confirm("Hapus?").await);
        assert_eq!(confirmer.prompts(), vec!["Hapus?".to_string()]);
    }
}
