//! Terminal notifier: alerts on stderr, confirmations via `dialoguer`.

use std::sync::atomic::{AtomicBool, Ordering};

use spaces_core::error::AppError;
use spaces_view::Notifier;

use crate::output;

/// Prompts on the terminal unless `--yes` was given.
#[derive(Debug)]
pub struct TerminalNotifier {
    assume_yes: bool,
    alerted: AtomicBool,
}

impl TerminalNotifier {
    /// `assume_yes` answers every confirmation with yes.
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            alerted: AtomicBool::new(false),
        }
    }

    /// Whether a failure has been reported since this notifier was created.
    pub fn alerted(&self) -> bool {
        self.alerted.load(Ordering::SeqCst)
    }

    /// Fails with `message` when the action that just returned reported a
    /// failure. A declined confirmation is not an error.
    pub fn ensure_no_failure(&self, message: &str) -> Result<(), AppError> {
        if self.alerted() {
            Err(AppError::external(message))
        } else {
            Ok(())
        }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        self.alerted.store(true, Ordering::SeqCst);
        output::print_error(message);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Input error: {}", e);
                false
            }
        }
    }
}
