//! Confirmation of mutating operations

use crate::command::ConfirmationPrompt;
use std::io::{BufRead, Write};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Decides whether a mutating operation may proceed
pub trait Confirm {
    /// `true` to issue the request, `false` to abort the invocation silently
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;
}

/// Approves everything (`--force`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        debug!(operation = %prompt.operation, resource = %prompt.target, "Confirmation skipped");
        true
    }
}

/// Describes the action and declines it (`--what-if`)
pub struct WhatIf<W> {
    output: Mutex<W>,
}

impl<W: Write> WhatIf<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }

    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> Confirm for WhatIf<W> {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        let mut output = self
            .output
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(output, "What if: {prompt}") {
            warn!(error = %e, "Failed to write what-if description");
        }
        false
    }
}

/// Asks on the terminal; anything but an explicit yes declines
pub struct TerminalConfirm<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    fn ask(&self, prompt: &ConfirmationPrompt) -> std::io::Result<bool> {
        {
            let mut output = self
                .output
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            writeln!(output, "Are you sure you want to perform this action?")?;
            writeln!(output, "{prompt}")?;
            write!(output, "[Y] Yes  [N] No (default is \"N\"): ")?;
            output.flush()?;
        }

        let mut answer = String::new();
        let read = self
            .input
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .read_line(&mut answer)?;
        if read == 0 {
            // EOF
            return Ok(false);
        }
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        match self.ask(prompt) {
            Ok(approved) => approved,
            Err(e) => {
                warn!(error = %e, "Confirmation prompt failed; treating as declined");
                false
            }
        }
    }
}
