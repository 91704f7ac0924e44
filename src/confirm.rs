//! Consent to overwrite existing output.

use std::io::{self, BufRead, IsTerminal, Write};

use log::{debug, warn};

/// Answers a yes/no question. `default` is the answer assumed when the user
/// gives none.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool;
}

/// What the streaming writer does when its output already exists.
pub enum OverwritePolicy {
    /// Overwrite without asking.
    AlwaysConfirm,
    /// Never overwrite; the write is skipped without asking.
    NeverPrompt,
    /// Ask the collaborator each time.
    InteractivePrompt(Box<dyn Confirm>),
}

impl OverwritePolicy {
    pub fn interactive(confirmer: impl Confirm + 'static) -> Self {
        OverwritePolicy::InteractivePrompt(Box::new(confirmer))
    }

    pub fn allows_overwrite(&mut self, target: &str) -> bool {
        match self {
            OverwritePolicy::AlwaysConfirm => true,
            OverwritePolicy::NeverPrompt => false,
            OverwritePolicy::InteractivePrompt(confirmer) => {
                confirmer.confirm(&format!("Overwrite {target}?"), false)
            }
        }
    }
}

impl std::fmt::Debug for OverwritePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverwritePolicy::AlwaysConfirm => f.write_str("AlwaysConfirm"),
            OverwritePolicy::NeverPrompt => f.write_str("NeverPrompt"),
            OverwritePolicy::InteractivePrompt(_) => f.write_str("InteractivePrompt"),
        }
    }
}

/// Prompts on a terminal-like pair of streams until it gets y/Y/n/N or an
/// empty line.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        let choices = if default { "[y]|n" } else { "[n]|y" };
        loop {
            let _ = write!(self.output, "{prompt} {choices}: ");
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    debug!("No answer available for '{prompt}'; using default");
                    return default;
                }
                Ok(_) => {}
            }
            match line.trim_end_matches(['\r', '\n']) {
                "" => return default,
                "y" | "Y" => return true,
                "n" | "N" => return false,
                _ => {
                    let _ = writeln!(self.output, "please enter y or n.");
                }
            }
        }
    }
}

/// Prompts on stderr and reads the answer from stdin. Stdin is only locked
/// while a question is pending, and never read at all unless it is a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            warn!("stdin is not a terminal; cannot ask '{prompt}' (use --yes to overwrite)");
            return default;
        }
        PromptConfirm::new(stdin.lock(), io::stderr()).confirm(prompt, default)
    }
}
