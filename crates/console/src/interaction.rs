use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::console::{InputTextStreamConnector, ShellOutputWriter};
use warden_common::logging::{error, info};
use warden_common::target;

/// Outcome message reported to the operator after a store mutation
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Success(msg) => write!(f, "[OK] {}", msg),
            Notification::Failure(msg) => write!(f, "[FAILED] {}", msg),
        }
    }
}

/// Blocking yes/no capability, consulted before destructive operations
pub trait Confirmer {
    /// Ask the operator to confirm given prompt. Returns true only on an explicit yes.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Fire-and-forget reporting of mutation outcomes
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Confirmer which reads the answer from the shell input
pub struct ConsoleConfirmer {
    input_reader: Arc<Mutex<dyn InputTextStreamConnector + Send>>,
    output_writer: Arc<Mutex<ShellOutputWriter>>,
}

impl ConsoleConfirmer {
    /// ConsoleConfirmer constructor
    ///
    /// # Arguments
    ///
    /// * `input_reader` - Shell input (shared with the REPL loop)
    /// * `output_writer` - Shell output (shared with the REPL loop)
    ///
    /// # Returns
    ///
    /// A newly constructed [`ConsoleConfirmer`] object.
    ///
    pub fn new(
        input_reader: Arc<Mutex<dyn InputTextStreamConnector + Send>>,
        output_writer: Arc<Mutex<ShellOutputWriter>>,
    ) -> Self {
        Self {
            input_reader,
            output_writer,
        }
    }

    fn read_answer(&self, prompt: &str) -> Result<Option<String>, String> {
        {
            let mut output_writer = self.output_writer.lock().map_err(|err| err.to_string())?;
            output_writer
                .write_all(format!("{} [y/N] ", prompt).as_bytes())
                .and_then(|_| output_writer.flush())
                .map_err(|err| err.to_string())?;
        }
        self.input_reader
            .lock()
            .map_err(|err| err.to_string())?
            .next_line()
            .map_err(|err| err.to_string())
    }
}

impl Confirmer for ConsoleConfirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.read_answer(prompt) {
            Ok(Some(answer)) => {
                let answer = answer.trim().to_lowercase();
                answer == "y" || answer == "yes"
            }
            Ok(None) => false,
            Err(err) => {
                error(
                    &target!(),
                    &format!("Failed reading confirmation: err={}", &err),
                );
                false
            }
        }
    }
}

/// Confirmer used when the console runs non-interactively (`--assume-yes`)
#[derive(Default)]
pub struct AssumeYesConfirmer;

impl Confirmer for AssumeYesConfirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        info(&target!(), &format!("Auto-confirmed: prompt={}", prompt));
        true
    }
}

/// Notifier writing `[OK]`/`[FAILED]` lines to the shell output
pub struct ConsoleNotifier {
    output_writer: Arc<Mutex<ShellOutputWriter>>,
}

impl ConsoleNotifier {
    pub fn new(output_writer: Arc<Mutex<ShellOutputWriter>>) -> Self {
        Self { output_writer }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        match &notification {
            Notification::Success(msg) => info(&target!(), msg),
            Notification::Failure(msg) => error(&target!(), msg),
        }

        let write_result = match self.output_writer.lock() {
            Ok(mut output_writer) => output_writer.write_text(&notification.to_string()),
            Err(err) => {
                error(&target!(), &format!("Shell output unavailable: err={}", err));
                return;
            }
        };
        if let Err(err) = write_result {
            error(&target!(), &format!("{:?}", err));
        }
    }
}
