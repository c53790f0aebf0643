use std::sync::{Arc, Mutex};

use crate::console::{InputTextStreamConnector, ShellOutputWriter};
use crate::controller::{AdminController, Response};
use crate::request::RequestProcessor;
use warden_common::error::{AppError, CODE_OK};
use warden_common::logging::info;
use warden_common::target;

/// Admin console REPL: reads command lines, processes them and writes the resulting screens
pub struct AdminShell {
    /// Command line source (shared with the console confirmer)
    input_reader: Arc<Mutex<dyn InputTextStreamConnector + Send>>,
    /// Shell output (shared with the console notifier)
    output_writer: Arc<Mutex<ShellOutputWriter>>,
    /// Command text parser
    request_processor: RequestProcessor,
    /// Request router
    controller: AdminController,
}

impl AdminShell {
    /// AdminShell constructor
    ///
    /// # Arguments
    ///
    /// * `input_reader` - Command line source
    /// * `output_writer` - Shell output
    /// * `controller` - Request router, owning the entity store
    ///
    /// # Returns
    ///
    /// A newly constructed [`AdminShell`] object.
    ///
    pub fn new(
        input_reader: Arc<Mutex<dyn InputTextStreamConnector + Send>>,
        output_writer: Arc<Mutex<ShellOutputWriter>>,
        controller: AdminController,
    ) -> Self {
        Self {
            input_reader,
            output_writer,
            request_processor: RequestProcessor::new(),
            controller,
        }
    }

    /// Run REPL until 'quit' or end of input
    pub fn run(&mut self) -> Result<(), AppError> {
        self.write_text(&self.controller.render_current()?)?;
        self.write_prompt(true)?;

        loop {
            let line = self
                .input_reader
                .lock()
                .map_err(|err| {
                    AppError::General(format!("Failed to access shell input lock: err={}", err))
                })?
                .next_line()?;

            let line = match line {
                Some(line) => line,
                None => break,
            };

            if !self.process_line(&line)? {
                break;
            }
        }

        info(&target!(), "Admin console session ended");
        Ok(())
    }

    /// Process single command line. Returns false when the session should end.
    fn process_line(&mut self, line: &str) -> Result<bool, AppError> {
        let controller = &mut self.controller;
        let result = self
            .request_processor
            .parse(line)
            .and_then(|request| controller.process(request));

        match result {
            Ok(Response::Quit) => return Ok(false),
            Ok(Response::Text(text)) => self.write_text(&text)?,
            Ok(Response::None) => {}
            Err(AppError::GenWithCodeAndMsg(CODE_OK, msg)) => self.write_text(&msg)?,
            Err(err) => self.controller.notify_failure(&err),
        }

        self.write_prompt(false)?;
        Ok(true)
    }

    fn lock_output(&self) -> Result<std::sync::MutexGuard<'_, ShellOutputWriter>, AppError> {
        self.output_writer.lock().map_err(|err| {
            AppError::General(format!("Failed to access shell output lock: err={}", err))
        })
    }

    fn write_text(&self, text: &str) -> Result<(), AppError> {
        self.lock_output()?.write_text(text)
    }

    fn write_prompt(&self, include_welcome: bool) -> Result<(), AppError> {
        self.lock_output()?.write_shell_prompt(include_welcome)
    }
}
