use std::io::{self, BufRead, Write};

use warden_common::error::AppError;

pub const SHELL_MSG_APP_TITLE: &str = "Warden RBAC Admin Console";
pub const SHELL_MSG_APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SHELL_MSG_APP_HELP: &str = "(enter 'help' for commands)";
pub const SHELL_PROMPT: &str = "> ";

#[cfg(windows)]
pub const LINE_ENDING: &'static str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Redraw the shell prompt on STDOUT (used as the logger visitor)
///
/// # Arguments
///
/// * `include_welcome` - Whether to print the title/version banner before the prompt
///
/// # Returns
///
/// A [`Result`] indicating whether the prompt could be written.
///
pub fn write_shell_prompt(include_welcome: bool) -> Result<(), AppError> {
    ShellOutputWriter::new(None).write_shell_prompt(include_welcome)
}

/// REPL shell output sink (STDOUT unless another writer is supplied)
pub struct ShellOutputWriter {
    writer: Box<dyn Write + Send>,
}

impl ShellOutputWriter {
    /// ShellOutputWriter constructor
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination for shell output. `None` selects STDOUT.
    ///
    /// # Returns
    ///
    /// A newly constructed [`ShellOutputWriter`] object.
    ///
    pub fn new(writer: Option<Box<dyn Write + Send>>) -> Self {
        Self {
            writer: writer.unwrap_or_else(|| Box::new(io::stdout())),
        }
    }

    /// Write the prompt, optionally preceded by the welcome banner
    pub fn write_shell_prompt(&mut self, include_welcome: bool) -> Result<(), AppError> {
        let prompt = match include_welcome {
            true => format!(
                "{} v{} {}{}{}",
                SHELL_MSG_APP_TITLE,
                SHELL_MSG_APP_VERSION,
                SHELL_MSG_APP_HELP,
                LINE_ENDING,
                SHELL_PROMPT
            ),
            false => SHELL_PROMPT.to_string(),
        };
        self.write_flushed(prompt.as_bytes(), "Error writing prompt")
    }

    /// Write text block, terminated by a line ending
    pub fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        let text = match text.ends_with('\n') {
            true => text.to_string(),
            false => format!("{}{}", text, LINE_ENDING),
        };
        self.write_flushed(text.as_bytes(), "Error writing shell output")
    }

    fn write_flushed(&mut self, data: &[u8], failure_msg: &str) -> Result<(), AppError> {
        self.writer
            .write_all(data)
            .and_then(|_| self.writer.flush())
            .map_err(|err| AppError::GenWithMsgAndErr(failure_msg.to_string(), Box::new(err)))
    }
}

impl Write for ShellOutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Source of REPL shell input lines
pub trait InputTextStreamConnector {
    /// Blocking call to retrieve next input line (trailing whitespace removed)
    ///
    /// Returns `Ok(None)` once the input stream is exhausted
    ///
    fn next_line(&mut self) -> Result<Option<String>, AppError>;
}

/// Line reader over STDIN (or a supplied buffered reader)
pub struct ShellInputReader {
    reader: Box<dyn BufRead + Send>,
}

impl ShellInputReader {
    /// ShellInputReader constructor. `None` selects STDIN.
    pub fn new(reader: Option<Box<dyn BufRead + Send>>) -> Self {
        Self {
            reader: reader.unwrap_or_else(|| Box::new(io::BufReader::new(io::stdin()))),
        }
    }
}

impl InputTextStreamConnector for ShellInputReader {
    fn next_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim_end().to_string())),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(AppError::IoWithMsg(
                "Failed reading shell input".to_string(),
                err,
            )),
        }
    }
}

/// Unit tests
#[cfg(test)]
pub mod tests {

    use super::*;
    use mockall::{mock, predicate};
    use std::io::{Cursor, Read};
    use std::sync::mpsc;
    use warden_common::testutils::{gather_rcvd_text_channel_data, ChannelWriter};

    // mocks
    // =====

    mock! {
        pub InpTxtStreamConnector {}
        impl InputTextStreamConnector for InpTxtStreamConnector {
            fn next_line(&mut self) -> Result<Option<String>, AppError>;
        }
    }

    mock! {
        pub Writer {}
        impl Write for Writer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
            fn write_all(&mut self, mut buf: &[u8]) -> io::Result<()>;
            fn flush(&mut self) -> io::Result<()>;
        }
    }

    mock! {
        pub Reader {}
        impl Read for Reader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
        }
        impl BufRead for Reader {
            fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
            fn fill_buf(&mut self) -> io::Result<&'static [u8]>;
            fn consume(&mut self, amt: usize);
        }
    }

    // utils
    // =====

    /// Shell writer sending all output to the returned channel receiver
    pub fn create_channel_shell_writer() -> (ShellOutputWriter, mpsc::Receiver<Vec<u8>>) {
        let output_channel = mpsc::channel();
        let channel_writer = ChannelWriter {
            channel_sender: output_channel.0,
        };
        (
            ShellOutputWriter::new(Some(Box::new(channel_writer))),
            output_channel.1,
        )
    }

    // tests
    // =====

    #[test]
    fn shellout_write_shell_prompt_with_welcome() {
        let expected_output = format!(
            "{} v{} {}\n{}",
            SHELL_MSG_APP_TITLE, SHELL_MSG_APP_VERSION, SHELL_MSG_APP_HELP, SHELL_PROMPT
        );

        let (mut shell_output, output_receiver) = create_channel_shell_writer();

        if let Err(err) = shell_output.write_shell_prompt(true) {
            panic!("Unexpected function result: err={:?}", &err);
        }

        assert_eq!(
            gather_rcvd_text_channel_data(&output_receiver),
            expected_output
        );
    }

    #[test]
    fn shellout_write_shell_prompt_when_write_fails() {
        let mut shell_writer = MockWriter::new();
        shell_writer
            .expect_write_all()
            .times(1)
            .return_once(|_| Err(io::Error::from(io::ErrorKind::BrokenPipe)));
        shell_writer.expect_flush().never();

        let mut shell_output = ShellOutputWriter::new(Some(Box::new(shell_writer)));

        match shell_output.write_shell_prompt(true) {
            Err(AppError::GenWithMsgAndErr(msg, _)) => assert_eq!(msg, "Error writing prompt"),
            result => panic!("Unexpected result: result={:?}", &result),
        }
    }

    #[test]
    fn shellout_write_text_when_flush_fails() {
        let mut shell_writer = MockWriter::new();
        shell_writer
            .expect_write_all()
            .times(1)
            .return_once(|_| Ok(()));
        shell_writer
            .expect_flush()
            .times(1)
            .return_once(|| Err(io::Error::from(io::ErrorKind::BrokenPipe)));

        let mut shell_output = ShellOutputWriter::new(Some(Box::new(shell_writer)));

        if shell_output.write_text("Users (3 total)").is_ok() {
            panic!("Unexpected successful result");
        }
    }

    #[test]
    fn shellout_write_shell_prompt_without_welcome() {
        let (mut shell_output, output_receiver) = create_channel_shell_writer();

        if let Err(err) = shell_output.write_shell_prompt(false) {
            panic!("Unexpected function result: err={:?}", &err);
        }

        assert_eq!(
            gather_rcvd_text_channel_data(&output_receiver),
            SHELL_PROMPT
        );
    }

    #[test]
    fn shellout_write_text_appends_line_ending() {
        let (mut shell_output, output_receiver) = create_channel_shell_writer();

        shell_output.write_text("line1").unwrap();
        shell_output.write_text("line2\n").unwrap();

        assert_eq!(
            gather_rcvd_text_channel_data(&output_receiver),
            "line1\nline2\n"
        );
    }

    #[test]
    fn shellinp_next_line_when_2_lines() {
        let cursor = Cursor::new("line1  \nline2\n".as_bytes().to_vec());
        let mut input_reader = ShellInputReader::new(Some(Box::new(cursor)));

        let mut recvd_lines = vec![];
        loop {
            match input_reader.next_line() {
                Ok(Some(line)) => recvd_lines.push(line),
                Ok(None) => break,
                Err(err) => panic!("Unexpected next line result: err={:?}", &err),
            }
        }

        assert_eq!(recvd_lines, vec!["line1", "line2"]);
    }

    #[test]
    fn shellinp_next_line_when_no_lines() {
        let cursor = Cursor::new(vec![]);
        let mut input_reader = ShellInputReader::new(Some(Box::new(cursor)));

        match input_reader.next_line() {
            Ok(None) => {}
            result => panic!("Unexpected next line result: result={:?}", &result),
        }
    }

    #[test]
    fn shellinp_next_line_when_eof_read_error() {
        let mut reader = MockReader::new();
        reader
            .expect_read_line()
            .with(predicate::always())
            .times(1)
            .returning(|_| Err(io::Error::from(io::ErrorKind::UnexpectedEof)));

        let mut input_reader = ShellInputReader::new(Some(Box::new(reader)));

        match input_reader.next_line() {
            Ok(None) => {}
            result => panic!("Unexpected next line result: result={:?}", &result),
        }
    }

    #[test]
    fn shellinp_next_line_when_io_error() {
        let mut reader = MockReader::new();
        reader
            .expect_read_line()
            .with(predicate::always())
            .times(1)
            .returning(|_| Err(io::Error::from(io::ErrorKind::BrokenPipe)));

        let mut input_reader = ShellInputReader::new(Some(Box::new(reader)));

        if let Ok(line) = input_reader.next_line() {
            panic!("Unexpected successful result: line={:?}", &line);
        }
    }
}
