pub(crate) mod config;
pub(crate) mod console;
pub(crate) mod controller;
pub(crate) mod interaction;
pub(crate) mod modal;
pub(crate) mod navigation;
pub(crate) mod repository;
pub(crate) mod request;
pub(crate) mod shell;
pub(crate) mod store;
pub(crate) mod view;

pub mod api {
    use std::sync::{Arc, Mutex};

    pub use crate::config::AppConfig;
    use crate::console::{InputTextStreamConnector, ShellInputReader, ShellOutputWriter};
    pub use crate::console::write_shell_prompt;
    use crate::controller::AdminController;
    use crate::interaction::{AssumeYesConfirmer, Confirmer, ConsoleConfirmer, ConsoleNotifier};
    use crate::shell::AdminShell;
    use crate::store::EntityStore;
    use warden_common::error::AppError;
    use warden_common::logging::info;
    use warden_common::target;

    /// Component lifecycle methods
    pub trait ComponentLifecycle {
        /// Component start
        fn start(&mut self) -> Result<(), AppError>;

        /// Component stop
        fn stop(&mut self) -> Result<(), AppError>;
    }

    pub struct MainProcessor {
        _app_config: Arc<AppConfig>,
        shell: AdminShell,
    }

    impl MainProcessor {
        /// MainProcessor constructor, using STDIN/STDOUT for the shell
        pub fn new(app_config: AppConfig) -> Self {
            Self::with_shell_io(
                app_config,
                Arc::new(Mutex::new(ShellInputReader::new(None))),
                Arc::new(Mutex::new(ShellOutputWriter::new(None))),
            )
        }

        /// MainProcessor constructor for the given shell input/output
        pub(crate) fn with_shell_io(
            app_config: AppConfig,
            input_reader: Arc<Mutex<dyn InputTextStreamConnector + Send>>,
            output_writer: Arc<Mutex<ShellOutputWriter>>,
        ) -> Self {
            let store = EntityStore::new(
                app_config.permission_repo.clone(),
                app_config.role_repo.clone(),
                app_config.user_repo.clone(),
                app_config.dark_theme,
            );

            let confirmer: Box<dyn Confirmer + Send> = match app_config.assume_yes {
                true => Box::new(AssumeYesConfirmer),
                false => Box::new(ConsoleConfirmer::new(
                    input_reader.clone(),
                    output_writer.clone(),
                )),
            };
            let notifier = Box::new(ConsoleNotifier::new(output_writer.clone()));

            Self {
                _app_config: Arc::new(app_config),
                shell: AdminShell::new(
                    input_reader,
                    output_writer,
                    AdminController::new(store, confirmer, notifier),
                ),
            }
        }
    }

    impl ComponentLifecycle for MainProcessor {
        /// Component start: run admin console REPL
        fn start(&mut self) -> Result<(), AppError> {
            self.shell.run()?;
            self.stop()
        }

        /// Component stop: collections are process-local, nothing to persist
        fn stop(&mut self) -> Result<(), AppError> {
            info(&target!(), "Admin console stopped");
            Ok(())
        }
    }

    /// Unit tests
    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::tests::create_app_config;
        use crate::console::tests::create_channel_shell_writer;
        use std::io::Cursor;
        use warden_common::testutils::gather_rcvd_text_channel_data;

        #[test]
        fn mainproc_start_when_assume_yes() {
            let (output_writer, output_receiver) = create_channel_shell_writer();
            let input_reader = ShellInputReader::new(Some(Box::new(Cursor::new(
                b"bulk delete\nselect-all\nbulk delete\nquit\n".to_vec(),
            ))));
            let app_config = create_app_config(true);
            let user_repo = app_config.user_repo.clone();

            let mut processor = MainProcessor::with_shell_io(
                app_config,
                Arc::new(Mutex::new(input_reader)),
                Arc::new(Mutex::new(output_writer)),
            );

            if let Err(err) = processor.start() {
                panic!("Unexpected result: err={:?}", &err);
            }

            assert!(user_repo.lock().unwrap().get_all().unwrap().is_empty());
            let output = gather_rcvd_text_channel_data(&output_receiver);
            assert!(output.contains("[OK] 3 users deleted successfully\n"));
            assert!(output.contains("Users (0 total)"));
        }

        #[test]
        fn mainproc_start_when_confirmation_declined() {
            let (output_writer, output_receiver) = create_channel_shell_writer();
            let input_reader = ShellInputReader::new(Some(Box::new(Cursor::new(
                b"view roles\ndelete 2\nno\nlist\n".to_vec(),
            ))));
            let mut app_config = create_app_config(false);
            app_config.assume_yes = false;
            let role_repo = app_config.role_repo.clone();

            let mut processor = MainProcessor::with_shell_io(
                app_config,
                Arc::new(Mutex::new(input_reader)),
                Arc::new(Mutex::new(output_writer)),
            );

            if let Err(err) = processor.start() {
                panic!("Unexpected result: err={:?}", &err);
            }

            assert_eq!(role_repo.lock().unwrap().get_all().unwrap().len(), 3);
            let output = gather_rcvd_text_channel_data(&output_receiver);
            assert!(output.contains("Are you sure you want to delete this role? [y/N] "));
            assert!(!output.contains("[OK]"));
        }
    }
}
