use std::process;

use anyhow::Result;

use warden_common::error::AppError;
use warden_common::logging::{error, LogLevel, LOG};
use warden_common::target;
use warden_console::api::{write_shell_prompt, AppConfig, ComponentLifecycle, MainProcessor};

fn process_main() -> Result<(), AppError> {
    let app_config = AppConfig::new()?;

    LOG.lock()
        .map_err(|err| AppError::General(format!("Failed to access logger: err={}", err)))?
        .configure(
            if app_config.verbose_logging {
                LogLevel::DEBUG
            } else {
                LogLevel::ERROR
            },
            Some(|_, _| {
                let _ = write_shell_prompt(false);
            }),
        )?;

    let mut processor = MainProcessor::new(app_config);

    ctrlc::set_handler(move || {
        error(&target!(), "Signal caught, admin console shutting down...");
        process::exit(0);
    })
    .map_err(|err| {
        AppError::GenWithMsgAndErr("Error setting Ctrl-C handler".to_string(), Box::new(err))
    })?;

    processor.start()
}

pub fn main() -> Result<()> {
    match process_main() {
        Ok(()) => {
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{:?}", err);
            process::exit(1);
        }
    }
}
