use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::model::EntityKind;

/// Code used for informational responses (ie help text)
pub const CODE_OK: u16 = 200;
/// Code used for requests that could not be understood or were missing data
pub const CODE_BAD_REQUEST: u16 = 400;
/// Code used when a referenced entity does not exist
pub const CODE_NOT_FOUND: u16 = 404;
/// Code used when an entity identifier is already taken
pub const CODE_CONFLICT: u16 = 409;

/// Sanctioned error type used across workspace
#[derive(Debug)]
pub enum AppError {
    /// Error containing a message
    General(String),
    /// Error representing by a code (number)
    GenWithCode(u16),
    /// Error with a code and a message
    GenWithCodeAndMsg(u16, String),
    /// Error containing an [`Error`] object
    GenWithErr(Box<dyn Error + Send + Sync + 'static>),
    /// Error with a message and an [`Error`] object
    GenWithMsgAndErr(String, Box<dyn Error + Send + Sync + 'static>),
    /// IO error
    Io(io::Error),
    /// IO error with a message
    IoWithMsg(String, io::Error),
    /// No entity of the given kind exists for the id
    NotFound(EntityKind, String),
    /// An entity of the given kind already uses the id
    DuplicateId(EntityKind, String),
    /// A required form field was left empty
    RequiredField(String),
}

impl AppError {
    /// Return intrinsic error code (if avail)
    ///
    /// # Returns
    ///
    /// A code for this error. If not appropriate for this error type, returns `None`.
    pub fn get_code(&self) -> Option<u16> {
        match self {
            AppError::GenWithCode(code) => Some(*code),
            AppError::GenWithCodeAndMsg(code, _) => Some(*code),
            AppError::NotFound(_, _) => Some(CODE_NOT_FOUND),
            AppError::DuplicateId(_, _) => Some(CODE_CONFLICT),
            AppError::RequiredField(_) => Some(CODE_BAD_REQUEST),
            _ => None,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AppError::General(ref msg) => msg.fmt(f),
            AppError::GenWithCode(code) => write!(f, "Response: code={}", code),
            AppError::GenWithCodeAndMsg(code, ref msg) => {
                write!(f, "Response: code={}, msg={}", code, msg)
            }
            AppError::GenWithErr(ref err) => err.fmt(f),
            AppError::GenWithMsgAndErr(ref msg, ref err) => {
                write!(f, "Error: msg={}, err={:?}", msg, err)
            }
            AppError::Io(ref err) => err.fmt(f),
            AppError::IoWithMsg(ref msg, ref err) => {
                write!(f, "IO Error: msg={}, err={:?}", msg, err)
            }
            AppError::NotFound(kind, ref id) => write!(f, "Unknown {}: id={}", kind, id),
            AppError::DuplicateId(kind, ref id) => {
                write!(f, "Duplicate {} id: id={}", kind, id)
            }
            AppError::RequiredField(ref field) => write!(f, "Field is required: field={}", field),
        }
    }
}

impl Error for AppError {}

impl From<Box<dyn Error + Send + Sync + 'static>> for AppError {
    fn from(err: Box<dyn Error + Send + Sync + 'static>) -> AppError {
        AppError::GenWithErr(err)
    }
}
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> AppError {
        AppError::Io(err)
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> AppError {
        AppError::GenWithMsgAndErr("JSON processing failed".to_string(), Box::new(err))
    }
}
