//! Typed error surface for translation failures.
use std::io;

use thiserror::Error;

/// All ways a translation run can fail. The translator is all-or-nothing:
/// any of these aborts the run before the output file is touched.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("{file}:{line}: {message} (`{text}`)")]
    Parse {
        file: String,
        line: usize,
        text: String,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{file}:{line}: {message} (`{text}`)")]
    OperandRange {
        file: String,
        line: usize,
        text: String,
        message: String,
    },
}

impl TranslateError {
    pub(crate) fn parse(file: &str, line: usize, text: &str, message: impl Into<String>) -> Self {
        TranslateError::Parse {
            file: file.to_string(),
            line,
            text: text.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn operand_range(
        file: &str,
        line: usize,
        text: &str,
        message: impl Into<String>,
    ) -> Self {
        TranslateError::OperandRange {
            file: file.to_string(),
            line,
            text: text.to_string(),
            message: message.into(),
        }
    }
}
