use std::path::PathBuf;

use thiserror::Error;

/// Every way a run can end early. All of them are terminal.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Please provide a valid URL as the first argument ({reason}).")]
    InvalidUrl { reason: String },

    #[error("Please provide a filetype you want to use (CSV or TXT) as the second argument.")]
    InvalidExtension,

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {secs}s waiting for '{selector}'")]
    Timeout { selector: String, secs: u64 },

    #[error("no element matches '{selector}'")]
    MissingElement { selector: String },

    #[error("Board title does not exist. Please check if provided URL is correct.")]
    MissingBoardTitle,

    #[error("vote count '{text}' is not a whole number")]
    ParseVotes { text: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV to {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. } | Self::InvalidExtension)
    }

    /// 2 for bad arguments, 1 for anything that went wrong after validation.
    pub fn exit_code(&self) -> u8 {
        if self.is_validation() {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_exit_with_two() {
        let e = ExportError::InvalidExtension;
        assert!(e.is_validation());
        assert_eq!(e.exit_code(), 2);

        let e = ExportError::InvalidUrl {
            reason: "missing".into(),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn runtime_errors_exit_with_one() {
        let errors = [
            ExportError::MissingBoardTitle,
            ExportError::Timeout { selector: ".message-list".into(), secs: 30 },
            ExportError::ParseVotes { text: "many".into() },
        ];
        for e in errors {
            assert!(!e.is_validation());
            assert_eq!(e.exit_code(), 1);
        }
    }

    #[test]
    fn messages_match_cli_wording() {
        assert_eq!(
            ExportError::MissingBoardTitle.to_string(),
            "Board title does not exist. Please check if provided URL is correct."
        );
        assert_eq!(
            ExportError::InvalidExtension.to_string(),
            "Please provide a filetype you want to use (CSV or TXT) as the second argument."
        );
    }
}
