// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to a plain sentence plus a suggestion of
// what to try next.

use crate::error::ScanlayerError;

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}\n  {}", self.message, self.suggestion)
    }
}

/// Convert a `ScanlayerError` into a `HumanError`.
pub fn humanize_error(err: &ScanlayerError) -> HumanError {
    match err {
        ScanlayerError::InputLoad(detail) => HumanError {
            message: format!("Unable to load the input image ({detail})."),
            suggestion: "Check the path and that the file is a PNG, JPEG, TIFF or similar image."
                .into(),
        },

        ScanlayerError::Recognition(detail) => {
            if detail.contains("model not found") {
                HumanError {
                    message: "The OCR models are not installed.".into(),
                    suggestion: format!(
                        "Download text-detection.rten and text-recognition.rten, \
                         or pass --model-dir. ({detail})"
                    ),
                }
            } else {
                HumanError {
                    message: format!("Text recognition failed ({detail})."),
                    suggestion: "Try a sharper scan, or replay saved results with --observations."
                        .into(),
                }
            }
        }

        ScanlayerError::OutputWrite(detail) => HumanError {
            message: format!("Failed to write the PDF ({detail})."),
            suggestion: "Make sure the destination directory exists and is writable. \
                         No file was created."
                .into(),
        },

        ScanlayerError::Config(detail) => HumanError {
            message: format!("The configuration is invalid ({detail})."),
            suggestion: "Fix the value or remove it to use the default.".into(),
        },

        ScanlayerError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: format!("Check the path and try again. ({io_err})"),
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Permission denied.".into(),
                    suggestion: format!("Check the file permissions. ({io_err})"),
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: format!("Try again. ({io_err})"),
                }
            }
        }

        ScanlayerError::Serialization(json_err) => HumanError {
            message: "A JSON file could not be parsed.".into(),
            suggestion: format!("Check the file contents. ({json_err})"),
        },
    }
}
