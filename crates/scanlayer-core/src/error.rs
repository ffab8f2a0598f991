// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanlayer.

use thiserror::Error;

/// Top-level error type for all Scanlayer operations.
///
/// Every variant is terminal for a run: nothing is retried and no partial
/// output is written.
#[derive(Debug, Error)]
pub enum ScanlayerError {
    // -- Pipeline stages --
    #[error("failed to load input image: {0}")]
    InputLoad(String),

    #[error("text recognition failed: {0}")]
    Recognition(String),

    #[error("failed to write PDF: {0}")]
    OutputWrite(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanlayerError>;
