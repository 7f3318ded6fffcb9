//! Error and warning types for tree assembly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::NodeKey;

/// Result alias used across the grove crates.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur while configuring or running a build.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A record cannot take part in a build.
    #[error("Invalid input at record {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration text is not valid TOML for a config.
    #[error("Failed to parse configuration: {source}")]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    /// A forest is too deep to render as nested JSON.
    #[error("Tree is {depth} levels deep; JSON rendering supports at most {limit} (set max_depth to truncate)")]
    TooDeep { depth: u32, limit: u32 },

    /// Serializing a forest failed.
    #[error("Failed to render forest: {source}")]
    Render {
        #[source]
        source: serde_json::Error,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create the error for a record that lacks a usable identifier.
    pub fn missing_id(index: usize, id_key: &str) -> Self {
        Self::InvalidInput {
            index,
            reason: format!("no identifier under \"{id_key}\""),
        }
    }
}

/// Kind of build warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Declared parent is not in the input and is not the root sentinel.
    Orphan,
    /// Record would have been nested under itself.
    CycleBroken,
    /// Identifier seen again after its first record.
    DuplicateId,
}

/// Non-fatal condition absorbed during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildWarning {
    /// Identifier of the record concerned.
    pub key: NodeKey,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl BuildWarning {
    /// Create a new build warning.
    pub fn new(key: NodeKey, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            key,
            message: message.into(),
            kind,
        }
    }

    /// Create an orphan warning.
    pub fn orphan(key: NodeKey, parent: Option<&NodeKey>) -> Self {
        let message = match parent {
            Some(parent) => format!("Orphan: {key} has unknown parent {parent}"),
            None => format!("Orphan: {key} has no parent and is not a root"),
        };
        Self {
            key,
            message,
            kind: WarningKind::Orphan,
        }
    }

    /// Create a cycle warning.
    pub fn cycle_broken(key: NodeKey, parent: &NodeKey) -> Self {
        Self {
            message: format!("Cycle: {key} not nested again under {parent}"),
            key,
            kind: WarningKind::CycleBroken,
        }
    }

    /// Create a duplicate identifier warning.
    pub fn duplicate_id(key: NodeKey, index: usize) -> Self {
        Self {
            message: format!("Duplicate id {key} at record {index}"),
            key,
            kind: WarningKind::DuplicateId,
        }
    }
}
