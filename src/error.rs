//! Error types for the UIPlugin operator
//!
//! Provides a structured error type for descriptor synthesis, service
//! discovery and configuration loading, plus the retry advice the reconcile
//! loop uses to classify failures.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for the operator
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid UIPlugin spec: {0}")]
    InvalidSpec(String),

    #[error("Manifest parse error: {0}")]
    ManifestParse(String),

    // =========================================================================
    // Synthesis Errors
    // =========================================================================
    #[error("Plugin configuration encoding failed: {0}")]
    Encoding(#[from] serde_yaml::Error),

    #[error("Failed to build plugin descriptor for {plugin}: {source}")]
    DescriptorBuild {
        plugin: String,
        #[source]
        source: Box<Error>,
    },

    // =========================================================================
    // Kubernetes Errors
    // =========================================================================
    #[error("Cluster query failed: {0}")]
    ClusterQuery(#[from] kube::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error classification callers can branch on without inspecting messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidSpec,
    ManifestParse,
    Encoding,
    DescriptorBuild,
    ClusterQuery,
    Io,
}

/// Action to take on error during reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Requeue with exponential backoff
    RequeueWithBackoff,
    /// Requeue after specific duration
    RequeueAfter(Duration),
    /// Don't requeue, wait for changes
    NoRequeue,
}

impl Error {
    /// Wrap a failure raised while assembling a plugin descriptor
    pub fn descriptor_build(plugin: impl Into<String>, source: Error) -> Self {
        Error::DescriptorBuild {
            plugin: plugin.into(),
            source: Box::new(source),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::InvalidSpec(_) => ErrorKind::InvalidSpec,
            Error::ManifestParse(_) => ErrorKind::ManifestParse,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::DescriptorBuild { .. } => ErrorKind::DescriptorBuild,
            Error::ClusterQuery(_) => ErrorKind::ClusterQuery,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Innermost error, following descriptor build wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::DescriptorBuild { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Determine what action to take for this error
    pub fn action(&self) -> ErrorAction {
        match self {
            // Transient errors - retry with backoff
            Error::ClusterQuery(_) | Error::Io(_) => ErrorAction::RequeueWithBackoff,

            // Encoder faults are not expected to heal on their own
            Error::Encoding(_) => ErrorAction::RequeueAfter(Duration::from_secs(300)),

            Error::DescriptorBuild { source, .. } => source.action(),

            // Spec/configuration errors - wait for the user to change something
            Error::Configuration(_) | Error::InvalidSpec(_) | Error::ManifestParse(_) => {
                ErrorAction::NoRequeue
            }
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        !matches!(self.action(), ErrorAction::NoRequeue)
    }

    /// Check if this error is transient
    pub fn is_transient(&self) -> bool {
        matches!(self.action(), ErrorAction::RequeueWithBackoff)
    }
}

/// Result type alias for the operator
pub type Result<T> = std::result::Result<T, Error>;
