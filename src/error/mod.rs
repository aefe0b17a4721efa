// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             IpKeepError (16 bytes)
//!                     |
//!   +------+------+---+---+-------+------+
//!   |      |      |       |       |      |
//!   v      v      v       v       v      v
//! Store   Net    Git     Cfg    Proc     Io
//!  Box    Box    Box     Box    Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Store   ListFailed, WriteFailed, VersionOverflow
//!   Network Reqwest, HttpError, Timeout, InvalidAddress, Exhausted
//!   Git     Gix, CommandFailed, PushFailed
//!   Config  ParseError, MissingKey, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed
//!
//! All variants boxed => IpKeepError is a tagged pointer.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`IpKeepError`].
pub type IpKeepResult<T> = std::result::Result<T, IpKeepError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum IpKeepError {
    /// Record store operation failed.
    #[error("store error: {0}")]
    Store(#[from] Box<StoreError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for IpKeepError {
                fn from(err: $error) -> Self {
                    IpKeepError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    StoreError => Store,
    NetworkError => Network,
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Store Errors ---

/// Record store errors.
///
/// Only failures that make a reconcile impossible end up here. Failing to
/// delete an individual stale record is reported in the outcome instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record directory could not be listed.
    #[error("failed to list records in '{path}': {source}")]
    ListFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be written.
    #[error("failed to write record '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The next version number does not fit in a `u64`.
    #[error("record version {0} cannot be incremented")]
    VersionOverflow(u64),
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Request did not complete within the per-endpoint timeout.
    #[error("connection timeout: {url}")]
    Timeout { url: String },

    /// The response body was not a well-formed IPv4 or IPv6 address.
    #[error("invalid address from {source_name}: '{text}'")]
    InvalidAddress { source_name: String, text: String },

    /// Every resolver round failed and the attempt limit was reached.
    #[error("no endpoint returned an address after {attempts} attempt(s)")]
    Exhausted { attempts: u32 },

    /// Waiting for connectivity was interrupted by user or signal.
    #[error("address resolution interrupted")]
    Interrupted,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Push was rejected or could not reach the remote.
    #[error("failed to push {branch} to {remote}: {message}")]
    PushFailed {
        remote: String,
        branch: String,
        message: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
