// ABOUTME: Reconciler error type with SNAFU pattern, one variant per failing phase.
// ABOUTME: kind() groups them into validation, runtime and convergence failures.

use snafu::Snafu;

use crate::runtime::{ContainerError, FileError, ImageError, NetworkError};
use crate::translate::TranslateError;
use crate::types::ContainerId;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReconcileError {
    #[snafu(display("container {id} is already recorded; delete it before creating another"))]
    AlreadyCreated { id: ContainerId },

    #[snafu(display("unable to resolve image {image}: {source}"))]
    ImageResolution { image: String, source: ImageError },

    #[snafu(display("invalid container configuration: {source}"))]
    Translate { source: TranslateError },

    #[snafu(display("cannot change {} without replacing the container", fields.join(", ")))]
    ImmutableChange { fields: Vec<&'static str> },

    #[snafu(display("unable to create container {name}: {source}"))]
    Create { name: String, source: ContainerError },

    #[snafu(display("unable to disconnect the default network {network}: {source}"))]
    NetworkDisconnect { network: String, source: NetworkError },

    #[snafu(display("unable to connect to network '{network}': {source}"))]
    NetworkConnect { network: String, source: NetworkError },

    #[snafu(display("error creating tar archive for {file}: {source}"))]
    Archive { file: String, source: std::io::Error },

    #[snafu(display("unable to upload {file}: {source}"))]
    Upload { file: String, source: FileError },

    #[snafu(display("unable to start container {id}: {source}"))]
    Start { id: ContainerId, source: ContainerError },

    #[snafu(display("unable to wait for container {id} to finish: {source}"))]
    Wait { id: ContainerId, source: ContainerError },

    #[snafu(display("error listing containers: {source}"))]
    List { source: ContainerError },

    #[snafu(display("error inspecting container {id}: {source}"))]
    Inspect { id: ContainerId, source: ContainerError },

    #[snafu(display("container {id} finish time could not be parsed: {value}"))]
    FinishedAtParse {
        id: ContainerId,
        value: String,
        source: chrono::ParseError,
    },

    #[snafu(display("container {id} exited after creation, error was: {reason}"))]
    ExitedAfterCreation { id: ContainerId, reason: String },

    #[snafu(display("container {id} failed to reach running state"))]
    NotRunning { id: ContainerId },

    #[snafu(display("error stopping container {id}: {source}"))]
    Stop { id: ContainerId, source: ContainerError },

    #[snafu(display("error deleting container {id}: {source}"))]
    Remove { id: ContainerId, source: ContainerError },

    #[snafu(display("error waiting for container removal '{id}': {source}"))]
    WaitRemoval { id: ContainerId, source: ContainerError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileErrorKind {
    /// Contradictory or disallowed desired state; no runtime call was made.
    Validation,
    /// A runtime call failed.
    Runtime,
    /// The container never reached, or did not stay in, the required state.
    Convergence,
}

impl ReconcileError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReconcileErrorKind {
        match self {
            ReconcileError::AlreadyCreated { .. }
            | ReconcileError::Translate { .. }
            | ReconcileError::ImmutableChange { .. } => ReconcileErrorKind::Validation,
            ReconcileError::ExitedAfterCreation { .. } | ReconcileError::NotRunning { .. } => {
                ReconcileErrorKind::Convergence
            }
            _ => ReconcileErrorKind::Runtime,
        }
    }
}
