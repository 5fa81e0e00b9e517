// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ContainerOps, NetworkOps, ImageOps, LogOps and FileOps.

mod container;
mod file;
mod image;
mod logs;
mod network;
mod shared_types;

pub use container::{
    ContainerError, ContainerFilters, ContainerOps, ContainerSummary, RemoveOptions,
    WaitCondition,
};
pub use file::{FileError, FileOps};
pub use image::{ImageError, ImageOps};
pub use logs::{LogError, LogLine, LogLines, LogOps, LogOptions, LogStream};
pub use network::{NetworkError, NetworkOps};
pub use shared_types::*;

/// Everything the reconciler needs from a runtime.
pub trait RuntimeGateway: ContainerOps + NetworkOps + ImageOps + LogOps + FileOps {}

impl<T> RuntimeGateway for T where T: ContainerOps + NetworkOps + ImageOps + LogOps + FileOps {}
