use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::Error, model::Coordinates};

pub mod ip;

pub use ip::IpLocator;

/// Result of asking for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Abstract device-location source.
///
/// A mobile host would implement this over its permission prompt and GPS
/// stack; the bundled `IpLocator` approximates it from the public IP.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Ask the user/platform for permission to read the location.
    async fn request_permission(&self) -> Result<PermissionStatus, Error>;

    /// Current position. Only called after permission was granted.
    async fn current_position(&self) -> Result<Coordinates, Error>;
}
