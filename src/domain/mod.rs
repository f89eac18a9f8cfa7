//! Domain layer for the Cinemapa plugin.
//!
//! Core data types independent of Zellij APIs and of the remote services'
//! wire formats.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`location`]: Device position and the map region around it
//! - [`point_of_interest`]: Open-data records placed on the map
//! - [`movie`]: Movie metadata from a title search
//! - [`notice`]: Modal messages raised for every failure

pub mod error;
pub mod location;
pub mod movie;
pub mod notice;
pub mod point_of_interest;

pub use error::{CinemapaError, Result};
pub use location::{DevicePosition, MapRegion};
pub use movie::MovieRecord;
pub use notice::Notice;
pub use point_of_interest::{PointOfInterest, PointOfInterestBatch};
