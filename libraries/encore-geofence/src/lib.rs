//! Encore - Geofence
//!
//! Great-circle distance and a small monitor that turns a stream of location
//! updates into enter/exit events for a fixed set of points of interest.
//!
//! Distances use the haversine formula on a spherical Earth; expect errors of
//! up to ~0.5% compared to an ellipsoidal model.
//!
//! # Example
//!
//! ```rust
//! use encore_geofence::{Coordinate, GeofenceEvent, GeofenceMonitor, PointOfInterest};
//!
//! let studio = PointOfInterest::new("studio", "Studio", Coordinate::new(37.787974, -122.407437), 120.0);
//! let mut monitor = GeofenceMonitor::new(vec![studio]);
//!
//! let events = monitor.evaluate(Coordinate::new(37.787974, -122.407437));
//! assert!(matches!(events[0], GeofenceEvent::Entered { .. }));
//! ```

mod geo;
mod monitor;

pub use geo::{haversine_distance, Coordinate, EARTH_RADIUS_M};
pub use monitor::{default_points_of_interest, GeofenceEvent, GeofenceMonitor, PointOfInterest};
