//! Enter/exit tracking for points of interest

use crate::geo::{haversine_distance, Coordinate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A circular region around a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub coordinate: Coordinate,
    /// Radius in meters; the boundary counts as inside
    pub radius_m: f64,
}

impl PointOfInterest {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        coordinate: Coordinate,
        radius_m: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            coordinate,
            radius_m,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn distance_to(&self, location: Coordinate) -> f64 {
        haversine_distance(self.coordinate, location)
    }

    pub fn contains(&self, location: Coordinate) -> bool {
        self.distance_to(location) <= self.radius_m
    }
}

/// Transition produced by [`GeofenceMonitor::evaluate`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum GeofenceEvent {
    Entered { id: String, title: String, distance_m: f64 },
    Exited { id: String, title: String, distance_m: f64 },
}

impl GeofenceEvent {
    pub fn id(&self) -> &str {
        match self {
            Self::Entered { id, .. } | Self::Exited { id, .. } => id,
        }
    }
}

/// Tracks which points the last reported location was inside
#[derive(Debug, Clone)]
pub struct GeofenceMonitor {
    points: Vec<PointOfInterest>,
    inside: Vec<bool>,
}

impl GeofenceMonitor {
    /// Start monitoring `points`; every point starts as outside
    pub fn new(points: Vec<PointOfInterest>) -> Self {
        let inside = vec![false; points.len()];
        Self { points, inside }
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// Whether the last evaluated location was inside the point with `id`
    pub fn is_inside(&self, id: &str) -> bool {
        self.points
            .iter()
            .zip(&self.inside)
            .any(|(point, inside)| *inside && point.id == id)
    }

    /// Feed a new location and return the transitions it caused, in point order
    pub fn evaluate(&mut self, location: Coordinate) -> Vec<GeofenceEvent> {
        let mut events = Vec::new();

        for (point, was_inside) in self.points.iter().zip(self.inside.iter_mut()) {
            let distance_m = point.distance_to(location);
            let now_inside = distance_m <= point.radius_m;

            match (*was_inside, now_inside) {
                (false, true) => {
                    debug!(id = %point.id, distance_m, "Entered geofence");
                    events.push(GeofenceEvent::Entered {
                        id: point.id.clone(),
                        title: point.title.clone(),
                        distance_m,
                    });
                }
                (true, false) => {
                    debug!(id = %point.id, distance_m, "Exited geofence");
                    events.push(GeofenceEvent::Exited {
                        id: point.id.clone(),
                        title: point.title.clone(),
                        distance_m,
                    });
                }
                _ => {}
            }

            *was_inside = now_inside;
        }

        events
    }
}

/// Built-in points around downtown San Francisco
pub fn default_points_of_interest() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest::new(
            "studio",
            "Refugio Creative Studio",
            Coordinate::new(37.787974, -122.407437),
            120.0,
        )
        .with_description("Collab with local artists"),
        PointOfInterest::new(
            "vinyl",
            "Vinyl Trading Post",
            Coordinate::new(37.791168, -122.40549),
            100.0,
        )
        .with_description("Swap classics & discover gems"),
        PointOfInterest::new(
            "listening",
            "Pop-up Listening Lounge",
            Coordinate::new(37.78935, -122.41096),
            140.0,
        )
        .with_description("Weekly curated sessions"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDIO: Coordinate = Coordinate::new(37.787974, -122.407437);
    const FAR_AWAY: Coordinate = Coordinate::new(40.7128, -74.0060);

    fn studio_only() -> GeofenceMonitor {
        let studio = default_points_of_interest().swap_remove(0);
        GeofenceMonitor::new(vec![studio])
    }

    #[test]
    fn enter_then_exit() {
        let mut monitor = studio_only();

        let events = monitor.evaluate(STUDIO);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GeofenceEvent::Entered { id, .. } if id == "studio"));
        assert!(monitor.is_inside("studio"));

        let events = monitor.evaluate(FAR_AWAY);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GeofenceEvent::Exited { id, .. } if id == "studio"));
        assert!(!monitor.is_inside("studio"));
    }

    #[test]
    fn staying_inside_is_silent() {
        let mut monitor = studio_only();
        assert_eq!(monitor.evaluate(STUDIO).len(), 1);

        // ~50 m north, still within 120 m
        let nearby = Coordinate::new(37.788424, -122.407437);
        assert!(monitor.evaluate(nearby).is_empty());
        assert!(monitor.evaluate(STUDIO).is_empty());
    }

    #[test]
    fn starting_outside_is_silent() {
        let mut monitor = GeofenceMonitor::new(default_points_of_interest());
        assert!(monitor.evaluate(FAR_AWAY).is_empty());
        assert!(!monitor.is_inside("vinyl"));
    }

    #[test]
    fn radius_boundary() {
        let point = PointOfInterest::new("p", "P", Coordinate::new(0.0, 0.0), 1000.0);
        // 0.0089 deg latitude is ~989.6 m, 0.0091 deg is ~1011.9 m
        assert!(point.contains(Coordinate::new(0.0089, 0.0)));
        assert!(!point.contains(Coordinate::new(0.0091, 0.0)));

        let exact = Coordinate::new(0.0, 0.0);
        let zero = PointOfInterest::new("z", "Z", exact, 0.0);
        assert!(zero.contains(exact));
    }

    #[test]
    fn walking_between_points_reports_in_order() {
        let points = default_points_of_interest();
        let vinyl = points[1].coordinate;
        let mut monitor = GeofenceMonitor::new(points);

        monitor.evaluate(STUDIO);
        let events = monitor.evaluate(vinyl);
        let ids: Vec<_> = events
            .iter()
            .map(|e| match e {
                GeofenceEvent::Entered { id, .. } => format!("+{id}"),
                GeofenceEvent::Exited { id, .. } => format!("-{id}"),
            })
            .collect();
        assert_eq!(ids, vec!["-studio", "+vinyl"]);
    }

    #[test]
    fn default_points_do_not_overlap() {
        let points = default_points_of_interest();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(
                    a.distance_to(b.coordinate) > a.radius_m + b.radius_m,
                    "{} overlaps {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn points_deserialize_without_description() {
        let point: PointOfInterest = serde_json::from_str(
            r#"{"id":"x","title":"X","coordinate":{"latitude":1.0,"longitude":2.0},"radius_m":50.0}"#,
        )
        .unwrap();
        assert!(point.description.is_empty());
        assert_eq!(point.coordinate, Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn event_json_shape() {
        let event = GeofenceEvent::Entered {
            id: "studio".into(),
            title: "Studio".into(),
            distance_m: 0.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "entered");
        assert_eq!(json["id"], "studio");
        assert_eq!(event.id(), "studio");
    }
}
