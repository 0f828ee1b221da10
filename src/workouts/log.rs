//! The in-memory workout log and its persisted JSON form.

use crate::workouts::types::Workout;

/// Ordered collection of the session's workouts. Insertion order is display
/// order. Append-only: there is no update or delete.
#[derive(Debug, Default)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
}

impl WorkoutLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout to the end of the log. No deduplication, no capacity
    /// bound.
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// All workouts, in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Number of logged workouts.
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// True if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Look up a workout by id. Linear scan; a miss is a normal outcome (the
    /// caller may hold a stale id), never an error.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Drop every workout.
    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    /// Serialize the whole log, derived fields and kind tags included.
    /// Serializing an unchanged log twice yields identical output.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.workouts)
    }

    /// Rebuild a log from its persisted form. The kind tag selects the
    /// variant, so rehydrated records keep their kind-specific and derived
    /// fields. Malformed input degrades to an empty log, never an error.
    pub fn from_json(data: &str) -> Self {
        match serde_json::from_str::<Vec<Workout>>(data) {
            Ok(workouts) => Self { workouts },
            Err(e) => {
                tracing::warn!("Discarding malformed workout data: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::types::{Coordinates, Metrics, Workout, WorkoutKind};

    fn sample_log() -> WorkoutLog {
        let mut log = WorkoutLog::new();
        log.append(Workout::running(
            Coordinates::new(38.7, -9.1),
            5.0,
            25.0,
            180.0,
        ));
        log.append(Workout::cycling(
            Coordinates::new(38.72, -9.15),
            20.0,
            60.0,
            150.0,
        ));
        log
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let log = sample_log();

        assert_eq!(log.len(), 2);
        assert_eq!(log.all()[0].kind(), WorkoutKind::Running);
        assert_eq!(log.all()[1].kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn test_find_by_id_hit_and_miss() {
        let log = sample_log();
        let id = log.all()[1].id.clone();

        assert_eq!(log.find_by_id(&id).unwrap().kind(), WorkoutKind::Cycling);
        assert!(log.find_by_id("0000000000").is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_records() {
        let log = sample_log();
        let restored = WorkoutLog::from_json(&log.to_json().unwrap());

        assert_eq!(restored.len(), log.len());
        for (original, rehydrated) in log.all().iter().zip(restored.all()) {
            assert_eq!(original, rehydrated);
        }
    }

    #[test]
    fn test_round_trip_restores_variants_with_derived_fields() {
        let log = sample_log();
        let restored = WorkoutLog::from_json(&log.to_json().unwrap());

        match restored.all()[0].metrics {
            Metrics::Running {
                pace_min_per_km, ..
            } => assert_eq!(pace_min_per_km, 5.0),
            _ => panic!("expected running metrics after rehydration"),
        }
        match restored.all()[1].metrics {
            Metrics::Cycling { speed_km_per_h, .. } => assert_eq!(speed_km_per_h, 20.0),
            _ => panic!("expected cycling metrics after rehydration"),
        }
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let log = sample_log();

        assert_eq!(log.to_json().unwrap(), log.to_json().unwrap());
    }

    #[test]
    fn test_empty_log_round_trip() {
        let log = WorkoutLog::new();
        let restored = WorkoutLog::from_json(&log.to_json().unwrap());

        assert!(restored.is_empty());
    }

    #[test]
    fn test_malformed_data_degrades_to_empty() {
        assert!(WorkoutLog::from_json("not json").is_empty());
        assert!(WorkoutLog::from_json("{\"workouts\": 3}").is_empty());
        // a record missing its kind tag cannot be rebuilt
        assert!(WorkoutLog::from_json("[{\"id\":\"1234567890\"}]").is_empty());
    }

    #[test]
    fn test_clear_empties_the_log() {
        let mut log = sample_log();
        log.clear();

        assert!(log.is_empty());
    }
}
