//! Workout records and the in-memory log.

pub mod log;
pub mod types;

pub use log::WorkoutLog;
pub use types::{
    validate, Coordinates, Metrics, ValidationError, Workout, WorkoutForm, WorkoutKind,
};
