//! Workout record types and form validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A latitude/longitude pair. Immutable once attached to a workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Kind of workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// On foot, tracked with step cadence
    Running,
    /// On a bike, tracked with elevation gain
    Cycling,
}

impl WorkoutKind {
    /// Capitalized label used in descriptions and marker popups.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "running"),
            WorkoutKind::Cycling => write!(f, "cycling"),
        }
    }
}

/// Kind-specific metrics. The serde tag doubles as the discriminator in the
/// persisted form, so rehydration rebuilds the right variant with its
/// derived field intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Metrics {
    /// Step cadence plus pace, derived once at creation
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Minutes per kilometer: duration / distance
        pace_min_per_km: f64,
    },
    /// Elevation gain plus speed, derived once at creation
    Cycling {
        /// Meters climbed; zero or negative is accepted
        elevation_gain_m: f64,
        /// Kilometers per hour: distance / hours
        speed_km_per_h: f64,
    },
}

impl Metrics {
    /// The discriminator for this variant.
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Metrics::Running { .. } => WorkoutKind::Running,
            Metrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// One logged exercise session.
///
/// A value object: everything except the interaction counter is fixed at
/// construction. Derived fields (description, pace or speed) are computed
/// once and stored, so they survive the persistence round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Time-derived identifier; unique within a log in practice, not
    /// collision-guaranteed
    pub id: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Where the workout happened
    pub coordinates: Coordinates,
    /// Distance in kilometers (validated positive before construction)
    pub distance_km: f64,
    /// Duration in minutes (validated positive before construction)
    pub duration_min: f64,
    /// Display string, e.g. "Running on April 3"
    pub description: String,
    /// Interaction counter, incremented by [`Workout::record_click`]
    #[serde(default)]
    pub clicks: u32,
    /// Kind discriminator and kind-specific metrics, flattened into the
    /// persisted record
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl Workout {
    /// Create a running workout. Inputs are assumed valid (see [`validate`]);
    /// construction never fails. Pace is computed here, once.
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        Self::with_metrics(
            coordinates,
            distance_km,
            duration_min,
            Metrics::Running {
                cadence_spm,
                pace_min_per_km: duration_min / distance_km,
            },
        )
    }

    /// Create a cycling workout. Inputs are assumed valid (see [`validate`]);
    /// construction never fails. Speed is computed here, once.
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::with_metrics(
            coordinates,
            distance_km,
            duration_min,
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        )
    }

    fn with_metrics(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        metrics: Metrics,
    ) -> Self {
        let created_at = Utc::now();

        Self {
            id: time_derived_id(created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description: describe(metrics.kind(), created_at),
            clicks: 0,
            metrics,
        }
    }

    /// Kind discriminator.
    pub fn kind(&self) -> WorkoutKind {
        self.metrics.kind()
    }

    /// Record one user interaction with this workout.
    pub fn record_click(&mut self) {
        self.clicks += 1;
    }
}

/// Display string for a workout: capitalized kind plus month and day.
/// Month names are always English, regardless of locale.
fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), created_at.format("%B %-d"))
}

/// Last ten digits of the creation time in epoch milliseconds. Two records
/// created in the same millisecond collide; accepted for a single-user
/// local list.
fn time_derived_id(created_at: DateTime<Utc>) -> String {
    format!("{:010}", created_at.timestamp_millis() % 10_000_000_000)
}

/// Raw numeric field values read off the input form. Any of them may be NaN
/// or infinite; validation happens in [`validate`], not in the record
/// constructors. Only the field matching `kind` is read (the form shows one
/// of cadence/elevation at a time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutForm {
    /// Selected workout kind
    pub kind: WorkoutKind,
    /// Distance field, kilometers
    pub distance_km: f64,
    /// Duration field, minutes
    pub duration_min: f64,
    /// Cadence field, steps per minute (running only)
    pub cadence_spm: f64,
    /// Elevation gain field, meters (cycling only)
    pub elevation_gain_m: f64,
}

impl WorkoutForm {
    /// Construct the workout this form describes, at the clicked location.
    /// Call [`validate`] first; construction assumes valid input.
    pub fn build(&self, at: Coordinates) -> Workout {
        match self.kind {
            WorkoutKind::Running => {
                Workout::running(at, self.distance_km, self.duration_min, self.cadence_spm)
            }
            WorkoutKind::Cycling => {
                Workout::cycling(at, self.distance_km, self.duration_min, self.elevation_gain_m)
            }
        }
    }
}

/// Form rejection reasons. The display text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required numeric field is NaN or infinite
    #[error("Inputs have to be numbers")]
    NotFinite,
    /// A required numeric field is zero or negative
    #[error("Inputs have to be positive")]
    NotPositive,
}

/// Check the raw form values for the selected kind.
///
/// Running requires distance, duration and cadence to be finite and
/// positive. Cycling requires distance, duration and elevation gain to be
/// finite, but only distance and duration to be positive: a ride can lose
/// elevation overall. Cadence and elevation gain are deliberately not held
/// to the same rule.
pub fn validate(form: &WorkoutForm) -> Result<(), ValidationError> {
    let all_finite = |values: &[f64]| values.iter().all(|v| v.is_finite());
    let all_positive = |values: &[f64]| values.iter().all(|&v| v > 0.0);

    match form.kind {
        WorkoutKind::Running => {
            let fields = [form.distance_km, form.duration_min, form.cadence_spm];
            if !all_finite(&fields) {
                return Err(ValidationError::NotFinite);
            }
            if !all_positive(&fields) {
                return Err(ValidationError::NotPositive);
            }
        }
        WorkoutKind::Cycling => {
            let fields = [form.distance_km, form.duration_min, form.elevation_gain_m];
            if !all_finite(&fields) {
                return Err(ValidationError::NotFinite);
            }
            if !all_positive(&[form.distance_km, form.duration_min]) {
                return Err(ValidationError::NotPositive);
            }
        }
    }

    Ok(())
}
