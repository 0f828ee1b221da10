//! TrailLog - Map-based workout logging.
//!
//! A single-user activity logger: pick a spot on a map, fill in a short
//! form, and the app records a running or cycling workout with its derived
//! metrics, shows it as a map marker and a list entry, and persists the
//! whole log across sessions. The map widget, geolocation service, and
//! form/list surface are host-provided collaborators behind traits; this
//! crate owns the records, the log, the persistence round trip, and the
//! controller that ties them together.

pub mod app;
pub mod map;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use app::{App, AppEvent, Surface};
pub use map::{Geolocator, MapView};
pub use storage::config::AppConfig;
pub use storage::local_store::{FileStore, LocalStore, MemoryStore};
pub use workouts::log::WorkoutLog;
pub use workouts::types::{Coordinates, Metrics, Workout, WorkoutForm, WorkoutKind};
