//! Map and geolocation collaborator contracts.
//!
//! The crate never draws tiles or markers itself. The host hands the
//! controller an implementation of [`MapView`] wrapping whatever widget it
//! embeds, and an implementation of [`Geolocator`] over the platform
//! position service. Click events from the widget reach the controller
//! through its event channel rather than a callback registration.

use crate::workouts::types::Coordinates;
use thiserror::Error;

/// Handle to a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Options for recentering the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetViewOptions {
    /// Animate the transition
    pub animate: bool,
    /// Pan animation length in seconds
    pub pan_duration_secs: f64,
}

impl Default for SetViewOptions {
    fn default() -> Self {
        Self {
            animate: true,
            pan_duration_secs: 1.0,
        }
    }
}

/// Consumed contract of the mapping widget.
pub trait MapView {
    /// Initialize the view centered on `center`.
    fn create_view(&mut self, center: Coordinates, zoom: u8);

    /// Place a marker and return its handle.
    fn add_marker(&mut self, at: Coordinates) -> MarkerId;

    /// Attach popup content to a placed marker.
    fn bind_popup(&mut self, marker: MarkerId, content: &str);

    /// Recenter the view.
    fn set_view(&mut self, center: Coordinates, zoom: u8, options: SetViewOptions);
}

/// Geolocation failures. Terminal for map features, not for the app.
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// The user refused the position request
    #[error("Position permission denied")]
    PermissionDenied,

    /// The platform could not produce a position
    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Consumed contract of the geolocation service.
pub trait Geolocator {
    /// Resolve the user's current position. Blocks until the platform
    /// answers or refuses.
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}
