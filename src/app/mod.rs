//! Application controller: user input, validation, record creation, log
//! update, rendering, persistence.

use crate::map::{Geolocator, MapView, SetViewOptions};
use crate::storage::config::AppConfig;
use crate::storage::local_store::LocalStore;
use crate::workouts::log::WorkoutLog;
use crate::workouts::types::{validate, Coordinates, Workout, WorkoutForm, WorkoutKind};
use crossbeam::channel::{unbounded, Receiver, Sender};

/// Events the host surfaces feed into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Geolocation resolved the user's position
    PositionResolved(Coordinates),
    /// Geolocation failed or was refused
    PositionDenied,
    /// The user clicked the map
    MapClicked(Coordinates),
    /// The user submitted the workout form
    FormSubmitted(WorkoutForm),
    /// The user clicked a list entry, identified by workout id
    WorkoutSelected(String),
    /// The user asked for a full reset
    ResetRequested,
}

/// Rendering and notification contract of the host surface: the input form,
/// the workout list, and user-visible alerts.
pub trait Surface {
    /// Show a blocking notification.
    fn notify(&mut self, message: &str);

    /// Append one workout to the rendered list.
    fn render_workout(&mut self, workout: &Workout);

    /// Open the input form.
    fn show_form(&mut self);

    /// Clear the form fields and hide it.
    fn hide_form(&mut self);

    /// Remove every rendered list entry.
    fn clear_workouts(&mut self);
}

/// The application controller. Owns the workout log for its lifetime and
/// orchestrates the collaborators around it. Single-threaded: events are
/// handled one at a time, in arrival order.
pub struct App<M, S, U> {
    config: AppConfig,
    map: M,
    store: S,
    surface: U,
    log: WorkoutLog,
    map_ready: bool,
    pending_click: Option<Coordinates>,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl<M: MapView, S: LocalStore, U: Surface> App<M, S, U> {
    /// Create a controller around its collaborators. The log starts empty;
    /// call [`App::start`] to rehydrate it and kick off geolocation.
    pub fn new(config: AppConfig, map: M, store: S, surface: U) -> Self {
        let (event_tx, event_rx) = unbounded();

        Self {
            config,
            map,
            store,
            surface,
            log: WorkoutLog::new(),
            map_ready: false,
            pending_click: None,
            event_tx,
            event_rx,
        }
    }

    /// Sender half of the event intake. The host wires widget callbacks to
    /// this and calls [`App::pump`] from its event loop.
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Drain and handle every queued event, in arrival order.
    pub fn pump(&mut self) {
        let pending: Vec<AppEvent> = self.event_rx.try_iter().collect();
        for event in pending {
            self.handle_event(event);
        }
    }

    /// Rehydrate the log from storage, render the list, then request the
    /// user's position. The list renders regardless of how geolocation
    /// turns out; only marker placement waits on the map.
    pub fn start<G: Geolocator>(&mut self, geolocator: &G) {
        self.rehydrate();

        match geolocator.current_position() {
            Ok(coords) => self.handle_event(AppEvent::PositionResolved(coords)),
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.handle_event(AppEvent::PositionDenied);
            }
        }
    }

    /// Dispatch a single event.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PositionResolved(coords) => self.on_position(coords),
            AppEvent::PositionDenied => self.surface.notify("Could not get your position"),
            AppEvent::MapClicked(coords) => self.on_map_click(coords),
            AppEvent::FormSubmitted(form) => self.on_form_submit(form),
            AppEvent::WorkoutSelected(id) => self.on_workout_selected(&id),
            AppEvent::ResetRequested => self.reset(),
        }
    }

    /// The logged workouts, in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        self.log.all()
    }

    /// Clear persisted storage and restart from an empty state. Explicit,
    /// irreversible, user-initiated.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.remove(&self.config.storage.key) {
            tracing::error!("Failed to clear stored workouts: {}", e);
        }
        self.log.clear();
        self.pending_click = None;
        self.surface.clear_workouts();
        tracing::info!("Workout log reset");
    }

    fn rehydrate(&mut self) {
        let data = match self.store.get(&self.config.storage.key) {
            Ok(Some(data)) => data,
            Ok(None) => return,
            Err(e) => {
                // treated the same as no prior workouts
                tracing::warn!("Failed to read stored workouts: {}", e);
                return;
            }
        };

        self.log = WorkoutLog::from_json(&data);
        tracing::info!("Restored {} workout(s)", self.log.len());

        for workout in self.log.all() {
            self.surface.render_workout(workout);
        }
    }

    fn on_position(&mut self, coords: Coordinates) {
        self.map.create_view(coords, self.config.map.default_zoom);
        self.map_ready = true;

        for workout in self.log.all() {
            let marker = self.map.add_marker(workout.coordinates);
            self.map.bind_popup(marker, &popup_content(workout));
        }

        tracing::info!("Map ready at {:.4}, {:.4}", coords.lat, coords.lng);
    }

    fn on_map_click(&mut self, coords: Coordinates) {
        self.pending_click = Some(coords);
        self.surface.show_form();
    }

    fn on_form_submit(&mut self, form: WorkoutForm) {
        let coords = match self.pending_click {
            Some(coords) => coords,
            None => {
                tracing::debug!("Form submitted without a map click; ignoring");
                return;
            }
        };

        if let Err(e) = validate(&form) {
            self.surface.notify(&e.to_string());
            return;
        }

        let workout = form.build(coords);

        if self.map_ready {
            let marker = self.map.add_marker(workout.coordinates);
            self.map.bind_popup(marker, &popup_content(&workout));
        }
        self.surface.render_workout(&workout);

        self.log.append(workout);
        self.pending_click = None;
        self.surface.hide_form();
        self.persist();
    }

    fn on_workout_selected(&mut self, id: &str) {
        // stale ids are a normal outcome, e.g. an entry rendered before a
        // reset
        let coords = match self.log.find_by_id(id) {
            Some(workout) => workout.coordinates,
            None => return,
        };

        let options = SetViewOptions {
            animate: self.config.map.animate_pan,
            pan_duration_secs: self.config.map.pan_duration_secs,
        };
        self.map
            .set_view(coords, self.config.map.default_zoom, options);
    }

    fn persist(&mut self) {
        let json = match self.log.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize workouts: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.config.storage.key, &json) {
            tracing::error!("Failed to save workouts: {}", e);
            self.surface.notify("Could not save your workouts");
        }
    }
}

/// Popup text for a marker: kind icon plus the record description.
fn popup_content(workout: &Workout) -> String {
    let icon = match workout.kind() {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴",
    };
    format!("{} {}", icon, workout.description)
}
