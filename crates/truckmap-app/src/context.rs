//! Application context and event wiring
//!
//! `AppContext` is constructed once by a front-end and owns every piece of
//! mutable state: the truck store, the map binding, the open draft, the
//! notification slot and the panel state. Front-ends translate user input
//! into [`Event`]s, feed them to [`AppContext::handle`], and render from the
//! read-only accessors.

use std::time::Instant;

use tracing::debug;
use truckmap_domain::model::{Draft, Level, Notification, Notifier, SessionId};
use truckmap_domain::service::{build_detail_view, build_list_view, DetailView, ListView};
use truckmap_store::{Saved, TruckStore};
use truckmap_types::{Coordinate, GeolocationError, StorageError, Truck};
use truckmap_vision::IngestedPhoto;

use crate::config::Config;
use crate::map::{MapBinding, MapWidget, PinRequest};

/// Identity of whoever started an asynchronous request.
///
/// Completions are applied only while their requester is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticket {
    /// Issued for an open add form
    Draft(SessionId),
    /// Issued for a "locate me" on the map itself
    Map(u64),
}

#[derive(Debug, Clone)]
pub enum Event {
    SearchChanged(String),

    OpenForm,
    CancelForm,
    SubmitForm,
    RatingClicked(u8),
    RatingHovered(u8),
    RatingLeft,
    RemoveDraftPhoto(usize),
    PhotoIngested(Ticket, IngestedPhoto),

    PickLocation,
    MapClicked(Coordinate),
    MarkerClicked(String),
    LocationResolved(Ticket, Result<Coordinate, GeolocationError>),

    CardSelected(String),
    ShowOnMap,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    CloseDetail,

    OpenLightbox(usize),
    CloseLightbox,

    Escape,
}

/// The single full-screen photo viewer. Shown and hidden, never rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    visible: bool,
    photo: Option<String>,
}

impl Lightbox {
    fn show(&mut self, photo: String) {
        self.photo = Some(photo);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The photo being shown, only while visible
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref().filter(|_| self.visible)
    }
}

/// Input the add form wants focused after a failed submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Name,
}

pub struct AppContext<W: MapWidget> {
    store: TruckStore,
    map: MapBinding<W>,
    notifier: Notifier,
    focus_zoom: f64,

    search: String,
    draft: Option<Draft>,
    next_session: SessionId,
    map_request: u64,
    focus: Option<FocusField>,

    selected: Option<String>,
    confirming_delete: bool,
    lightbox: Lightbox,

    revision: u64,
    photo_revision: u64,
}

impl<W: MapWidget> AppContext<W> {
    /// Wire a loaded store to a map widget; one marker is created per stored truck
    pub fn new(config: &Config, store: TruckStore, widget: W) -> Self {
        let mut map = MapBinding::new(widget, config.default_center, config.default_zoom);
        map.sync(store.all());

        Self {
            store,
            map,
            notifier: Notifier::new(config.notification_duration()),
            focus_zoom: config.focus_zoom,
            search: String::new(),
            draft: None,
            next_session: SessionId::first(),
            map_request: 0,
            focus: None,
            selected: None,
            confirming_delete: false,
            lightbox: Lightbox::default(),
            revision: 0,
            photo_revision: 0,
        }
    }

    pub fn handle(&mut self, event: Event) {
        match &event {
            Event::PhotoIngested(ticket, _) => debug!(?ticket, "handle photo"),
            other => debug!(event = ?other, "handle event"),
        }
        match event {
            Event::SearchChanged(query) => self.search = query,

            Event::OpenForm => self.open_form(),
            Event::CancelForm => self.close_form(),
            Event::SubmitForm => self.submit(),
            Event::RatingClicked(v) => self.with_draft(|d| d.rating_mut().click(v)),
            Event::RatingHovered(v) => self.with_draft(|d| d.rating_mut().hover(v)),
            Event::RatingLeft => self.with_draft(|d| d.rating_mut().leave()),
            Event::RemoveDraftPhoto(index) => {
                if self.draft.as_mut().and_then(|d| d.remove_photo(index)).is_some() {
                    self.photo_revision += 1;
                }
            }
            Event::PhotoIngested(ticket, photo) => self.apply_photo(ticket, photo),

            Event::PickLocation => self.pick_location(),
            Event::MapClicked(at) => self.map_clicked(at),
            Event::MarkerClicked(id) => self.open_detail(id),
            Event::LocationResolved(ticket, result) => self.apply_location(ticket, result),

            Event::CardSelected(id) => {
                if let Some(at) = self.store.find(&id).map(Truck::coordinate) {
                    self.map.recenter(at, self.focus_zoom);
                    self.open_detail(id);
                }
            }
            Event::ShowOnMap => {
                if let Some(at) = self.selected_truck().map(Truck::coordinate) {
                    self.map.recenter(at, self.focus_zoom);
                    self.close_detail();
                }
            }
            Event::RequestDelete => self.confirming_delete = self.selected.is_some(),
            Event::ConfirmDelete => self.confirm_delete(),
            Event::CancelDelete => self.confirming_delete = false,
            Event::CloseDetail => self.close_detail(),

            Event::OpenLightbox(index) => {
                if let Some(photo) = self.selected_truck().and_then(|t| t.photos.get(index)).cloned() {
                    self.lightbox.show(photo);
                }
            }
            Event::CloseLightbox => self.lightbox.hide(),

            Event::Escape => self.escape(),
        }
    }

    // Form

    fn open_form(&mut self) {
        if self.draft.is_some() {
            return;
        }
        let session = self.next_session;
        self.next_session = session.next();
        self.draft = Some(Draft::new(session));
    }

    fn close_form(&mut self) {
        if let Some(draft) = self.draft.take() {
            self.map.exit_pin_drop();
            self.focus = None;
            if !draft.photos().is_empty() {
                self.photo_revision += 1;
            }
        }
    }

    fn with_draft(&mut self, f: impl FnOnce(&mut Draft)) {
        if let Some(draft) = self.draft.as_mut() {
            f(draft);
        }
    }

    fn submit(&mut self) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        let fields = match draft.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(%errors, "submit rejected");
                if errors.name {
                    self.focus = Some(FocusField::Name);
                }
                return;
            }
        };

        let Saved { value: truck, warning } = self.store.create(fields);
        self.map.add_marker(&truck);
        self.close_form();
        self.map.recenter(truck.coordinate(), self.focus_zoom);
        self.touch();
        self.notify(format!("Added {}", truck.name), Level::Success);
        self.warn_unsaved(warning);
    }

    fn is_live(&self, ticket: Ticket) -> bool {
        match ticket {
            Ticket::Draft(session) => self.draft.as_ref().map(Draft::session) == Some(session),
            Ticket::Map(request) => request == self.map_request,
        }
    }

    fn apply_photo(&mut self, ticket: Ticket, photo: IngestedPhoto) {
        if !self.is_live(ticket) {
            debug!(?ticket, "discarding photo for a closed form");
            return;
        }
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.add_photo(photo.data_url);
        self.photo_revision += 1;
        if let Some(at) = photo.location {
            if draft.location().is_none() {
                draft.set_location(at);
                self.notify("Location set from photo", Level::Info);
            }
        }
    }

    // Map

    fn pick_location(&mut self) {
        let Some(session) = self.draft.as_ref().map(Draft::session) else {
            return;
        };
        if let Some(previous) = self.map.enter_pin_drop(PinRequest(session)) {
            debug!(?previous, "pin-drop request superseded");
        }
    }

    fn map_clicked(&mut self, at: Coordinate) {
        let Some((PinRequest(session), at)) = self.map.handle_click(at) else {
            return;
        };
        let Some(draft) = self.draft.as_mut().filter(|d| d.session() == session) else {
            debug!("pin-drop fired for a closed form");
            return;
        };
        draft.set_location(at);
        self.notify("Location set", Level::Info);
    }

    /// Start a location lookup for the open form, or for the map if no form is open
    pub fn request_location(&mut self) -> Ticket {
        match self.draft.as_ref() {
            Some(draft) => Ticket::Draft(draft.session()),
            None => {
                self.map_request += 1;
                Ticket::Map(self.map_request)
            }
        }
    }

    /// Ticket for a photo batch, if a form is open
    pub fn request_photos(&self) -> Option<Ticket> {
        self.draft.as_ref().map(|d| Ticket::Draft(d.session()))
    }

    fn apply_location(&mut self, ticket: Ticket, result: Result<Coordinate, GeolocationError>) {
        if !self.is_live(ticket) {
            debug!(?ticket, "discarding stale location");
            return;
        }
        match result {
            Ok(at) => {
                // Map lookups only move the map, even if a form opened meanwhile
                if let (Ticket::Draft(_), Some(draft)) = (ticket, self.draft.as_mut()) {
                    draft.set_location(at);
                }
                self.map.recenter(at, self.focus_zoom);
                self.notify("Location found", Level::Info);
            }
            Err(e) => self.notify(e.to_string(), Level::Warning),
        }
    }

    // Detail

    fn open_detail(&mut self, id: String) {
        if self.store.find(&id).is_some() {
            self.selected = Some(id);
            self.confirming_delete = false;
        }
    }

    fn close_detail(&mut self) {
        self.selected = None;
        self.confirming_delete = false;
        self.lightbox.hide();
    }

    fn confirm_delete(&mut self) {
        if !self.confirming_delete {
            return;
        }
        let Some(id) = self.selected.clone() else {
            return;
        };
        let Saved { value: removed, warning } = self.store.delete(&id);
        self.map.remove_marker(&id);
        self.close_detail();
        self.touch();
        if let Some(truck) = removed {
            self.notify(format!("Removed {}", truck.name), Level::Success);
        }
        self.warn_unsaved(warning);
    }

    fn escape(&mut self) {
        if self.lightbox.is_visible() {
            self.lightbox.hide();
        } else if self.confirming_delete {
            self.confirming_delete = false;
        } else if self.selected.is_some() {
            self.close_detail();
        } else if self.map.is_pin_drop_armed() {
            self.map.exit_pin_drop();
        } else {
            self.close_form();
        }
    }

    // Notifications

    fn notify(&mut self, message: impl Into<String>, level: Level) {
        self.notifier.show(message, level, Instant::now());
    }

    fn warn_unsaved(&mut self, warning: Option<StorageError>) {
        if let Some(e) = warning {
            self.notify(
                format!("Could not save ({}). Changes will be lost on restart.", e),
                Level::Warning,
            );
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.photo_revision += 1;
    }

    // Accessors

    pub fn store(&self) -> &TruckStore {
        &self.store
    }

    pub fn map(&self) -> &MapBinding<W> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapBinding<W> {
        &mut self.map
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn list_view(&self) -> ListView<'_> {
        build_list_view(self.store.all(), &self.search)
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Text inputs are edited in place
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.draft.as_mut()
    }

    pub fn take_focus_request(&mut self) -> Option<FocusField> {
        self.focus.take()
    }

    pub fn selected_truck(&self) -> Option<&Truck> {
        self.selected.as_deref().and_then(|id| self.store.find(id))
    }

    pub fn detail_view(&self) -> Option<DetailView<'_>> {
        self.selected_truck().map(build_detail_view)
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn notification(&mut self, now: Instant) -> Option<&Notification> {
        self.notifier.current(now)
    }

    /// Bumped on every collection mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped whenever the set of [`live_photos`](Self::live_photos) may have changed
    pub fn photo_revision(&self) -> u64 {
        self.photo_revision
    }

    /// Photos of stored trucks and of the open draft
    pub fn live_photos(&self) -> impl Iterator<Item = &str> {
        let stored = self.store.all().iter().flat_map(|t| t.photos.iter());
        let drafted = self.draft.iter().flat_map(|d| d.photos().iter());
        stored.chain(drafted).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HeadlessMap;
    use truckmap_store::{MemoryStorage, COLLECTION_KEY};
    use truckmap_types::{NewTruck, Rating};

    fn context_with(storage: MemoryStorage) -> AppContext<HeadlessMap> {
        let store = TruckStore::load(Box::new(storage));
        AppContext::new(&Config::default(), store, HeadlessMap::new())
    }

    fn context() -> AppContext<HeadlessMap> {
        context_with(MemoryStorage::new())
    }

    fn fill_form(app: &mut AppContext<HeadlessMap>, name: &str, at: Option<Coordinate>) {
        app.handle(Event::OpenForm);
        let draft = app.draft_mut().unwrap();
        draft.name = name.to_string();
        if let Some(at) = at {
            draft.set_location(at);
        }
    }

    fn latest_message(app: &mut AppContext<HeadlessMap>) -> Option<String> {
        app.notification(Instant::now()).map(|n| n.message.clone())
    }

    #[test]
    fn test_startup_creates_markers_for_stored_trucks() {
        let storage = MemoryStorage::new();
        {
            let mut store = TruckStore::load(Box::new(storage.clone()));
            store.create(NewTruck::new("A", Coordinate::new(1.0, 1.0)));
            store.create(NewTruck::new("B", Coordinate::new(2.0, 2.0)));
        }
        let app = context_with(storage);
        assert_eq!(app.map().marker_count(), 2);
    }

    #[test]
    fn test_submit_commits_and_closes_form() {
        let mut app = context();
        fill_form(&mut app, "Al's Tacos", Some(Coordinate::new(34.05, -118.24)));
        app.handle(Event::RatingClicked(4));
        app.handle(Event::SubmitForm);

        assert!(app.draft().is_none());
        assert_eq!(app.store().len(), 1);
        let truck = &app.store().all()[0];
        assert_eq!(truck.rating, Rating::new(4));
        assert!(app.map().has_marker(&truck.id));

        let (center, zoom) = app.map().widget().view().unwrap();
        assert!((center.lat - 34.05).abs() < 1e-6);
        assert_eq!(zoom, Config::default().focus_zoom);
        assert_eq!(latest_message(&mut app).as_deref(), Some("Added Al's Tacos"));
        assert_eq!(app.revision(), 1);
    }

    #[test]
    fn test_submit_without_name_keeps_form_open() {
        let mut app = context();
        fill_form(&mut app, "  ", Some(Coordinate::new(34.05, -118.24)));
        app.handle(Event::SubmitForm);

        assert_eq!(app.store().len(), 0);
        assert!(app.draft().unwrap().errors().name);
        assert_eq!(app.take_focus_request(), Some(FocusField::Name));
        assert_eq!(app.map().marker_count(), 0);
    }

    #[test]
    fn test_submit_without_location_creates_nothing() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        app.handle(Event::SubmitForm);

        assert_eq!(app.store().len(), 0);
        let errors = app.draft().unwrap().errors();
        assert!(errors.location && !errors.name);
        assert_eq!(app.take_focus_request(), None);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        app.handle(Event::RatingClicked(3));
        app.handle(Event::CancelForm);
        assert!(app.draft().is_none());

        app.handle(Event::OpenForm);
        let draft = app.draft().unwrap();
        assert_eq!(draft.name, "");
        assert!(draft.rating().pending().is_unrated());
    }

    #[test]
    fn test_pin_drop_fills_location() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        app.handle(Event::PickLocation);
        assert!(app.map().widget().pin_cursor());

        app.handle(Event::MapClicked(Coordinate::new(34.1, -118.3)));
        let location = app.draft().unwrap().location().unwrap();
        assert!((location.lat - 34.1).abs() < 1e-6);
        assert!(!app.map().is_pin_drop_armed());
    }

    #[test]
    fn test_map_click_without_pin_drop_does_nothing() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        app.handle(Event::MapClicked(Coordinate::new(34.1, -118.3)));
        assert!(app.draft().unwrap().location().is_none());
    }

    #[test]
    fn test_cancel_form_disarms_pin_drop() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        app.handle(Event::PickLocation);
        app.handle(Event::CancelForm);
        assert!(!app.map().is_pin_drop_armed());
    }

    #[test]
    fn test_stale_location_is_discarded() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        let ticket = app.request_location();
        app.handle(Event::CancelForm);
        app.handle(Event::OpenForm);

        app.handle(Event::LocationResolved(ticket, Ok(Coordinate::new(5.0, 5.0))));
        assert!(app.draft().unwrap().location().is_none());
    }

    #[test]
    fn test_live_location_fills_form_and_recenters() {
        let mut app = context();
        fill_form(&mut app, "Tacos", None);
        let ticket = app.request_location();
        app.handle(Event::LocationResolved(ticket, Ok(Coordinate::new(5.0, 6.0))));

        assert_eq!(app.draft().unwrap().location(), Some(Coordinate::new(5.0, 6.0)));
        assert_eq!(app.map().widget().view().unwrap().0, Coordinate::new(5.0, 6.0));
    }

    #[test]
    fn test_location_failure_notifies() {
        let mut app = context();
        let ticket = app.request_location();
        app.handle(Event::LocationResolved(ticket, Err(GeolocationError::Unsupported)));
        assert_eq!(
            latest_message(&mut app),
            Some(GeolocationError::Unsupported.to_string())
        );
    }

    #[test]
    fn test_superseded_map_lookup_is_discarded() {
        let mut app = context();
        let first = app.request_location();
        let second = app.request_location();
        app.handle(Event::LocationResolved(first, Ok(Coordinate::new(1.0, 1.0))));
        assert_ne!(app.map().widget().view().unwrap().0, Coordinate::new(1.0, 1.0));
        app.handle(Event::LocationResolved(second, Ok(Coordinate::new(2.0, 2.0))));
        assert_eq!(app.map().widget().view().unwrap().0, Coordinate::new(2.0, 2.0));
    }

    #[test]
    fn test_map_lookup_never_fills_a_later_form() {
        let mut app = context();
        let ticket = app.request_location();
        app.handle(Event::OpenForm);
        app.handle(Event::LocationResolved(ticket, Ok(Coordinate::new(5.0, 6.0))));

        assert!(app.draft().unwrap().location().is_none());
        assert_eq!(app.map().widget().view().unwrap().0, Coordinate::new(5.0, 6.0));
    }

    #[test]
    fn test_photo_for_closed_form_is_discarded() {
        let mut app = context();
        app.handle(Event::OpenForm);
        let ticket = app.request_photos().unwrap();
        app.handle(Event::CancelForm);
        app.handle(Event::OpenForm);

        let photo = IngestedPhoto {
            data_url: "data:image/jpeg;base64,AA".to_string(),
            width: 1,
            height: 1,
            location: None,
        };
        app.handle(Event::PhotoIngested(ticket, photo.clone()));
        assert!(app.draft().unwrap().photos().is_empty());

        let live = app.request_photos().unwrap();
        app.handle(Event::PhotoIngested(live, photo));
        assert_eq!(app.draft().unwrap().photos().len(), 1);
    }

    #[test]
    fn test_photo_location_prefills_empty_location() {
        let mut app = context();
        app.handle(Event::OpenForm);
        let ticket = app.request_photos().unwrap();
        app.handle(Event::PhotoIngested(
            ticket,
            IngestedPhoto {
                data_url: "data:x".to_string(),
                width: 1,
                height: 1,
                location: Some(Coordinate::new(12.5, 45.25)),
            },
        ));
        assert_eq!(app.draft().unwrap().location(), Some(Coordinate::new(12.5, 45.25)));
    }

    #[test]
    fn test_dropped_draft_photos_leave_live_set() {
        let mut app = context();
        app.handle(Event::OpenForm);
        let ticket = app.request_photos().unwrap();
        for n in 0..2 {
            app.handle(Event::PhotoIngested(
                ticket,
                IngestedPhoto {
                    data_url: format!("data:photo{}", n),
                    width: 1,
                    height: 1,
                    location: None,
                },
            ));
        }
        assert_eq!(app.live_photos().count(), 2);

        let before = app.photo_revision();
        app.handle(Event::RemoveDraftPhoto(0));
        assert!(app.photo_revision() > before);
        assert_eq!(app.live_photos().collect::<Vec<_>>(), vec!["data:photo1"]);

        let before = app.photo_revision();
        app.handle(Event::RemoveDraftPhoto(7));
        assert_eq!(app.photo_revision(), before);

        app.handle(Event::CancelForm);
        assert!(app.photo_revision() > before);
        assert_eq!(app.live_photos().count(), 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = context();
        fill_form(&mut app, "Tacos", Some(Coordinate::new(34.05, -118.24)));
        app.handle(Event::SubmitForm);
        let id = app.store().all()[0].id.clone();

        app.handle(Event::MarkerClicked(id.clone()));
        assert!(app.detail_view().is_some());

        app.handle(Event::ConfirmDelete);
        assert_eq!(app.store().len(), 1);

        app.handle(Event::RequestDelete);
        app.handle(Event::CancelDelete);
        app.handle(Event::ConfirmDelete);
        assert_eq!(app.store().len(), 1);

        app.handle(Event::RequestDelete);
        app.handle(Event::ConfirmDelete);
        assert_eq!(app.store().len(), 0);
        assert!(!app.map().has_marker(&id));
        assert!(app.selected_truck().is_none());
        assert_eq!(latest_message(&mut app).as_deref(), Some("Removed Tacos"));
    }

    #[test]
    fn test_card_selection_recenters_and_opens_detail() {
        let mut app = context();
        fill_form(&mut app, "Tacos", Some(Coordinate::new(10.0, 20.0)));
        app.handle(Event::SubmitForm);
        app.map_mut().recenter(Coordinate::new(0.5, 0.5), 3.0);
        let id = app.store().all()[0].id.clone();

        app.handle(Event::CardSelected(id.clone()));
        assert_eq!(app.selected_truck().map(|t| t.id.clone()), Some(id));
        assert_eq!(app.map().widget().view().unwrap().0, Coordinate::new(10.0, 20.0));

        app.handle(Event::ShowOnMap);
        assert!(app.selected_truck().is_none());
    }

    #[test]
    fn test_lightbox_reused_and_escape_order() {
        let mut app = context();
        fill_form(&mut app, "Tacos", Some(Coordinate::new(10.0, 20.0)));
        let ticket = app.request_photos().unwrap();
        for n in 0..2 {
            app.handle(Event::PhotoIngested(
                ticket,
                IngestedPhoto {
                    data_url: format!("data:photo{}", n),
                    width: 1,
                    height: 1,
                    location: None,
                },
            ));
        }
        app.handle(Event::SubmitForm);
        let id = app.store().all()[0].id.clone();
        app.handle(Event::MarkerClicked(id));

        app.handle(Event::OpenLightbox(1));
        assert_eq!(app.lightbox().photo(), Some("data:photo1"));
        app.handle(Event::OpenLightbox(0));
        assert_eq!(app.lightbox().photo(), Some("data:photo0"));
        app.handle(Event::OpenLightbox(9));
        assert_eq!(app.lightbox().photo(), Some("data:photo0"));

        app.handle(Event::Escape);
        assert!(!app.lightbox().is_visible());
        assert!(app.selected_truck().is_some());
        app.handle(Event::Escape);
        assert!(app.selected_truck().is_none());
    }

    #[test]
    fn test_quota_warning_keeps_truck() {
        let storage = MemoryStorage::new();
        storage.set_quota(Some(16));
        let mut app = context_with(storage.clone());
        fill_form(&mut app, "Tacos", Some(Coordinate::new(10.0, 20.0)));
        app.handle(Event::SubmitForm);

        assert_eq!(app.store().len(), 1);
        assert!(storage.raw(COLLECTION_KEY).is_none());
        let notification = app.notification(Instant::now()).unwrap();
        assert_eq!(notification.level, Level::Warning);
        assert!(notification.message.contains("quota"));
    }

    #[test]
    fn test_search_filters_list() {
        let mut app = context();
        for name in ["Tacos", "Pizza"] {
            fill_form(&mut app, name, Some(Coordinate::new(10.0, 20.0)));
            app.handle(Event::SubmitForm);
        }
        app.handle(Event::SearchChanged("PIZ".to_string()));
        let view = app.list_view();
        assert_eq!(view.count_label, "1 truck");
        assert_eq!(view.cards[0].name, "Pizza");
    }
}
