use super::{MapSlot, MarkerOptions};
use super::leaflet::{self, FlyOptions, IconOptions, Map, MapOptions, Marker, TileOptions, to_js};
use crate::dom;
use crate::error::WebError;
use citytour_core::constants::{
    INVALIDATE_SIZE_DELAY_MS, MAP_HOME, MAP_HOME_ZOOM, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE,
    MARKER_POPUP_ANCHOR, TILE_ATTRIBUTION, TILE_KEEP_BUFFER, TILE_MAX_ZOOM, TILE_URL,
    VIEWPORT_DEBOUNCE_MS,
};
use citytour_core::{
    Bounds, Debounce, FlyTo, Location, LocationId, MarkerStyle, TourSession,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

/// What the map needs from the app: the session it renders and where marker
/// input goes.
#[derive(Clone)]
pub struct MapContext {
    pub session: Rc<RefCell<TourSession>>,
    pub slot: MapSlot,
    pub on_marker_click: Callback<LocationId>,
    /// `(id, entered)` for pointer enter/leave.
    pub on_marker_hover: Callback<(LocationId, bool)>,
}

struct MarkerBinding {
    marker: Marker,
    style: MarkerStyle,
    _listeners: Vec<Closure<dyn FnMut()>>,
}

pub struct MapRuntime {
    generation: u64,
    ctx: MapContext,
    map: Map,
    markers: HashMap<LocationId, MarkerBinding>,
    viewport: Rc<RefCell<Debounce>>,
    on_moveend: Closure<dyn FnMut()>,
}

impl MapRuntime {
    /// Build a map into [`super::MAP_CONTAINER_ID`].
    ///
    /// # Errors
    /// Returns [`WebError::LibraryMissing`] when Leaflet is not loaded, a
    /// missing-target error when the container is absent, or the error raised
    /// by Leaflet itself.
    pub fn mount(ctx: &MapContext, generation: u64) -> Result<Self, WebError> {
        if !leaflet::is_loaded() {
            return Err(WebError::LibraryMissing("Leaflet"));
        }
        if dom::element(super::MAP_CONTAINER_ID).is_none() {
            return Err(WebError::missing_target(super::MAP_CONTAINER_ID));
        }
        let map = leaflet::create_map(
            super::MAP_CONTAINER_ID,
            &to_js(&MapOptions {
                center: [MAP_HOME.lat, MAP_HOME.lng],
                zoom: MAP_HOME_ZOOM,
                zoom_control: false,
            })?,
        )?;
        leaflet::tile_layer(
            TILE_URL,
            &to_js(&TileOptions {
                attribution: TILE_ATTRIBUTION,
                max_zoom: TILE_MAX_ZOOM,
                keep_buffer: TILE_KEEP_BUFFER,
            })?,
        )
        .add_to(&map);

        let viewport = Rc::new(RefCell::new(Debounce::default()));
        let on_moveend = {
            let ctx = ctx.clone();
            let viewport = Rc::clone(&viewport);
            Closure::<dyn FnMut()>::new(move || {
                schedule_reconcile(&ctx, &viewport, generation);
            })
        };
        map.on("moveend", on_moveend.as_ref().unchecked_ref());
        log::debug!("map generation {generation} mounted");

        let mut runtime = Self {
            generation,
            ctx: ctx.clone(),
            map,
            markers: HashMap::new(),
            viewport,
            on_moveend,
        };
        runtime.reconcile();
        schedule_invalidate_size(ctx.slot.clone(), generation);
        Ok(runtime)
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn bounds(&self) -> Bounds {
        let bounds = self.map.get_bounds();
        Bounds {
            south: bounds.south(),
            west: bounds.west(),
            north: bounds.north(),
            east: bounds.east(),
        }
    }

    /// Add markers that entered the viewport and drop those that left it.
    pub fn reconcile(&mut self) {
        let bounds = self.bounds();
        let session = Rc::clone(&self.ctx.session);
        let diff = session.borrow_mut().reconcile_markers(bounds);
        for id in &diff.removed {
            if let Some(binding) = self.markers.remove(id) {
                self.map.remove_layer(&binding.marker);
            }
        }
        let session = session.borrow();
        for id in diff.added {
            let Some(location) = session.content().location(id) else {
                continue;
            };
            let style = session.carousel().marker_style(location);
            match self.create_marker(location, style) {
                Ok(binding) => {
                    self.markers.insert(id, binding);
                }
                Err(err) => log::warn!("marker {id}: {}", dom::js_error_message(&err)),
            }
        }
    }

    fn create_marker(
        &self,
        location: &Location,
        style: MarkerStyle,
    ) -> Result<MarkerBinding, JsValue> {
        let id = location.id;
        let options = MarkerOptions::for_location(location);
        let marker = leaflet::marker(
            &to_js(&[location.coord.lat, location.coord.lng])?,
            &to_js(&options)?,
        );
        marker.set_icon(&leaflet::div_icon(&to_js(&IconOptions {
            class_name: format!("{} {}", style.class_name(), location.category.as_str()),
            icon_size: [MARKER_ICON_SIZE.0, MARKER_ICON_SIZE.1],
            icon_anchor: [MARKER_ICON_ANCHOR.0, MARKER_ICON_ANCHOR.1],
            popup_anchor: [MARKER_POPUP_ANCHOR.0, MARKER_POPUP_ANCHOR.1],
        })?));
        marker.bind_popup(&location.name);

        let mut listeners = Vec::new();
        if options.interactive {
            let click = {
                let cb = self.ctx.on_marker_click.clone();
                Closure::<dyn FnMut()>::new(move || cb.emit(id))
            };
            let over = {
                let cb = self.ctx.on_marker_hover.clone();
                Closure::<dyn FnMut()>::new(move || cb.emit((id, true)))
            };
            let out = {
                let cb = self.ctx.on_marker_hover.clone();
                Closure::<dyn FnMut()>::new(move || cb.emit((id, false)))
            };
            marker.on("click", click.as_ref().unchecked_ref());
            marker.on("mouseover", over.as_ref().unchecked_ref());
            marker.on("mouseout", out.as_ref().unchecked_ref());
            listeners = vec![click, over, out];
        }
        marker.add_to(&self.map);

        Ok(MarkerBinding {
            marker,
            style,
            _listeners: listeners,
        })
    }

    pub fn fly_to(&mut self, target: FlyTo) {
        let options = to_js(&FlyOptions {
            duration: target.duration,
            ease_linearity: target.ease_linearity,
            offset: [target.offset.0, target.offset.1],
        });
        match (to_js(&[target.center.lat, target.center.lng]), options) {
            (Ok(center), Ok(options)) => self.map.fly_to(&center, target.zoom, &options),
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("flyTo: {}", dom::js_error_message(&err));
            }
        }
    }

    pub fn open_popup(&mut self, id: LocationId) {
        if let Some(binding) = self.markers.get(&id) {
            binding.marker.open_popup();
        }
    }

    /// Sync marker classes with the carousel's focus, hover and visited
    /// state. Only markers whose style changed are touched.
    pub fn restyle(&mut self, session: &TourSession) {
        for (id, binding) in &mut self.markers {
            let Some(location) = session.content().location(*id) else {
                continue;
            };
            let style = session.carousel().marker_style(location);
            if style == binding.style {
                continue;
            }
            if let Some(element) = binding.marker.get_element() {
                let classes = element.class_list();
                let _ = classes.toggle_with_force("highlighted", style.highlighted);
                let _ = classes.toggle_with_force("visited", style.visited);
                let _ = classes.toggle_with_force("disabled", style.disabled);
            }
            if binding.style.highlighted && !style.highlighted {
                binding.marker.close_popup();
            }
            binding.style = style;
        }
    }

    /// Remove the map and every listener it holds.
    pub fn dispose(self) {
        self.viewport.borrow_mut().cancel();
        self.map.off("moveend", self.on_moveend.as_ref().unchecked_ref());
        self.map.remove();
        log::debug!(
            "map generation {} disposed with {} markers",
            self.generation,
            self.markers.len()
        );
    }
}

fn live_runtime<R>(
    slot: &MapSlot,
    generation: u64,
    f: impl FnOnce(&mut MapRuntime) -> R,
) -> Option<R> {
    let mut guard = slot.borrow_mut();
    guard
        .as_mut()
        .filter(|runtime| runtime.generation == generation)
        .map(f)
}

fn schedule_reconcile(ctx: &MapContext, viewport: &Rc<RefCell<Debounce>>, generation: u64) {
    let ticket = viewport.borrow_mut().schedule();
    let slot = ctx.slot.clone();
    let viewport = Rc::clone(viewport);
    spawn_local(async move {
        if dom::sleep_ms(VIEWPORT_DEBOUNCE_MS).await.is_err() {
            return;
        }
        if !viewport.borrow().should_fire(ticket) {
            return;
        }
        live_runtime(&slot, generation, MapRuntime::reconcile);
    });
}

fn schedule_invalidate_size(slot: MapSlot, generation: u64) {
    spawn_local(async move {
        if dom::sleep_ms(INVALIDATE_SIZE_DELAY_MS).await.is_err() {
            return;
        }
        live_runtime(&slot, generation, |runtime| runtime.map.invalidate_size());
    });
}
