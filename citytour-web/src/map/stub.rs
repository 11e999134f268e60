use citytour_core::{FlyTo, LocationId, TourSession};

/// Records what would have been sent to the map library.
#[derive(Debug, Default)]
pub struct MapRuntime {
    generation: u64,
    flights: Vec<FlyTo>,
    popups: Vec<LocationId>,
    restyles: usize,
}

impl MapRuntime {
    #[must_use]
    pub fn detached(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fly_to(&mut self, target: FlyTo) {
        self.flights.push(target);
    }

    pub fn open_popup(&mut self, id: LocationId) {
        self.popups.push(id);
    }

    pub fn restyle(&mut self, session: &TourSession) {
        let _ = session;
        self.restyles += 1;
    }

    #[must_use]
    pub fn flights(&self) -> &[FlyTo] {
        &self.flights
    }

    #[must_use]
    pub fn popups(&self) -> &[LocationId] {
        &self.popups
    }

    #[must_use]
    pub const fn restyles(&self) -> usize {
        self.restyles
    }

    pub fn dispose(self) {
        log::debug!("map generation {} disposed", self.generation);
    }
}
