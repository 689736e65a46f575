//! Search state for the facility directory.
//!
//! Mirrors one search panel: query text, sport dropdown, origin, ranked
//! results and how many of them are revealed. Every run resets the page.

use super::filter::{rank_facilities, text_needle, SearchHit, SportFilter};
use super::geolocation::{validate_device_position, GeolocationError};
use crate::catalog::FacilityCatalog;
use crate::config::SearchConfig;
use crate::error;
use crate::geo::LatLng;
use crate::listing::FacilityCard;
use crate::models::{FacilityId, FacilityLocation};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub sport: SportFilter,
    pub origin: LatLng,
    pub results: Vec<SearchHit>,
    pub visible_count: usize,
    pub selected: Option<FacilityId>,
}

pub struct SearchController<'a> {
    catalog: &'a FacilityCatalog,
    config: SearchConfig,
    state: SearchState,
}

impl<'a> SearchController<'a> {
    /// Starts at the configured origin with every facility ranked.
    ///
    /// Fails when `config` does not validate.
    pub fn new(catalog: &'a FacilityCatalog, config: SearchConfig) -> error::Result<Self> {
        config.validate()?;
        let state = SearchState {
            query: String::new(),
            sport: SportFilter::All,
            origin: config.default_origin,
            results: Vec::new(),
            visible_count: config.page_size,
            selected: None,
        };
        let mut controller = Self { catalog, config, state };
        controller.search();
        Ok(controller)
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'a FacilityCatalog {
        self.catalog
    }

    pub fn origin(&self) -> LatLng {
        self.state.origin
    }

    pub fn set_query(&mut self, query: &str) {
        self.state.query = query.to_string();
    }

    pub fn set_sport(&mut self, sport: SportFilter) {
        self.state.sport = sport;
    }

    /// Re-rank the catalog with the current query, sport and origin.
    pub fn search(&mut self) -> usize {
        let needle = text_needle(&self.state.query, &self.config.device_location_label);
        self.state.results = rank_facilities(
            self.catalog.as_slice(),
            &self.state.sport,
            needle.as_deref(),
            self.state.origin,
        );
        self.state.visible_count = self.config.page_size;

        if let Some(selected) = &self.state.selected {
            if !self.contains(selected) {
                self.state.selected = None;
            }
        }

        debug!(
            query = %self.state.query,
            sport = self.state.sport.key(),
            results = self.state.results.len(),
            "facility search"
        );
        self.state.results.len()
    }

    /// Reveal one more page.
    pub fn load_more(&mut self) {
        if self.has_more() {
            self.state.visible_count += self.config.page_size;
        }
    }

    /// First page plus `n` more, as `n` calls to `load_more` after a search.
    /// Capped at the last page.
    pub fn reveal_pages(&mut self, n: usize) {
        let page_size = self.config.page_size;
        let remaining = self.total().div_ceil(page_size).saturating_sub(1);
        self.state.visible_count = page_size * (n.min(remaining) + 1);
    }

    pub fn has_more(&self) -> bool {
        self.state.results.len() > self.state.visible_count
    }

    pub fn total(&self) -> usize {
        self.state.results.len()
    }

    /// All ranked results with their facilities.
    pub fn results(&self) -> impl Iterator<Item = (&'a FacilityLocation, SearchHit)> + '_ {
        let facilities: &'a [FacilityLocation] = self.catalog.as_slice();
        self.state.results.iter().map(move |hit| (&facilities[hit.index], *hit))
    }

    /// The revealed page of results.
    pub fn visible(&self) -> impl Iterator<Item = (&'a FacilityLocation, SearchHit)> + '_ {
        self.results().take(self.state.visible_count)
    }

    pub fn visible_cards(&self) -> Vec<FacilityCard> {
        self.visible()
            .map(|(facility, hit)| FacilityCard::new(facility, hit.index, hit.distance_km))
            .collect()
    }

    /// Device location callback.
    ///
    /// On success the origin moves, the query shows the device label and the
    /// search re-runs. On failure nothing changes and the error carries the alert.
    pub fn apply_device_location(
        &mut self,
        position: Result<LatLng, GeolocationError>,
    ) -> Result<usize, GeolocationError> {
        let origin = match position.and_then(validate_device_position) {
            Ok(origin) => origin,
            Err(e) => {
                warn!(error = %e, "device location unavailable, keeping origin");
                return Err(e);
            }
        };

        self.state.origin = origin;
        self.state.query = self.config.device_location_label.clone();
        Ok(self.search())
    }

    /// Select a facility from the current results.
    pub fn select(&mut self, id: &FacilityId) -> bool {
        if self.contains(id) {
            self.state.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.state.selected = None;
    }

    pub fn selected(&self) -> Option<(&'a FacilityLocation, SearchHit)> {
        let id = self.state.selected.as_ref()?;
        self.results().find(|(f, _)| &f.id == id)
    }

    fn contains(&self, id: &FacilityId) -> bool {
        self.results().any(|(f, _)| &f.id == id)
    }
}
