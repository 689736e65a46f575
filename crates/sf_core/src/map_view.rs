//! Map binding for the search panel.
//!
//! Turns the controller state into what a tile-map widget needs: where to
//! center, at which zoom, and which markers to draw with which icon.

use crate::geo::LatLng;
use crate::listing::{address_line, normalize_website};
use crate::models::{FacilityId, FacilityLocation};
use crate::search::{SearchController, SearchHit};
use serde::Serialize;

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap-bijdragers";

pub const USER_POPUP: &str = "Jouw locatie";
pub const SELECTED_Z_INDEX_OFFSET: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    User,
    Facility,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    pub icon_url: Option<&'static str>,
    pub icon_retina_url: Option<&'static str>,
    pub shadow_url: Option<&'static str>,
    /// CSS class for html icons (pulsing user dot)
    pub class_name: Option<&'static str>,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

impl MarkerKind {
    pub fn icon(self) -> IconSpec {
        match self {
            MarkerKind::Facility => IconSpec {
                icon_url: Some("https://unpkg.com/leaflet@1.9.3/dist/images/marker-icon.png"),
                icon_retina_url: Some(
                    "https://unpkg.com/leaflet@1.9.3/dist/images/marker-icon-2x.png",
                ),
                shadow_url: Some("https://unpkg.com/leaflet@1.9.3/dist/images/marker-shadow.png"),
                class_name: None,
                size: [25, 41],
                anchor: [12, 41],
            },
            MarkerKind::Selected => IconSpec {
                icon_url: Some("https://maps.google.com/mapfiles/ms/icons/orange-dot.png"),
                icon_retina_url: None,
                shadow_url: None,
                class_name: None,
                size: [40, 40],
                anchor: [20, 40],
            },
            MarkerKind::User => IconSpec {
                icon_url: None,
                icon_retina_url: None,
                shadow_url: None,
                class_name: Some("user-location-dot"),
                size: [20, 20],
                anchor: [10, 10],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
    pub animate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPopup {
    pub title: String,
    pub address_line: Option<String>,
    pub distance_label: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub facility_id: Option<FacilityId>,
    pub position: LatLng,
    pub kind: MarkerKind,
    pub z_index_offset: i32,
    pub popup: MarkerPopup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub tile_url: &'static str,
    pub attribution: &'static str,
    pub viewport: Viewport,
    pub markers: Vec<MapMarker>,
}

/// Selected facility at focus zoom, otherwise the origin at origin zoom.
pub fn viewport_for(controller: &SearchController<'_>) -> Viewport {
    let config = controller.config();
    match controller.selected() {
        Some((facility, _)) if facility.has_valid_coordinates() => Viewport {
            center: facility.coordinates(),
            zoom: config.focus_zoom,
            animate: true,
        },
        _ => Viewport { center: controller.origin(), zoom: config.origin_zoom, animate: true },
    }
}

/// User marker first, then one marker per result with usable coordinates.
pub fn markers_for(controller: &SearchController<'_>) -> Vec<MapMarker> {
    let selected = controller.state().selected.as_ref();

    let user = MapMarker {
        facility_id: None,
        position: controller.origin(),
        kind: MarkerKind::User,
        z_index_offset: 0,
        popup: MarkerPopup {
            title: USER_POPUP.to_string(),
            address_line: None,
            distance_label: None,
            website: None,
        },
    };

    std::iter::once(user)
        .chain(
            controller
                .results()
                .filter(|(f, _)| f.has_valid_coordinates())
                .map(|(f, hit)| facility_marker(f, hit, selected == Some(&f.id))),
        )
        .collect()
}

pub fn facility_marker(facility: &FacilityLocation, hit: SearchHit, is_selected: bool) -> MapMarker {
    let (kind, z_index_offset) = if is_selected {
        (MarkerKind::Selected, SELECTED_Z_INDEX_OFFSET)
    } else {
        (MarkerKind::Facility, 0)
    };

    MapMarker {
        facility_id: Some(facility.id.clone()),
        position: facility.coordinates(),
        kind,
        z_index_offset,
        popup: MarkerPopup {
            title: facility.name.clone(),
            address_line: Some(address_line(facility)),
            distance_label: distance_label(hit.distance_km),
            website: normalize_website(facility.website.as_deref()),
        },
    }
}

/// "x km afstand"; nothing for unknown or zero distance.
pub fn distance_label(distance_km: Option<f64>) -> Option<String> {
    distance_km.filter(|d| *d > 0.0).map(|d| format!("{d} km afstand"))
}

pub fn map_view(controller: &SearchController<'_>) -> MapView {
    MapView {
        tile_url: TILE_URL_TEMPLATE,
        attribution: TILE_ATTRIBUTION,
        viewport: viewport_for(controller),
        markers: markers_for(controller),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::embedded_catalog;
    use crate::config::SearchConfig;
    use crate::geo::DEFAULT_ORIGIN;

    #[test]
    fn viewport_follows_origin_then_selection() {
        let catalog = embedded_catalog().unwrap();
        let mut c = SearchController::new(&catalog, SearchConfig::default()).unwrap();

        let v = viewport_for(&c);
        assert_eq!(v.center, DEFAULT_ORIGIN);
        assert_eq!(v.zoom, 12);

        assert!(c.select(&FacilityId::Number(3)));
        let v = viewport_for(&c);
        assert_eq!(v.center, LatLng::new(52.3551, 4.8897));
        assert_eq!(v.zoom, 13);

        c.clear_selection();
        assert_eq!(viewport_for(&c).center, DEFAULT_ORIGIN);
    }

    #[test]
    fn one_user_marker_and_one_per_result() {
        let catalog = embedded_catalog().unwrap();
        let mut c = SearchController::new(&catalog, SearchConfig::default()).unwrap();
        c.set_query("Rotterdam");
        c.search();

        let markers = markers_for(&c);
        assert_eq!(markers.len(), c.total() + 1);
        assert_eq!(markers[0].kind, MarkerKind::User);
        assert_eq!(markers[0].popup.title, USER_POPUP);
        assert!(markers[1..].iter().all(|m| m.kind == MarkerKind::Facility));
    }

    #[test]
    fn selected_marker_is_highlighted_and_raised() {
        let catalog = embedded_catalog().unwrap();
        let mut c = SearchController::new(&catalog, SearchConfig::default()).unwrap();
        c.select(&FacilityId::Number(2));

        let markers = markers_for(&c);
        let selected: Vec<&MapMarker> =
            markers.iter().filter(|m| m.kind == MarkerKind::Selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].facility_id, Some(FacilityId::Number(2)));
        assert_eq!(selected[0].z_index_offset, SELECTED_Z_INDEX_OFFSET);
        assert_eq!(MarkerKind::Selected.icon().size, [40, 40]);
    }

    #[test]
    fn facilities_without_coordinates_get_no_marker() {
        let mut catalog = embedded_catalog().unwrap();
        catalog.facilities[0].lng = f64::NAN;
        let c = SearchController::new(&catalog, SearchConfig::default()).unwrap();
        assert_eq!(markers_for(&c).len(), catalog.len());
    }

    #[test]
    fn distance_label_hides_zero() {
        assert_eq!(distance_label(Some(2.5)).as_deref(), Some("2.5 km afstand"));
        assert_eq!(distance_label(Some(0.0)), None);
        assert_eq!(distance_label(None), None);
    }
}
