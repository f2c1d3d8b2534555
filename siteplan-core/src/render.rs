//! Map payloads handed to the rendering collaborator.

use crate::Solution;

/// Base address for single-marker OpenStreetMap links.
const OSM_MARKER_URL: &str = "https://www.openstreetmap.org/";

/// Point the map should centre on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapCentre {
    /// Name of the candidate the map centres on.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Logical payload for one rendering of a solution.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapPayload {
    /// `(latitude, longitude)` pairs in selection order.
    pub coordinates: Vec<(f64, f64)>,
    /// First selected candidate, absent for an empty solution.
    pub centre: Option<MapCentre>,
}

impl MapPayload {
    /// Builds the payload for a solution.
    pub fn from_solution(solution: &Solution) -> Self {
        Self {
            coordinates: solution.coordinates(),
            centre: solution.first().map(|candidate| MapCentre {
                name: candidate.name().to_owned(),
                latitude: candidate.latitude(),
                longitude: candidate.longitude(),
            }),
        }
    }

    /// Coordinates as `lat,lon` pairs joined by `|`.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteplan_core::MapPayload;
    ///
    /// let payload = MapPayload {
    ///     coordinates: vec![(40.7128, -74.006), (34.0522, -118.2437)],
    ///     centre: None,
    /// };
    /// assert_eq!(payload.delimited(), "40.7128,-74.006|34.0522,-118.2437");
    /// ```
    pub fn delimited(&self) -> String {
        self.coordinates
            .iter()
            .map(|(latitude, longitude)| format!("{latitude},{longitude}"))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// OpenStreetMap marker link for the centre, if any.
    pub fn centre_url(&self) -> Option<String> {
        self.centre.as_ref().map(|centre| {
            format!(
                "{OSM_MARKER_URL}?mlat={}&mlon={}",
                centre.latitude, centre.longitude
            )
        })
    }
}

/// Receives the map payload after every re-optimisation.
pub trait Renderer {
    /// Render or forward a payload.
    fn render(&mut self, payload: &MapPayload);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, payload: &MapPayload) {
        (**self).render(payload);
    }
}

/// Renderer that keeps every payload it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingRenderer {
    payloads: Vec<MapPayload>,
}

impl RecordingRenderer {
    /// Payloads in the order they were rendered.
    pub fn payloads(&self) -> &[MapPayload] {
        &self.payloads
    }

    /// Most recent payload.
    pub fn last(&self) -> Option<&MapPayload> {
        self.payloads.last()
    }

    /// Consumes the renderer, returning its payloads.
    pub fn into_payloads(self) -> Vec<MapPayload> {
        self.payloads
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, payload: &MapPayload) {
        self.payloads.push(payload.clone());
    }
}
