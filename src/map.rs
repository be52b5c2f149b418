//! Map Geometry Module
//! Marker and viewport-fit bounds for the selected practice.

/// Degrees of padding added around a single marker when fitting the viewport.
pub const FIT_BUFFER_DEG: f64 = 0.05;

/// Geographic bounding box, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl MapBounds {
    /// Viewport-fit box around a single point, padded in both axes so the box
    /// never degenerates to zero width or height.
    pub fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            south: latitude - FIT_BUFFER_DEG,
            west: longitude - FIT_BUFFER_DEG,
            north: latitude + FIT_BUFFER_DEG,
            east: longitude + FIT_BUFFER_DEG,
        }
    }

    /// South-west corner in plot coordinates ([x, y] = [longitude, latitude]).
    pub fn min(&self) -> [f64; 2] {
        [self.west, self.south]
    }

    /// North-east corner in plot coordinates.
    pub fn max(&self) -> [f64; 2] {
        [self.east, self.north]
    }
}

/// A single practice marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}
