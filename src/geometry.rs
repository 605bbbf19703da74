//! Bezel and pointer placement for the wind compass.
//!
//! Everything here is a pure function of the layout and a state snapshot. No
//! drawing API is referenced; the results are plain points and a radius that a
//! host canvas can stroke and fill directly.

/// Default inset of the bezel from the bounds, also used as its stroke width.
pub const BEZEL_THICKNESS: f64 = 15.0;
/// Default half width of the pointer's base edge.
pub const POINTER_BASE_HALF_WIDTH: f64 = 10.0;

/// A 2D coordinate in canvas space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The externally settable inputs. `wind_speed` is carried along but does not
/// take part in the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompassState {
    /// Wind direction in radians, unbounded and not normalized.
    pub wind_direction: f64,
    pub wind_speed: f64,
}

/// Sizing inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassLayout {
    pub bounds_width: f64,
    pub bounds_height: f64,
    pub bezel_thickness: f64,
    pub pointer_base_half_width: f64,
}

impl CompassLayout {
    /// Layout for the given bounds with the default bezel and pointer sizes.
    pub const fn new(bounds_width: f64, bounds_height: f64) -> Self {
        Self {
            bounds_width,
            bounds_height,
            bezel_thickness: BEZEL_THICKNESS,
            pointer_base_half_width: POINTER_BASE_HALF_WIDTH,
        }
    }
}

/// Per-frame derived geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassGeometry {
    pub center: Point2D,
    /// Raw bezel radius. May be zero or negative for bounds smaller than the
    /// bezel thickness; see [`CompassGeometry::drawable_radius`].
    pub bezel_radius: f64,
    pub pointer_base_left: Point2D,
    pub pointer_base_right: Point2D,
    pub pointer_tip: Point2D,
}

impl CompassGeometry {
    /// The bezel radius if it can be stroked, `None` when the bezel must be
    /// skipped (non-positive or non-finite radius).
    pub fn drawable_radius(&self) -> Option<f64> {
        (self.bezel_radius.is_finite() && self.bezel_radius > 0.0).then_some(self.bezel_radius)
    }

    /// Closed pointer outline: center, base left, tip, base right, back to center.
    pub fn pointer_path(&self) -> [Point2D; 5] {
        [
            self.center,
            self.pointer_base_left,
            self.pointer_tip,
            self.pointer_base_right,
            self.center,
        ]
    }
}

/// Center of the bounds and the bezel radius sized to the smaller dimension.
pub fn compute_bezel(layout: &CompassLayout) -> (Point2D, f64) {
    let center = Point2D::new(layout.bounds_width / 2.0, layout.bounds_height / 2.0);
    let radius = layout.bounds_width.min(layout.bounds_height) - layout.bezel_thickness;
    (center, radius)
}

/// Base vertices and tip of the pointer, returned as `(base_left, base_right, tip)`.
///
/// The tip reaches out by the center coordinate minus the bezel thickness on
/// each axis, not by the bezel radius.
pub fn compute_pointer(
    center: Point2D,
    direction: f64,
    bezel_thickness: f64,
    base_half_width: f64,
) -> (Point2D, Point2D, Point2D) {
    let (sin, cos) = direction.sin_cos();
    let base_left = Point2D::new(
        center.x - cos * base_half_width,
        center.y - sin * base_half_width,
    );
    let base_right = Point2D::new(
        center.x + cos * base_half_width,
        center.y + sin * base_half_width,
    );
    let tip = Point2D::new(
        center.x + sin * (center.x - bezel_thickness),
        center.y - cos * (center.y - bezel_thickness),
    );
    (base_left, base_right, tip)
}

pub fn compute(layout: &CompassLayout, state: &CompassState) -> CompassGeometry {
    let (center, bezel_radius) = compute_bezel(layout);
    let (pointer_base_left, pointer_base_right, pointer_tip) = compute_pointer(
        center,
        state.wind_direction,
        layout.bezel_thickness,
        layout.pointer_base_half_width,
    );
    CompassGeometry {
        center,
        bezel_radius,
        pointer_base_left,
        pointer_base_right,
        pointer_tip,
    }
}
