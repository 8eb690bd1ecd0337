use std::time::Duration;

// Shared projection/scroll tuning used by the core and the web frontend.

// Every section change animates rotation, translation and scale over this span.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(3000);

// Fraction of the viewport height added to the scroll offset to find the
// "centred" point that decides which section is active.
pub const CURSOR_VIEWPORT_FRACTION: f64 = 0.5;

// Default per-section options: (relative position, centre lon/lat, scale)
pub const DEFAULT_SECTION_POSITION: [f64; 2] = [0.75, 0.5];
pub const DEFAULT_SECTION_CENTRES: [[f64; 2]; 3] = [[0.0, 0.0], [46.0, 46.0], [-42.0, 120.0]];
pub const DEFAULT_SECTION_SCALES: [f64; 3] = [600.0, 1200.0, 900.0];

// Coordinate validity
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MAX_LATITUDE: f64 = 90.0;

// Below this angular separation (radians) great-circle interpolation degrades
// to a component-wise lerp.
pub const GREAT_CIRCLE_EPSILON: f64 = 1e-9;
