// Page wiring and drawing constants used by the web frontend.

// DOM
pub const MAP_ELEMENT_ID: &str = "map";
pub const SECTIONS_ELEMENT_ID: &str = "sections";
pub const SECTION_SELECTOR: &str = "section";
pub const DATA_TRANSITION_MS: &str = "transitionMs"; // data-transition-ms on #map
pub const DATA_EASING: &str = "easing"; // data-easing on #map

// Resources, fetched once at startup
pub const WORLD_URL: &str = "/resources/world-110m.json";
pub const CRASHES_URL: &str = "/resources/crash_data.json";
pub const LAND_OBJECT: &str = "land";
pub const COUNTRIES_OBJECT: &str = "countries";

// Section emphasis
pub const ACTIVE_SECTION_OPACITY: f64 = 1.0;
pub const INACTIVE_SECTION_OPACITY: f64 = 0.1;
pub const EMPHASIS_FADE_MS: u32 = 250;

// Geometry sampling (degrees)
pub const GRATICULE_STEP_DEG: f64 = 10.0;
pub const GRATICULE_MAX_LAT: f64 = 80.0; // parallels stop short of the poles
pub const LINE_SAMPLE_DEG: f64 = 2.0;

// Drawing
pub const POINT_RADIUS: f64 = 10.0;
pub const SPHERE_FILL: &str = "#0b1b2b";
pub const GRATICULE_STROKE: &str = "rgba(255, 255, 255, 0.15)";
pub const LAND_STROKE: &str = "#9fb3c8";
pub const BOUNDARY_STROKE: &str = "rgba(255, 255, 255, 0.45)";
pub const ROUTE_STROKE: &str = "white";
pub const POINT_FILL: &str = "white";
pub const LINE_WIDTH: f64 = 1.0;
pub const ROUTE_LINE_WIDTH: f64 = 2.0;
