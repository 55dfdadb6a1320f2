// Centralized ingestion limits for documents handed to the store

// Document size caps
pub const MAX_WAYPOINTS: usize = 200_000;
pub const MAX_LINES: usize = 600_000;

// Numeric bounds (map plane, block units)
pub const COORD_MIN: f64 = -30_000_000.0;
pub const COORD_MAX: f64 =  30_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
