pub mod distance;

pub use distance::{distance, slant_distance, EARTH_RADIUS_KM};
