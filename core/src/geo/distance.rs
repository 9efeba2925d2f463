use crate::{SignalError, SignalResult};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn check_finite(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> SignalResult<()> {
    if [lat1, lon1, lat2, lon2].iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SignalError::Domain(format!(
            "non-finite coordinate in ({}, {}) -> ({}, {})",
            lat1, lon1, lat2, lon2
        )))
    }
}

/// Great-circle (haversine) distance between two points, in kilometers.
///
/// Inputs are degrees and must be finite; no further bounds checking is
/// done. Kilometers are the canonical unit for the base formula. Call
/// sites that need meters multiply by `1000.0` explicitly so the unit is
/// visible at every use.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> SignalResult<f64> {
    check_finite(lat1, lon1, lat2, lon2)?;

    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1r.cos() * lat2r.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    Ok(EARTH_RADIUS_KM * c)
}

/// Slant distance in meters between a measurement point and a transmitter
/// mounted `height_m` meters above the receiver plane.
///
/// Pythagorean combination of the vertical offset with the horizontal
/// great-circle distance.
pub fn slant_distance(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    height_m: f64,
) -> SignalResult<f64> {
    let horizontal_m = distance(lat1, lon1, lat2, lon2)? * 1000.0;
    Ok((height_m.powi(2) + horizontal_m.powi(2)).sqrt())
}
