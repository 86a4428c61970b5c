//! Path length measurement over the track store

use crate::TrackStore;
use geo::Coord;

/// Local Earth radius used by the equirectangular approximation, in meters
pub const EARTH_RADIUS_M: f64 = 6_367_500.0;

/// Distance in meters between two lon/lat coordinates given in degrees
///
/// Uses the equirectangular approximation, which is only accurate for points a
/// few hundred kilometers apart at most. Antimeridian crossings are not handled.
#[inline]
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lon1 = a.x.to_radians();
    let lat1 = a.y.to_radians();
    let lon2 = b.x.to_radians();
    let lat2 = b.y.to_radians();

    let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    let y = lat2 - lat1;

    (x * x + y * y).sqrt() * EARTH_RADIUS_M
}

/// Length in meters of the path through points `from..=to_inclusive`
///
/// Steps between two boundary points are skipped (see
/// [`TrackPoint::links_to`](crate::TrackPoint::links_to)). Returns 0.0 when the
/// range holds a single point.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn segment_length(store: &TrackStore, from: usize, to_inclusive: usize) -> f64 {
    if to_inclusive <= from {
        return 0.0;
    }

    store
        .slice(from, to_inclusive + 1)
        .windows(2)
        .filter(|pair| pair[0].links_to(&pair[1]))
        .map(|pair| distance(pair[0].coord, pair[1].coord))
        .sum()
}
