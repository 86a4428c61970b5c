//! Geographic to planar coordinate transform

use crate::{Error, Result};
use proj4rs::proj::Proj;

/// A batched coordinate transform from geographic to planar space
///
/// Input coordinates are (longitude, latitude) in **radians**. They are replaced
/// in place by (easting, northing) in the linear units of the target system.
pub trait Projection {
    fn project(&self, coords: &mut [(f64, f64)]) -> Result<()>;
}

/// WGS84 lon/lat to a UTM-style transverse Mercator around a fixed meridian
pub struct TransverseMercator {
    source: Proj,
    target: Proj,
}

impl TransverseMercator {
    /// Build the transform for the given central meridian, in degrees
    pub fn new(central_meridian: f64) -> Result<Self> {
        let source = Proj::from_proj_string("+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs")
            .map_err(|e| Error::Projection(format!("source CRS: {e}")))?;
        let target = Proj::from_proj_string(&format!(
            "+proj=tmerc +lat_0=0 +lon_0={central_meridian} +k=0.9996 +x_0=500000 +y_0=0 \
             +ellps=WGS84 +datum=WGS84 +units=m +no_defs"
        ))
        .map_err(|e| Error::Projection(format!("target CRS: {e}")))?;

        Ok(Self { source, target })
    }
}

impl Projection for TransverseMercator {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn project(&self, coords: &mut [(f64, f64)]) -> Result<()> {
        let count = coords.len();
        proj4rs::transform::transform(&self.source, &self.target, coords)
            .map_err(|e| Error::Projection(format!("cannot project {count} points: {e}")))
    }
}
