//! Run configuration: canvas geometry, store capacity and projection meridian

use crate::{Error, Result};

/// Configuration for a single ingest-fit-render run
///
/// The defaults reproduce the fixed output format: a 12800x12800 canvas with a
/// 20 pixel border, room for one million points, projected around meridian 39°E.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Margin left free on every side of the canvas, in pixels
    pub border: u32,
    /// Maximum number of points the track store accepts
    pub max_points: usize,
    /// Central meridian of the transverse projection, in degrees
    pub central_meridian: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 12800,
            height: 12800,
            border: 20,
            max_points: 1_000_000,
            central_meridian: 39.0,
        }
    }
}

impl Config {
    /// Drawable width once the border is removed on both sides
    #[inline]
    pub fn inner_width(&self) -> f64 {
        f64::from(self.width) - 2.0 * f64::from(self.border)
    }

    /// Drawable height once the border is removed on both sides
    #[inline]
    pub fn inner_height(&self) -> f64 {
        f64::from(self.height) - 2.0 * f64::from(self.border)
    }

    /// Reject configurations that cannot produce a drawable image
    pub fn validate(&self) -> Result<()> {
        if u64::from(self.border) * 2 >= u64::from(self.width)
            || u64::from(self.border) * 2 >= u64::from(self.height)
        {
            return Err(Error::InvalidConfig(format!(
                "border {} leaves no drawable area on a {}x{} canvas",
                self.border, self.width, self.height
            )));
        }
        if self.max_points == 0 {
            return Err(Error::InvalidConfig(
                "point capacity must be positive".to_string(),
            ));
        }
        if !self.central_meridian.is_finite() || self.central_meridian.abs() > 180.0 {
            return Err(Error::InvalidConfig(format!(
                "central meridian {} is outside [-180, 180]",
                self.central_meridian
            )));
        }
        Ok(())
    }
}
