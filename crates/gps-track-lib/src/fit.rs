//! Fitting the projected point cloud into the canvas
//!
//! All points are projected once, their bounding box is computed and a single
//! uniform scale maps the box into the canvas minus its border, keeping the
//! aspect ratio. The axis that limits the scale fills the drawable area exactly.

use crate::{Config, Error, Projection, Result, TrackStore};
use geo::{Coord, Rect};

/// Canvas position of a track point, with y growing northwards
///
/// Renderers flip the y axis themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

/// Output of [`fit`]: one pixel position per store point, in store order
#[derive(Clone, Debug)]
pub struct FittedTrack {
    /// Pixel coordinates parallel to `TrackStore::points`
    pub pixels: Vec<PixelPoint>,
    /// Pixels per projected unit, identical on both axes
    pub scale: f64,
    /// Bounding box of the projected points
    pub bounds: Rect<f64>,
}

/// Project every point of `store` and map it into pixel space
///
/// Fails with `Error::EmptyStore` when there is nothing to fit and with
/// `Error::DegenerateExtent` when the projected points have zero width or height.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn fit(
    store: &TrackStore,
    projection: &dyn Projection,
    config: &Config,
) -> Result<FittedTrack> {
    if store.is_empty() {
        return Err(Error::EmptyStore);
    }

    // The projection expects radians and returns linear units, no conversion back
    let mut projected: Vec<(f64, f64)> = store
        .points()
        .iter()
        .map(|p| (p.lon().to_radians(), p.lat().to_radians()))
        .collect();
    projection.project(&mut projected)?;

    let bounds = bounding_box(&projected);
    let (width, height) = (bounds.width(), bounds.height());
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(Error::DegenerateExtent { width, height });
    }

    let scale = (config.inner_width() / width).min(config.inner_height() / height);
    tracing::debug!(
        "Projected extent {:.1} x {:.1}, scale {:.6} px/unit",
        width,
        height,
        scale
    );

    let border = f64::from(config.border);
    let min = bounds.min();
    let pixels = projected
        .iter()
        .map(|&(x, y)| PixelPoint {
            x: (border + scale * (x - min.x) + 0.5) as u32,
            y: (border + scale * (y - min.y) + 0.5) as u32,
        })
        .collect();

    Ok(FittedTrack {
        pixels,
        scale,
        bounds,
    })
}

/// Single-pass bounding box of projected coordinates
fn bounding_box(coords: &[(f64, f64)]) -> Rect<f64> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(x, y) in coords {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y })
}
