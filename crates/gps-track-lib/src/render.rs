//! Rasterization of fitted tracks and PNG output
//!
//! The canvas stores palette indices rather than colors, so a 12800x12800 image
//! needs one byte per pixel and is written as an indexed PNG.

use crate::{Config, Error, FittedTrack, Result, TrackStore};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Palette index of the background
pub const BACKGROUND: u8 = 0;
/// Palette index of track lines
pub const TRACK: u8 = 1;
/// Palette index of segment-boundary markers
pub const MARKER: u8 = 2;

/// RGB palette: black background, green tracks, red markers
const PALETTE: [u8; 9] = [0, 0, 0, 0, 255, 0, 255, 0, 0];

/// Boundary marker radius; a radius of 1 gives a dot 3 pixels across
const MARKER_RADIUS: i32 = 1;

/// An indexed-color raster image
pub struct Canvas {
    image: GrayImage,
}

impl Canvas {
    /// Create a canvas filled with the background color
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([BACKGROUND])),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Palette index at (x, y), with the origin at the top-left corner
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[0]
    }

    /// RGB color at (x, y)
    pub fn color(&self, x: u32, y: u32) -> [u8; 3] {
        let i = usize::from(self.pixel(x, y)) * 3;
        [PALETTE[i], PALETTE[i + 1], PALETTE[i + 2]]
    }

    /// Encode the canvas as an 8-bit indexed PNG
    pub fn encode<W: Write>(&self, writer: W) -> std::result::Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width(), self.height());
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(&PALETTE[..]);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.image.as_raw())?;
        writer.finish()
    }

    /// Write the canvas as a PNG file at `path`
    pub fn write_png(&self, path: &Path) -> Result<()> {
        #[cfg(feature = "profiling")]
        profiling::scope!("render::write_png");

        let output_error = |source: png::EncodingError| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(|e| output_error(e.into()))?;
        let mut writer = BufWriter::new(file);
        self.encode(&mut writer).map_err(output_error)?;
        writer.flush().map_err(|e| output_error(e.into()))?;

        tracing::info!(
            "Wrote {}x{} image to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

/// Draw the fitted track onto a new canvas sized from `config`
///
/// Consecutive points are joined by a green line unless both are segment
/// boundaries. Every boundary point then gets a red dot on top. Pixel rows are
/// flipped so that north is up.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn render(store: &TrackStore, fitted: &FittedTrack, config: &Config) -> Canvas {
    debug_assert_eq!(store.len(), fitted.pixels.len());

    let mut canvas = Canvas::new(config.width, config.height);
    let height = config.height;
    let flip = |i: usize| {
        let p = fitted.pixels[i];
        (p.x, height.saturating_sub(p.y))
    };

    let points = store.points();
    for i in 1..points.len() {
        if !points[i - 1].links_to(&points[i]) {
            continue;
        }
        let (x1, y1) = flip(i - 1);
        let (x2, y2) = flip(i);
        draw_line_segment_mut(
            &mut canvas.image,
            (x1 as f32, y1 as f32),
            (x2 as f32, y2 as f32),
            Luma([TRACK]),
        );
    }

    let mut markers = 0usize;
    for (i, point) in points.iter().enumerate() {
        if point.is_segment_boundary {
            let (x, y) = flip(i);
            draw_filled_circle_mut(
                &mut canvas.image,
                (x as i32, y as i32),
                MARKER_RADIUS,
                Luma([MARKER]),
            );
            markers += 1;
        }
    }
    tracing::debug!("Rendered {} points, {} boundary markers", points.len(), markers);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PixelPoint, TrackPoint};
    use geo::{Coord, Rect};

    fn config() -> Config {
        Config {
            width: 100,
            height: 100,
            border: 10,
            ..Config::default()
        }
    }

    /// Store with the given segments and a fitted track using the given pixels
    fn fitted(segments: &[&[(u32, u32)]]) -> (TrackStore, FittedTrack) {
        let mut store = TrackStore::new(1000);
        let mut pixels = Vec::new();
        for segment in segments {
            let coords: Vec<_> = segment
                .iter()
                .map(|&(x, y)| Coord {
                    x: f64::from(x),
                    y: f64::from(y),
                })
                .collect();
            store.append_segment(&coords).unwrap();
            pixels.extend(segment.iter().map(|&(x, y)| PixelPoint { x, y }));
        }
        let fitted = FittedTrack {
            pixels,
            scale: 1.0,
            bounds: Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }),
        };
        (store, fitted)
    }

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = Canvas::new(8, 4);
        assert_eq!(canvas.width(), 8);
        assert_eq!(canvas.height(), 4);
        assert_eq!(canvas.pixel(7, 3), BACKGROUND);
        assert_eq!(canvas.color(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_lines_and_markers() {
        let (store, fitted) = fitted(&[&[(20, 20), (50, 20), (50, 80)]]);
        let canvas = render(&store, &fitted, &config());

        // Horizontal line at pixel y = 20 is drawn on canvas row 100 - 20 = 80
        assert_eq!(canvas.pixel(35, 80), TRACK);
        assert_eq!(canvas.color(35, 80), [0, 255, 0]);
        // Vertical line from row 80 up to row 20
        assert_eq!(canvas.pixel(50, 50), TRACK);
        // Interior point gets no marker
        assert_eq!(canvas.pixel(50, 80), TRACK);
        // Boundary points get red dots, 3 pixels across
        assert_eq!(canvas.pixel(20, 80), MARKER);
        assert_eq!(canvas.pixel(19, 80), MARKER);
        assert_eq!(canvas.pixel(21, 80), MARKER);
        assert_eq!(canvas.color(50, 20), [255, 0, 0]);
        // Untouched background
        assert_eq!(canvas.pixel(80, 50), BACKGROUND);
    }

    #[test]
    fn test_join_between_segments_is_not_drawn() {
        let (store, fitted) = fitted(&[
            &[(20, 20), (30, 20), (40, 20)],
            &[(40, 60), (50, 60), (60, 60)],
        ]);
        let canvas = render(&store, &fitted, &config());

        // The jump from (40, 20) to (40, 60) would cross canvas row 60 at x = 40
        assert_eq!(canvas.pixel(40, 60), BACKGROUND);
        // Both segments themselves are drawn
        assert_eq!(canvas.pixel(25, 80), TRACK);
        assert_eq!(canvas.pixel(55, 40), TRACK);
    }

    #[test]
    fn test_single_point_segment_gets_marker_only() {
        let (store, fitted) = fitted(&[&[(30, 30)], &[(70, 70)]]);
        let canvas = render(&store, &fitted, &config());

        assert_eq!(canvas.pixel(30, 70), MARKER);
        assert_eq!(canvas.pixel(70, 30), MARKER);
        assert_eq!(canvas.pixel(50, 50), BACKGROUND);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let (store, fitted) = fitted(&[&[(20, 20), (50, 20), (50, 80)]]);
        let mut first = Vec::new();
        let mut second = Vec::new();
        render(&store, &fitted, &config()).encode(&mut first).unwrap();
        render(&store, &fitted, &config()).encode(&mut second).unwrap();

        assert_eq!(&first[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_png_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new(4, 4);
        let result = canvas.write_png(&dir.path().join("missing").join("out.png"));
        assert!(matches!(result, Err(Error::OutputWrite { .. })));
    }

    #[test]
    fn test_boundary_flags_drive_markers() {
        let (store, fitted) = fitted(&[&[(20, 50), (40, 50), (60, 50), (80, 50)]]);
        let interior: Vec<&TrackPoint> = store
            .points()
            .iter()
            .filter(|p| !p.is_segment_boundary)
            .collect();
        assert_eq!(interior.len(), 2);

        let canvas = render(&store, &fitted, &config());
        assert_eq!(canvas.pixel(20, 50), MARKER);
        assert_eq!(canvas.pixel(40, 50), TRACK);
        assert_eq!(canvas.pixel(60, 50), TRACK);
        assert_eq!(canvas.pixel(80, 50), MARKER);
    }
}
