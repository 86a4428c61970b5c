use clap::Parser;
use gps_track_lib::Config;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GPS Track Visualizer - Render a list of GPX tracks into a single PNG image
pub struct Settings {
    /// Text file listing GPX files or directories of GPX files, one per line
    #[clap(value_name = "TRACK_LIST")]
    pub track_list: PathBuf,

    /// Output PNG image
    #[clap(value_name = "OUT_IMAGE")]
    pub out_image: PathBuf,

    /// Image width in pixels
    #[clap(long, default_value = "12800")]
    pub width: u32,

    /// Image height in pixels
    #[clap(long, default_value = "12800")]
    pub height: u32,

    /// Empty margin around the tracks in pixels
    #[clap(long, default_value = "20")]
    pub border: u32,

    /// Maximum number of track points across all files
    #[clap(long, default_value = "1000000")]
    pub max_points: usize,

    /// Central meridian of the transverse Mercator projection in degrees
    #[clap(long, default_value = "39.0", allow_negative_numbers = true)]
    pub central_meridian: f64,
}

impl Settings {
    /// Library configuration for this run
    pub fn config(&self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            border: self.border,
            max_points: self.max_points,
            central_meridian: self.central_meridian,
        }
    }
}
