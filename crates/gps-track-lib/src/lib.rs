//! GPS Track Library - Track accumulation, measurement and raster rendering
//!
//! This library ingests GPX files into a single ordered point store, measures the
//! distance traveled, fits the whole point cloud into a fixed-size canvas and draws it.
//!
//! # Architecture
//!
//! - **[`TrackStore`]**: Append-only point storage with segment-boundary flags
//! - **[`segment_length`]**: Equirectangular length of a range of the store
//! - **[`Ingestor`]**: Drives GPX parsing over files, directories and track lists
//! - **[`fit`]**: Projects every point and scales it into pixel space
//! - **[`render`]**: Draws polylines and boundary markers into a PNG-encodable [`Canvas`]
//!
//! # Pipeline
//!
//! ```ignore
//! let mut ingestor = Ingestor::new(&config, std::io::stdout());
//! ingestor.process_track_list(Path::new("tracks.txt"))?;
//! let ingested = ingestor.finish()?;
//! let projection = TransverseMercator::new(config.central_meridian)?;
//! let fitted = fit(&ingested.store, &projection, &config)?;
//! render(&ingested.store, &fitted, &config).write_png(Path::new("out.png"))?;
//! ```

mod config;
mod distance;
mod fit;
mod ingest;
mod projection;
mod render;
mod store;

// Public API exports
pub use config::Config;
pub use distance::{EARTH_RADIUS_M, distance, segment_length};
pub use fit::{FittedTrack, PixelPoint, fit};
pub use ingest::{Ingested, Ingestor};
pub use projection::{Projection, TransverseMercator};
pub use render::{Canvas, render};
pub use store::{TrackPoint, TrackStore};

use std::path::PathBuf;

/// Error types for the whole pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read track list {path}: {source}")]
    TrackListRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read track {path}: {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse track {path}: {source}")]
    Parse {
        path: PathBuf,
        source: gpx::errors::GpxError,
    },

    #[error("track store capacity of {capacity} points exceeded")]
    CapacityExceeded { capacity: usize },

    #[error("no track points to fit")]
    EmptyStore,

    #[error("degenerate extent: projected bounding box is {width} x {height}")]
    DegenerateExtent { width: f64, height: f64 },

    #[error("projection error: {0}")]
    Projection(String),

    #[error("cannot write image {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: png::EncodingError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
