//! Ingestion of GPX files, directories and track lists into a `TrackStore`
//!
//! The `Ingestor` owns the store and the running length for the whole ingestion
//! phase. Every error is fatal: the first unreadable or malformed input aborts.

use crate::{Config, Error, Result, TrackStore, distance::segment_length};
use geo::Coord;
use std::fs;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Result of a finished ingestion phase, handed read-only to fitting and rendering
#[derive(Clone, Debug)]
pub struct Ingested {
    /// Every ingested point, in file-then-document order
    pub store: TrackStore,
    /// Sum of all per-file lengths, in meters
    pub total_length: f64,
}

/// Drives the GPX parser over inputs and accumulates points and length
///
/// Progress lines (`Processing <path> [<km> km]`, then `Total: <km> km`) are
/// written to `progress`, usually standard output.
pub struct Ingestor<W: Write> {
    store: TrackStore,
    /// Index of the first point not measured yet
    measured: usize,
    total_length: f64,
    progress: W,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<W: Write> Ingestor<W> {
    /// Create an ingestor with an empty store sized from `config.max_points`
    pub fn new(config: &Config, progress: W) -> Self {
        Self {
            store: TrackStore::new(config.max_points),
            measured: 0,
            total_length: 0.0,
            progress,
        }
    }

    /// Ingest a single GPX file and return its length in meters
    ///
    /// The `Processing <path>` prefix is written and flushed before the file is
    /// opened, so a failing file is the last one named in the progress output.
    /// Parsing follows the `gpx` crate: the root must carry a `version`
    /// attribute and unknown elements are rejected as `Error::Parse`.
    pub fn process(&mut self, path: &Path) -> Result<f64> {
        #[cfg(feature = "profiling")]
        profiling::scope!("ingest::process");

        write!(self.progress, "Processing {}", path.display())?;
        self.progress.flush()?;

        let file = fs::File::open(path).map_err(|source| Error::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        let gpx = gpx::read(BufReader::new(file)).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut coords: Vec<Coord<f64>> = Vec::new();
        for track in &gpx.tracks {
            for segment in &track.segments {
                coords.clear();
                coords.extend(segment.points.iter().map(|waypoint| waypoint.point().0));
                tracing::debug!("{}: segment of {} points", path.display(), coords.len());
                self.store.append_segment(&coords)?;
            }
        }

        let length = self.measure_new_points();
        self.total_length += length;

        writeln!(self.progress, " [{:.2} km]", length / 1000.0)?;
        tracing::debug!(
            "{}: {:.1} m, running total {:.1} m",
            path.display(),
            length,
            self.total_length
        );

        Ok(length)
    }

    /// Ingest every non-hidden regular file of a directory, in listing order
    ///
    /// The listing order comes from the filesystem and is not sorted, so the
    /// point order across files of one directory may differ between systems.
    pub fn process_directory(&mut self, dir: &Path) -> Result<f64> {
        let directory_error = |source| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut length = 0.0;
        for entry in fs::read_dir(dir).map_err(directory_error)? {
            let entry = entry.map_err(directory_error)?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if !path.is_file() {
                tracing::warn!("Skipping {}: not a regular file", path.display());
                continue;
            }
            length += self.process(&path)?;
        }

        Ok(length)
    }

    /// Ingest a list of files and directories, returning the running total in meters
    pub fn process_many<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<f64> {
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                self.process_directory(path)?;
            } else {
                self.process(path)?;
            }
        }

        Ok(self.total_length)
    }

    /// Ingest every path listed in a text file, one per line
    pub fn process_track_list(&mut self, list: &Path) -> Result<f64> {
        let contents = fs::read_to_string(list).map_err(|source| Error::TrackListRead {
            path: list.to_path_buf(),
            source,
        })?;

        let paths: Vec<PathBuf> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect();
        tracing::info!("{} entries in {}", paths.len(), list.display());

        self.process_many(&paths)
    }

    /// Measure the points appended since the previous call and advance the cursor
    fn measure_new_points(&mut self) -> f64 {
        let count = self.store.len();
        let length = if count > self.measured {
            segment_length(&self.store, self.measured, count - 1)
        } else {
            0.0
        };
        self.measured = count;
        length
    }

    /// Points ingested so far
    #[inline]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Running total length in meters
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// The progress sink
    #[inline]
    pub fn progress(&self) -> &W {
        &self.progress
    }

    /// Report the total length and hand over the store
    pub fn finish(mut self) -> Result<Ingested> {
        writeln!(self.progress, "Total: {:.2} km", self.total_length / 1000.0)?;
        self.progress.flush()?;
        tracing::info!(
            "Ingested {} points, {:.1} m",
            self.store.len(),
            self.total_length
        );

        Ok(Ingested {
            store: self.store,
            total_length: self.total_length,
        })
    }
}
