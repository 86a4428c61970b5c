mod logging;
mod settings;

use clap::Parser;
use gps_track_lib::{Error, Ingestor, TransverseMercator, fit, render};
use settings::Settings;
use std::process::ExitCode;

/// Exit code for command line errors
const EXIT_USAGE: u8 = 1;

fn main() -> ExitCode {
    let settings = match Settings::try_parse() {
        Ok(settings) => settings,
        Err(e) if !e.use_stderr() => e.exit(), // --help and --version
        Err(e) => {
            eprint!("{e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    logging::setup_logging();
    tracing::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(settings: &Settings) -> gps_track_lib::Result<()> {
    let config = settings.config();
    config.validate()?;

    let mut ingestor = Ingestor::new(&config, std::io::stdout().lock());
    ingestor.process_track_list(&settings.track_list)?;
    let ingested = ingestor.finish()?;

    tracing::info!("Projecting {} points", ingested.store.len());
    let projection = TransverseMercator::new(config.central_meridian)?;
    let fitted = fit(&ingested.store, &projection, &config)?;

    println!("Creating image...");
    render(&ingested.store, &fitted, &config).write_png(&settings.out_image)
}

/// Distinct exit code per failure class
fn exit_code(error: &Error) -> u8 {
    match error {
        Error::InvalidConfig(_) => EXIT_USAGE,
        Error::TrackListRead { .. } => 2,
        Error::DirectoryRead { .. } => 3,
        Error::InputRead { .. } | Error::Parse { .. } | Error::CapacityExceeded { .. } => 4,
        Error::EmptyStore | Error::DegenerateExtent { .. } | Error::Projection(_) => 5,
        Error::OutputWrite { .. } => 6,
        Error::Io(_) => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_only_usage_errors_go_to_stderr() {
        let missing = Settings::try_parse_from(["gps-track-visualizer", "tracks.txt"]).unwrap_err();
        assert!(missing.use_stderr());
        assert!(missing.to_string().contains("OUT_IMAGE"));

        let help = Settings::try_parse_from(["gps-track-visualizer", "--help"]).unwrap_err();
        assert!(!help.use_stderr());
    }

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        let io = || std::io::Error::from(std::io::ErrorKind::NotFound);
        let codes = [
            exit_code(&Error::TrackListRead {
                path: PathBuf::from("list"),
                source: io(),
            }),
            exit_code(&Error::DirectoryRead {
                path: PathBuf::from("dir"),
                source: io(),
            }),
            exit_code(&Error::CapacityExceeded { capacity: 1 }),
            exit_code(&Error::DegenerateExtent {
                width: 0.0,
                height: 1.0,
            }),
            exit_code(&Error::OutputWrite {
                path: PathBuf::from("out.png"),
                source: io().into(),
            }),
        ];
        assert_eq!(codes, [2, 3, 4, 5, 6]);
        assert_eq!(exit_code(&Error::InvalidConfig(String::new())), EXIT_USAGE);
    }
}
