//! Command-line interface components.

use crate::config::SegmentConfig;
use crate::processor::progress_display;
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::MultiProgress;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "imma-segmenter")]
#[command(about = "Convert fixed-width IMMA ship logs into binary coordinate segments")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory of IMMA log files, named so that sorting orders them by date
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory for coords<N>.bin segment files and segs.idx
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Observations per segment file
    #[arg(long, value_name = "N")]
    pub segment_len: Option<usize>,

    /// JSON configuration file (command-line flags take precedence)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep only ship platform types (1-5)
    #[arg(long)]
    pub ship_only: bool,

    /// Minimum lat/lng precision indicator to keep
    #[arg(long, value_name = "LI")]
    pub min_precision: Option<i32>,

    /// Keep positions lying on the 10 degree grid
    #[arg(long)]
    pub keep_grid_aligned: bool,

    /// Write the trailing partial segment instead of discarding it
    #[arg(long)]
    pub flush_final: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level selected by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the run configuration: defaults, then config file, then flags
    pub fn build_config(&self) -> Result<SegmentConfig> {
        let mut config = match &self.config {
            Some(path) => SegmentConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => SegmentConfig::default(),
        };

        if let Some(segment_len) = self.segment_len {
            config.segment_len = segment_len;
        }
        if self.ship_only {
            config.filter.ship_only = true;
        }
        if let Some(min_precision) = self.min_precision {
            config.filter.min_precision_indicator = Some(min_precision);
        }
        if self.keep_grid_aligned {
            config.filter.reject_grid_aligned = false;
        }
        if self.flush_final {
            config.flush_final_segment = true;
        }
        if self.no_progress || self.quiet {
            config.show_progress = false;
        }

        config.validate().context("Invalid configuration")?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}

/// Log sink that clears the progress display while a line is written
pub struct ProgressAwareWriter<W> {
    progress: MultiProgress,
    inner: W,
}

impl<W: Write> ProgressAwareWriter<W> {
    pub fn new(progress: MultiProgress, inner: W) -> Self {
        Self { progress, inner }
    }
}

impl<W: Write> Write for ProgressAwareWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn stderr_writer() -> ProgressAwareWriter<io::Stderr> {
    ProgressAwareWriter::new(progress_display().clone(), io::stderr())
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("imma_segmenter={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(stderr_writer)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(stderr_writer),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::{ProgressBar, ProgressDrawTarget};
    use tempfile::TempDir;

    #[test]
    fn test_positional_arguments_required() {
        assert!(Args::try_parse_from(["imma-segmenter"]).is_err());
        assert!(Args::try_parse_from(["imma-segmenter", "in"]).is_err());

        let args = Args::try_parse_from(["imma-segmenter", "in", "out"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("in"));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_default_config_from_args() {
        let args = Args::try_parse_from(["imma-segmenter", "in", "out"]).unwrap();
        assert_eq!(args.build_config().unwrap(), SegmentConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "imma-segmenter",
            "in",
            "out",
            "--segment-len",
            "250",
            "--ship-only",
            "--min-precision",
            "1",
            "--keep-grid-aligned",
            "--flush-final",
            "-q",
        ])
        .unwrap();

        let config = args.build_config().unwrap();
        assert_eq!(config.segment_len, 250);
        assert!(config.filter.ship_only);
        assert_eq!(config.filter.min_precision_indicator, Some(1));
        assert!(!config.filter.reject_grid_aligned);
        assert!(config.flush_final_segment);
        assert!(!config.show_progress);
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_config_file_then_flags() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.json");
        std::fs::write(&path, r#"{"segment_len": 64, "flush_final_segment": true}"#).unwrap();

        let args = Args::try_parse_from([
            "imma-segmenter",
            "in",
            "out",
            "--config",
            path.to_str().unwrap(),
            "--segment-len",
            "32",
        ])
        .unwrap();

        let config = args.build_config().unwrap();
        assert_eq!(config.segment_len, 32);
        assert!(config.flush_final_segment);
    }

    #[test]
    fn test_zero_segment_len_flag_is_rejected() {
        let args =
            Args::try_parse_from(["imma-segmenter", "in", "out", "--segment-len", "0"]).unwrap();
        assert!(args.build_config().is_err());
    }

    #[test]
    fn test_progress_aware_writer_passes_bytes_through() {
        let progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let bar = progress.add(ProgressBar::new(3));
        bar.inc(1);

        let mut writer = ProgressAwareWriter::new(progress.clone(), Vec::new());
        writer
            .write_all(b"WARN malformed platform_type field 'x1'\n")
            .unwrap();
        write!(writer, "second line\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            String::from_utf8(writer.inner).unwrap(),
            "WARN malformed platform_type field 'x1'\nsecond line\n"
        );
        assert_eq!(bar.position(), 1);
        assert!(!bar.is_finished());
    }

    #[test]
    fn test_stderr_writer_uses_shared_display() {
        let mut writer = stderr_writer();
        assert!(writer.write_all(b"").is_ok());
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["imma-segmenter", "in", "out", "-v", "-q"]).is_err());
    }
}
