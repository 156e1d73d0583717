/// The daily file generation loop.
///
/// `DailyObsFileGenerator` ties the pieces together: it validates the
/// sampling frequency, parses the window, partitions it into day segments,
/// assembles one dataset per segment, and hands each to the writer under a
/// deterministic file name. Segments are processed strictly in chronological
/// order; a writer failure aborts the loop and leaves earlier files on disk.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::dataset::assemble_dataset;
use crate::logging::{self, Component};
use crate::model::{ObsPackError, ObservationSite, SamplingStrategy};
use crate::segment::{parse_window, partition_into_days};
use crate::writer::DatasetWriter;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Everything one generation run needs. Built directly or loaded from a TOML
/// run file via `config::RunConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub site: ObservationSite,
    /// Window start in `YYYYMMDD HH:MM:SS` form, inclusive, UTC.
    pub start: String,
    /// Window end in `YYYYMMDD HH:MM:SS` form, inclusive, UTC.
    pub end: String,
    /// Spacing between consecutive sampled instants, in seconds. Must be
    /// positive.
    pub sample_frequency_seconds: u32,
    pub strategy: SamplingStrategy,
    /// Directory the per-day files are written under. No existence check is
    /// performed here; a missing or unwritable directory surfaces from the
    /// writer as a persistence error.
    pub output_dir: PathBuf,
}

/// Deterministic output name for one day segment:
/// `obspack_{site}_freq{freq}s.{date}.{ext}`.
pub fn output_file_name(
    site_name: &str,
    frequency_seconds: u32,
    segment_date: NaiveDate,
    extension: &str,
) -> String {
    format!(
        "obspack_{}_freq{}s.{}.{}",
        site_name,
        frequency_seconds,
        segment_date.format("%Y-%m-%d"),
        extension
    )
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generates one ObsPack input file per calendar day of the requested window.
pub struct DailyObsFileGenerator<W: DatasetWriter> {
    pub writer: W,
}

impl<W: DatasetWriter> DailyObsFileGenerator<W> {
    pub fn new(writer: W) -> Self {
        DailyObsFileGenerator { writer }
    }

    /// Runs the full generation loop and returns the written paths in
    /// chronological order.
    ///
    /// Parse and configuration errors are raised before any file is written.
    /// A `PersistenceError` aborts the remaining loop; files written by
    /// earlier iterations are not removed.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Vec<PathBuf>, ObsPackError> {
        if request.sample_frequency_seconds == 0 {
            return Err(ObsPackError::InvalidConfiguration(
                "sample frequency must be a positive number of seconds".to_string(),
            ));
        }

        let window = parse_window(&request.start, &request.end)?;
        let segments = partition_into_days(&window);
        logging::info(
            Component::Segmentation,
            Some(&request.site.name),
            &format!(
                "window {} -> {} covers {} day segment(s)",
                request.start,
                request.end,
                segments.len()
            ),
        );

        let mut written: Vec<PathBuf> = Vec::with_capacity(segments.len());
        for segment in &segments {
            let dataset = assemble_dataset(
                &request.site,
                &window,
                segment,
                request.sample_frequency_seconds,
                request.strategy,
            )?;
            let path = self.segment_path(request, segment.segment_start.date());

            if let Err(e) = self.writer.write(&dataset, &path) {
                logging::error(
                    Component::Writer,
                    Some(&request.site.name),
                    &format!("aborting after {} file(s): {}", written.len(), e),
                );
                logging::log_generation_summary(&request.site.name, segments.len(), written.len());
                return Err(e);
            }

            logging::info(
                Component::Writer,
                Some(&request.site.name),
                &format!("{} ({} records)", path.display(), dataset.len()),
            );
            written.push(path);
        }

        logging::log_generation_summary(&request.site.name, segments.len(), written.len());
        Ok(written)
    }

    fn segment_path(&self, request: &GenerationRequest, date: NaiveDate) -> PathBuf {
        request.output_dir.join(output_file_name(
            &request.site.name,
            request.sample_frequency_seconds,
            date,
            self.writer.file_extension(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Convenience entry point
// ---------------------------------------------------------------------------

/// One-call convenience form of the generation contract: site fields, window
/// strings, sampling parameters, and the output directory.
#[allow(clippy::too_many_arguments)]
pub fn generate_obspack_inputs<W: DatasetWriter>(
    writer: W,
    site_name: &str,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    start: &str,
    end: &str,
    sample_frequency_seconds: u32,
    strategy: SamplingStrategy,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ObsPackError> {
    let request = GenerationRequest {
        site: ObservationSite {
            name: site_name.to_string(),
            latitude,
            longitude,
            altitude,
        },
        start: start.to_string(),
        end: end.to_string(),
        sample_frequency_seconds,
        strategy,
        output_dir: output_dir.to_path_buf(),
    };
    DailyObsFileGenerator::new(writer).generate(&request)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
