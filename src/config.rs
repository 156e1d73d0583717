/// TOML run configuration.
///
/// A run file describes one generation run — the site, the window, and the
/// sampling parameters — so batch jobs can be driven by checked-in config
/// rather than hardcoded arguments:
///
/// ```toml
/// [site]
/// name = "SOAS-Ground"
/// latitude = 32.903281
/// longitude = -87.249942
/// altitude = 125.0
///
/// [window]
/// start = "20130601 00:00:00"
/// end = "20130716 00:00:00"
///
/// [sampling]
/// frequency_seconds = 3600
/// strategy_code = 2
///
/// [output]
/// directory = "/data/obspack"
/// ```
///
/// Strategy codes are validated against the closed 1–4 set here; unknown
/// codes never reach the generation loop.

use std::path::PathBuf;

use serde::Deserialize;

use crate::generator::GenerationRequest;
use crate::model::{ObsPackError, ObservationSite, SamplingStrategy};

// ---------------------------------------------------------------------------
// Config structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub site: SiteConfig,
    pub window: WindowConfig,
    pub sampling: SamplingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    /// `YYYYMMDD HH:MM:SS`, inclusive, UTC.
    pub start: String,
    /// `YYYYMMDD HH:MM:SS`, inclusive, UTC.
    pub end: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    pub frequency_seconds: u32,
    /// Integer strategy code, 1–4. Validated in `into_request`.
    pub strategy_code: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

// ---------------------------------------------------------------------------
// Loading and conversion
// ---------------------------------------------------------------------------

/// Loads a run configuration from a TOML file.
pub fn load_run_config(path: &str) -> Result<RunConfig, ObsPackError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ObsPackError::ParseError(format!("cannot read run config '{}': {}", path, e))
    })?;
    parse_run_config(&text)
}

/// Parses run configuration from TOML text.
pub fn parse_run_config(text: &str) -> Result<RunConfig, ObsPackError> {
    toml::from_str(text)
        .map_err(|e| ObsPackError::ParseError(format!("invalid run config: {}", e)))
}

impl RunConfig {
    /// Converts the raw config into a validated request. Unknown strategy
    /// codes are rejected here, before any generation work begins.
    pub fn into_request(self) -> Result<GenerationRequest, ObsPackError> {
        let strategy = SamplingStrategy::from_code(self.sampling.strategy_code).ok_or_else(|| {
            ObsPackError::InvalidConfiguration(format!(
                "unknown sampling strategy code {} (valid: 1=4-hour avg, 2=1-hour avg, \
                 3=90-min avg, 4=instantaneous)",
                self.sampling.strategy_code
            ))
        })?;

        Ok(GenerationRequest {
            site: ObservationSite {
                name: self.site.name,
                latitude: self.site.latitude,
                longitude: self.site.longitude,
                altitude: self.site.altitude,
            },
            start: self.window.start,
            end: self.window.end,
            sample_frequency_seconds: self.sampling.frequency_seconds,
            strategy,
            output_dir: self.output.directory,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
