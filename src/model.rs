/// Core data types for the ObsPack input file generator.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies beyond chrono —
/// only types and the schema constants they carry.

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Schema constants
// ---------------------------------------------------------------------------

/// Fixed width of an obspack_id string, in characters. Shorter ids are
/// right-padded with underscores; longer ids are rejected.
pub const OBSPACK_ID_WIDTH: usize = 200;

/// Number of integer calendar components per record:
/// year, month, day, hour, minute, second.
pub const CALENDAR_COMPONENTS: usize = 6;

/// Fill value for the float position variables (latitude, longitude, altitude).
pub const FILL_VALUE_F32: f32 = -1.0e+34;

/// Fill value for the integer variables (time_components, CT_sampling_strategy).
pub const FILL_VALUE_I32: i32 = -9;

/// Textual timestamp format accepted for window boundaries,
/// e.g. "20130601 00:00:00".
pub const WINDOW_TIME_FORMAT: &str = "%Y%m%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Site and window types
// ---------------------------------------------------------------------------

/// A fixed (non-moving) observation site.
///
/// Coordinates are stored verbatim — no range validation is performed, since
/// the downstream model is the authority on what is physically sensible.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSite {
    /// Site name used in obspack ids and output file names,
    /// e.g. "SOAS-Ground".
    pub name: String,
    /// Latitude in degrees north.
    pub latitude: f64,
    /// Longitude in degrees east.
    pub longitude: f64,
    /// Elevation plus sample intake height, in meters above sea level.
    pub altitude: f64,
}

/// The full time range to cover, both ends inclusive.
///
/// Times are naive and assumed UTC — no timezone conversion is ever applied.
/// Invariant: `end >= start` (enforced at parse time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One calendar-day (or partial final day) slice of an `ObservationWindow`.
///
/// `segment_end = segment_start + 1 day - 1 second`, except the last segment,
/// whose end is clamped to the window's end. Segments tile the window
/// contiguously: segment i's end + 1 second == segment i+1's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySegment {
    pub segment_start: NaiveDateTime,
    pub segment_end: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Sampling strategy
// ---------------------------------------------------------------------------

/// How the transport model averages onto the requested timebase.
///
/// Only the closed set of codes the model understands is representable.
/// Raw integer codes are validated at the configuration boundary via
/// [`SamplingStrategy::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Code 1: 4-hour average.
    FourHourAverage,
    /// Code 2: 1-hour average.
    OneHourAverage,
    /// Code 3: 90-minute average.
    NinetyMinuteAverage,
    /// Code 4: instantaneous.
    Instantaneous,
}

impl SamplingStrategy {
    /// The integer code written into the CT_sampling_strategy variable.
    pub fn code(self) -> i32 {
        match self {
            SamplingStrategy::FourHourAverage => 1,
            SamplingStrategy::OneHourAverage => 2,
            SamplingStrategy::NinetyMinuteAverage => 3,
            SamplingStrategy::Instantaneous => 4,
        }
    }

    /// Looks up a strategy by its integer code. Returns `None` for codes
    /// outside the closed set 1–4.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(SamplingStrategy::FourHourAverage),
            2 => Some(SamplingStrategy::OneHourAverage),
            3 => Some(SamplingStrategy::NinetyMinuteAverage),
            4 => Some(SamplingStrategy::Instantaneous),
            _ => None,
        }
    }
}

impl std::fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingStrategy::FourHourAverage => write!(f, "4-hour avg"),
            SamplingStrategy::OneHourAverage => write!(f, "1-hour avg"),
            SamplingStrategy::NinetyMinuteAverage => write!(f, "90-min avg"),
            SamplingStrategy::Instantaneous => write!(f, "instantaneous"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while generating ObsPack input files.
///
/// Parse and configuration errors are detected before any file is written.
/// A persistence error aborts the remaining segment loop but leaves
/// already-written files in place — there is no rollback.
#[derive(Debug, PartialEq)]
pub enum ObsPackError {
    /// A window boundary string did not match `YYYYMMDD HH:MM:SS`, or the
    /// window end precedes its start.
    ParseError(String),
    /// The request is self-inconsistent: zero sampling frequency, an
    /// obspack id that would exceed the fixed 200-character width, or an
    /// unknown sampling-strategy code.
    InvalidConfiguration(String),
    /// The dataset writer failed for a given output path.
    PersistenceError { path: String, message: String },
}

impl std::fmt::Display for ObsPackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObsPackError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ObsPackError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            ObsPackError::PersistenceError { path, message } => {
                write!(f, "Persistence error for {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ObsPackError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
