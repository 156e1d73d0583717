/// Per-day dataset assembly.
///
/// A `DailyObservationDataset` is a named table of equal-length typed columns,
/// one per output variable, all indexed by the `obs` dimension. One dataset is
/// assembled per day segment, handed to the writer, and discarded.
///
/// The variable attribute metadata lives in a static registry here rather
/// than in the writer, so schema tests and any writer backend share a single
/// source of truth.

use crate::model::{
    DaySegment, ObsPackError, ObservationSite, ObservationWindow, SamplingStrategy,
    CALENDAR_COMPONENTS, FILL_VALUE_F32, FILL_VALUE_I32, OBSPACK_ID_WIDTH,
};
use crate::segment::{sample_instants, time_components};

// ---------------------------------------------------------------------------
// Variable metadata registry
// ---------------------------------------------------------------------------

/// Fill value attached to a variable, if any. The obspack_id character
/// variable carries none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillValue {
    Float(f32),
    Int(i32),
    None,
}

/// Descriptive attribute metadata for one output variable.
pub struct VariableMetadata {
    /// Variable name as written to the output file.
    pub name: &'static str,
    pub units: Option<&'static str>,
    pub long_name: &'static str,
    pub comment: Option<&'static str>,
    /// Column-order legend; only present on time_components.
    pub order: Option<&'static str>,
    /// Value legend; only present on CT_sampling_strategy.
    pub values: Option<&'static str>,
    pub fill_value: FillValue,
}

/// Attribute metadata for every variable in an ObsPack input file, matching
/// the GEOS-Chem ObsPack diagnostic layout. This is the single source of
/// truth consumed by writer backends — variable names and attributes should
/// not be hardcoded anywhere else.
pub static VARIABLE_METADATA: &[VariableMetadata] = &[
    VariableMetadata {
        name: "latitude",
        units: Some("degrees_north"),
        long_name: "Sample latitude",
        comment: None,
        order: None,
        values: None,
        fill_value: FillValue::Float(FILL_VALUE_F32),
    },
    VariableMetadata {
        name: "longitude",
        units: Some("degrees_east"),
        long_name: "Sample longitude",
        comment: None,
        order: None,
        values: None,
        fill_value: FillValue::Float(FILL_VALUE_F32),
    },
    VariableMetadata {
        name: "altitude",
        units: Some("meters"),
        long_name: "sample altitude in meters above sea level",
        comment: Some(
            "Altitude is elevation plus sample intake height in meters above sea level.",
        ),
        order: None,
        values: None,
        fill_value: FillValue::Float(FILL_VALUE_F32),
    },
    VariableMetadata {
        name: "time_components",
        units: None,
        long_name: "Calendar time components as integers. Times and dates are UTC.",
        comment: Some("Calendar time components as integers. Times and dates are UTC."),
        order: Some("year, month, day, hour, minute, second"),
        values: None,
        fill_value: FillValue::Int(FILL_VALUE_I32),
    },
    VariableMetadata {
        name: "obspack_id",
        units: None,
        long_name: "Unique ObsPack observation id",
        comment: Some(
            "Unique observation id string that includes obs_id, dataset_id and obspack_num.",
        ),
        order: None,
        values: None,
        fill_value: FillValue::None,
    },
    VariableMetadata {
        name: "CT_sampling_strategy",
        units: None,
        long_name: "Model sampling strategy",
        comment: None,
        order: None,
        values: Some("How to sample model. 1=4-hour avg; 2=1-hour avg; 3=90-min avg; 4=instantaneous"),
        fill_value: FillValue::Int(FILL_VALUE_I32),
    },
];

/// Looks up variable metadata by name. Returns `None` if the variable is not
/// part of the ObsPack schema.
pub fn variable_metadata(name: &str) -> Option<&'static VariableMetadata> {
    VARIABLE_METADATA.iter().find(|v| v.name == name)
}

// ---------------------------------------------------------------------------
// ObsPack id construction
// ---------------------------------------------------------------------------

/// Builds the id prefix shared by every record of every segment:
/// `{site}_from_{start_date}_to_{end_date}_n`, with dates taken from the
/// original window, not the segment.
pub fn obspack_id_prefix(site_name: &str, window: &ObservationWindow) -> String {
    format!(
        "{}_from_{}_to_{}_n",
        site_name,
        window.start.format("%Y%m%d"),
        window.end.format("%Y%m%d")
    )
}

/// Builds the fixed-width id for the record at `index` within a segment:
/// `prefix + index`, right-padded with underscores to exactly 200 characters.
///
/// There is no truncation: a prefix long enough to push the id past 200
/// characters is an `InvalidConfiguration` error.
pub fn obspack_id(prefix: &str, index: usize) -> Result<String, ObsPackError> {
    let id = format!("{}{}", prefix, index);
    if id.len() > OBSPACK_ID_WIDTH {
        return Err(ObsPackError::InvalidConfiguration(format!(
            "obspack id '{}' is {} characters; the fixed width is {}",
            id,
            id.len(),
            OBSPACK_ID_WIDTH
        )));
    }
    Ok(format!("{:_<width$}", id, width = OBSPACK_ID_WIDTH))
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// One day's worth of observation records as parallel columns, all of length
/// `len()`. Position and strategy columns are constant-valued per file; only
/// the time components and ids vary per record.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservationDataset {
    pub latitude: Vec<f32>,
    pub longitude: Vec<f32>,
    pub altitude: Vec<f32>,
    /// obs x 6 matrix in the order year, month, day, hour, minute, second.
    pub time_components: Vec<[i32; CALENDAR_COMPONENTS]>,
    /// Each id is exactly 200 characters, underscore-padded.
    pub obspack_id: Vec<String>,
    pub sampling_strategy: Vec<i32>,
}

impl DailyObservationDataset {
    /// Number of records (the length of the `obs` dimension).
    pub fn len(&self) -> usize {
        self.latitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitude.is_empty()
    }
}

/// Assembles the dataset for one day segment.
///
/// The id prefix is derived from the original window so it is identical
/// across all of a run's files; uniqueness within a file comes from the
/// 0-indexed record counter appended to it.
pub fn assemble_dataset(
    site: &ObservationSite,
    window: &ObservationWindow,
    segment: &DaySegment,
    frequency_seconds: u32,
    strategy: SamplingStrategy,
) -> Result<DailyObservationDataset, ObsPackError> {
    let instants = sample_instants(segment, frequency_seconds);
    let n = instants.len();
    let prefix = obspack_id_prefix(&site.name, window);

    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        ids.push(obspack_id(&prefix, i)?);
    }

    Ok(DailyObservationDataset {
        latitude: vec![site.latitude as f32; n],
        longitude: vec![site.longitude as f32; n],
        altitude: vec![site.altitude as f32; n],
        time_components: instants.into_iter().map(time_components).collect(),
        obspack_id: ids,
        sampling_strategy: vec![strategy.code(); n],
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{parse_window, partition_into_days};

    fn soas_site() -> ObservationSite {
        ObservationSite {
            name: "SOAS-Ground".to_string(),
            latitude: 32.903281,
            longitude: -87.249942,
            altitude: 125.0,
        }
    }

    #[test]
    fn test_registry_has_no_duplicate_variable_names() {
        let mut seen = std::collections::HashSet::new();
        for var in VARIABLE_METADATA {
            assert!(
                seen.insert(var.name),
                "duplicate variable name '{}' in VARIABLE_METADATA",
                var.name
            );
        }
    }

    #[test]
    fn test_registry_covers_the_full_obspack_schema() {
        for name in [
            "latitude",
            "longitude",
            "altitude",
            "time_components",
            "obspack_id",
            "CT_sampling_strategy",
        ] {
            assert!(
                variable_metadata(name).is_some(),
                "schema variable '{}' missing from registry",
                name
            );
        }
        assert_eq!(VARIABLE_METADATA.len(), 6);
    }

    #[test]
    fn test_position_variables_share_the_float_fill_value() {
        for name in ["latitude", "longitude", "altitude"] {
            let var = variable_metadata(name).unwrap();
            assert_eq!(
                var.fill_value,
                FillValue::Float(FILL_VALUE_F32),
                "'{}' should carry the float fill value",
                name
            );
        }
    }

    #[test]
    fn test_integer_variables_share_the_int_fill_value() {
        for name in ["time_components", "CT_sampling_strategy"] {
            let var = variable_metadata(name).unwrap();
            assert_eq!(var.fill_value, FillValue::Int(FILL_VALUE_I32));
        }
        assert_eq!(
            variable_metadata("obspack_id").unwrap().fill_value,
            FillValue::None,
            "the character variable carries no fill value"
        );
    }

    #[test]
    fn test_id_prefix_uses_window_dates_not_segment_dates() {
        let window = parse_window("20130601 00:00:00", "20130716 00:00:00").unwrap();
        let prefix = obspack_id_prefix("SOAS-Ground", &window);
        assert_eq!(prefix, "SOAS-Ground_from_20130601_to_20130716_n");
    }

    #[test]
    fn test_obspack_ids_are_exactly_200_chars_and_padded() {
        let id = obspack_id("SITE_from_20130601_to_20130716_n", 7).unwrap();
        assert_eq!(id.len(), OBSPACK_ID_WIDTH);
        assert!(id.starts_with("SITE_from_20130601_to_20130716_n7"));
        assert!(id.ends_with('_'));
    }

    #[test]
    fn test_obspack_id_overflow_is_rejected_not_truncated() {
        let prefix = "x".repeat(OBSPACK_ID_WIDTH);
        let err = obspack_id(&prefix, 0).unwrap_err();
        assert!(matches!(err, ObsPackError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_obspack_id_at_exact_width_is_accepted() {
        // 199 prefix chars + a single-digit index is exactly 200.
        let prefix = "y".repeat(OBSPACK_ID_WIDTH - 1);
        let id = obspack_id(&prefix, 3).unwrap();
        assert_eq!(id.len(), OBSPACK_ID_WIDTH);
        assert!(!id.ends_with('_'), "an exact-width id needs no padding");
    }

    #[test]
    fn test_assembled_columns_are_parallel_and_constant() {
        let window = parse_window("20130601 00:00:00", "20130601 23:59:59").unwrap();
        let segment = partition_into_days(&window)[0];
        let ds = assemble_dataset(
            &soas_site(),
            &window,
            &segment,
            3600,
            SamplingStrategy::OneHourAverage,
        )
        .unwrap();

        assert_eq!(ds.len(), 24);
        assert_eq!(ds.longitude.len(), 24);
        assert_eq!(ds.altitude.len(), 24);
        assert_eq!(ds.time_components.len(), 24);
        assert_eq!(ds.obspack_id.len(), 24);
        assert_eq!(ds.sampling_strategy.len(), 24);

        assert!(ds.latitude.iter().all(|&v| v == 32.903281f64 as f32));
        assert!(ds.sampling_strategy.iter().all(|&v| v == 2));
    }

    #[test]
    fn test_altitude_column_is_populated_from_altitude_not_longitude() {
        // Guards against a regression that would mirror the longitude input
        // into the altitude column.
        let window = parse_window("20130601 00:00:00", "20130601 01:00:00").unwrap();
        let segment = partition_into_days(&window)[0];
        let site = soas_site();
        let ds = assemble_dataset(&site, &window, &segment, 3600, SamplingStrategy::Instantaneous)
            .unwrap();

        assert!(ds.altitude.iter().all(|&v| v == 125.0));
        assert!(
            ds.altitude.iter().all(|&v| v != site.longitude as f32),
            "altitude column must not mirror the longitude input"
        );
    }

    #[test]
    fn test_ids_within_a_dataset_are_pairwise_distinct() {
        let window = parse_window("20130601 00:00:00", "20130601 23:59:59").unwrap();
        let segment = partition_into_days(&window)[0];
        let ds = assemble_dataset(
            &soas_site(),
            &window,
            &segment,
            600,
            SamplingStrategy::OneHourAverage,
        )
        .unwrap();

        let unique: std::collections::HashSet<_> = ds.obspack_id.iter().collect();
        assert_eq!(unique.len(), ds.len(), "every record id must be unique");
        assert!(ds.obspack_id.iter().all(|id| id.len() == OBSPACK_ID_WIDTH));
    }

    #[test]
    fn test_time_component_matrix_matches_sampled_instants() {
        let window = parse_window("20130601 06:30:00", "20130601 08:30:00").unwrap();
        let segment = partition_into_days(&window)[0];
        let ds = assemble_dataset(
            &soas_site(),
            &window,
            &segment,
            1800,
            SamplingStrategy::NinetyMinuteAverage,
        )
        .unwrap();

        assert_eq!(ds.time_components[0], [2013, 6, 1, 6, 30, 0]);
        assert_eq!(ds.time_components[1], [2013, 6, 1, 7, 0, 0]);
        assert_eq!(*ds.time_components.last().unwrap(), [2013, 6, 1, 8, 30, 0]);
    }
}
