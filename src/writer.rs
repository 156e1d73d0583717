/// The dataset writer boundary.
///
/// The generator assembles `DailyObservationDataset`s and hands them to a
/// `DatasetWriter` together with the target path. Keeping persistence behind
/// a trait makes the generation loop deterministic in tests (a recording
/// writer stands in for the real backend) and keeps the NetCDF binding an
/// optional dependency.

use std::path::Path;

use crate::dataset::DailyObservationDataset;
use crate::model::ObsPackError;

/// Persists one assembled dataset to one output file.
///
/// Implementations must not share a file handle across calls; each call gets
/// a distinct path by construction. Failures surface as
/// `ObsPackError::PersistenceError` and abort the caller's segment loop —
/// files written by earlier calls remain on disk.
pub trait DatasetWriter {
    /// Write `dataset` to `path`, creating or overwriting the file.
    fn write(&self, dataset: &DailyObservationDataset, path: &Path) -> Result<(), ObsPackError>;

    /// File extension (without the dot) used when constructing output names.
    fn file_extension(&self) -> &'static str {
        "nc"
    }
}
