/// ObsPack input file generator for atmospheric chemistry transport models.
///
/// Given a fixed observation site, an inclusive time window, and a sampling
/// configuration, produces one structured data file per calendar day covering
/// the window. Each file holds a regular time series of synthetic observation
/// records: decomposed UTC timestamp components, the constant site
/// coordinates, a sampling-strategy code, and a unique fixed-width record id.
///
/// Modules:
/// - `model` — shared domain types, schema constants, error taxonomy.
/// - `segment` — window parsing, day segmentation, instant expansion.
/// - `dataset` — per-day column assembly and the variable-metadata registry.
/// - `writer` — the `DatasetWriter` persistence seam.
/// - `netcdf_io` — NetCDF backend (requires the `netcdf` feature).
/// - `generator` — the sequential per-day generation loop.
/// - `config` — TOML run configuration.
/// - `logging` — leveled console/file logging for batch runs.

pub mod config;
pub mod dataset;
pub mod generator;
pub mod logging;
pub mod model;
#[cfg(feature = "netcdf")]
pub mod netcdf_io;
pub mod segment;
pub mod writer;

pub use config::{load_run_config, RunConfig};
pub use dataset::{assemble_dataset, DailyObservationDataset, VARIABLE_METADATA};
pub use generator::{generate_obspack_inputs, DailyObsFileGenerator, GenerationRequest};
pub use model::{ObsPackError, ObservationSite, ObservationWindow, SamplingStrategy};
#[cfg(feature = "netcdf")]
pub use netcdf_io::NetcdfWriter;
pub use writer::DatasetWriter;
