/// NetCDF writer backend, available behind the `netcdf` cargo feature.
///
/// Produces files in the GEOS-Chem ObsPack input layout: an `obs` record
/// dimension plus fixed `calendar_components` (6) and `string_of_200chars`
/// (200) dimensions, with variable names and attributes taken from the
/// metadata registry in `dataset`.

use std::path::Path;

use crate::dataset::{
    variable_metadata, DailyObservationDataset, FillValue, VariableMetadata,
};
use crate::model::{ObsPackError, CALENDAR_COMPONENTS, OBSPACK_ID_WIDTH};
use crate::writer::DatasetWriter;

/// Writes one `DailyObservationDataset` per call as a NetCDF file.
#[derive(Debug, Default)]
pub struct NetcdfWriter;

impl NetcdfWriter {
    pub fn new() -> Self {
        NetcdfWriter
    }
}

fn nc_err(path: &Path, e: netcdf::Error) -> ObsPackError {
    ObsPackError::PersistenceError {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Attaches the registry attributes (units, long_name, comment, order,
/// values legend, fill value) to a freshly created variable.
fn apply_attributes(
    var: &mut netcdf::VariableMut<'_>,
    meta: &VariableMetadata,
) -> Result<(), netcdf::Error> {
    if let Some(units) = meta.units {
        var.put_attribute("units", units)?;
    }
    var.put_attribute("long_name", meta.long_name)?;
    if let Some(comment) = meta.comment {
        var.put_attribute("comment", comment)?;
    }
    if let Some(order) = meta.order {
        var.put_attribute("order", order)?;
    }
    if let Some(values) = meta.values {
        var.put_attribute("values", values)?;
    }
    match meta.fill_value {
        FillValue::Float(v) => {
            var.set_fill_value(v)?;
        }
        FillValue::Int(v) => {
            var.set_fill_value(v)?;
        }
        FillValue::None => {}
    }
    Ok(())
}

fn registry(name: &str) -> &'static VariableMetadata {
    // The registry is exhaustive over the schema; a miss here is a programming
    // error caught by the dataset tests, not a runtime condition.
    variable_metadata(name).unwrap_or_else(|| panic!("'{}' missing from VARIABLE_METADATA", name))
}

impl DatasetWriter for NetcdfWriter {
    fn write(&self, dataset: &DailyObservationDataset, path: &Path) -> Result<(), ObsPackError> {
        let mut file = netcdf::create(path).map_err(|e| nc_err(path, e))?;
        let n = dataset.len();

        file.add_dimension("obs", n).map_err(|e| nc_err(path, e))?;
        file.add_dimension("calendar_components", CALENDAR_COMPONENTS)
            .map_err(|e| nc_err(path, e))?;
        file.add_dimension("string_of_200chars", OBSPACK_ID_WIDTH)
            .map_err(|e| nc_err(path, e))?;

        // Constant position columns.
        for (name, data) in [
            ("latitude", &dataset.latitude),
            ("longitude", &dataset.longitude),
            ("altitude", &dataset.altitude),
        ] {
            let write = |file: &mut netcdf::FileMut| -> Result<(), netcdf::Error> {
                let mut var = file.add_variable::<f32>(name, &["obs"])?;
                apply_attributes(&mut var, registry(name))?;
                var.put_values(data, ..)?;
                Ok(())
            };
            write(&mut file).map_err(|e| nc_err(path, e))?;
        }

        // obs x 6 calendar component matrix.
        {
            let flat: Vec<i32> = dataset
                .time_components
                .iter()
                .flat_map(|row| row.iter().copied())
                .collect();
            let write = |file: &mut netcdf::FileMut| -> Result<(), netcdf::Error> {
                let mut var =
                    file.add_variable::<i32>("time_components", &["obs", "calendar_components"])?;
                apply_attributes(&mut var, registry("time_components"))?;
                var.put_values(&flat, ..)?;
                Ok(())
            };
            write(&mut file).map_err(|e| nc_err(path, e))?;
        }

        // Fixed-width id strings stored as an obs x 200 character matrix.
        {
            let bytes: Vec<u8> = dataset
                .obspack_id
                .iter()
                .flat_map(|id| id.bytes())
                .collect();
            let write = |file: &mut netcdf::FileMut| -> Result<(), netcdf::Error> {
                let mut var =
                    file.add_variable::<u8>("obspack_id", &["obs", "string_of_200chars"])?;
                apply_attributes(&mut var, registry("obspack_id"))?;
                var.put_values(&bytes, ..)?;
                Ok(())
            };
            write(&mut file).map_err(|e| nc_err(path, e))?;
        }

        // Constant strategy-code column.
        {
            let write = |file: &mut netcdf::FileMut| -> Result<(), netcdf::Error> {
                let mut var = file.add_variable::<i32>("CT_sampling_strategy", &["obs"])?;
                apply_attributes(&mut var, registry("CT_sampling_strategy"))?;
                var.put_values(&dataset.sampling_strategy, ..)?;
                Ok(())
            };
            write(&mut file).map_err(|e| nc_err(path, e))?;
        }

        Ok(())
    }
}
