// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Dataset Export
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coordinate-indexed export of a flux surface.
//!
//! `theta` is the single dimension and coordinate; `R` and `Z` are data
//! variables over it. The shaping parameters travel along as metadata.
//!
//! | Extension | Container                                   |
//! |-----------|---------------------------------------------|
//! | `.nc`     | NetCDF classic (xarray / netCDF4 readable)  |
//! | `.npz`    | NumPy archive of named arrays               |

use crate::atomic::write_atomically;
use miller_types::error::{MillerError, MillerResult};
use miller_types::params::ShapingParameters;
use miller_types::state::FluxSurfaceCoordinates;
use ndarray::{arr0, Array1};
use ndarray_npy::NpzWriter;
use netcdf3::{DataSet, FileWriter, Version, WriteError};
use std::fs::File;
use std::path::Path;

pub const THETA: &str = "theta";
pub const R_VAR: &str = "R";
pub const Z_VAR: &str = "Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    NetCdf,
    Npz,
}

impl DatasetFormat {
    /// Pick the container from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> MillerResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "nc" => Ok(DatasetFormat::NetCdf),
            "npz" => Ok(DatasetFormat::Npz),
            _ => Err(MillerError::Format { extension: ext }),
        }
    }
}

/// Read-only view of what gets written.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceDataset<'a> {
    pub theta: &'a Array1<f64>,
    pub r: &'a Array1<f64>,
    pub z: Option<&'a Array1<f64>>,
    pub params: Option<&'a ShapingParameters>,
}

impl<'a> SurfaceDataset<'a> {
    /// Minimal dataset: `R` over `theta`.
    pub fn new(theta: &'a Array1<f64>, r: &'a Array1<f64>) -> Self {
        SurfaceDataset {
            theta,
            r,
            z: None,
            params: None,
        }
    }

    /// Full dataset: `R` and `Z` over `theta`, plus the parameters.
    pub fn from_coordinates(
        coords: &'a FluxSurfaceCoordinates,
        params: &'a ShapingParameters,
    ) -> Self {
        SurfaceDataset {
            theta: &coords.theta,
            r: &coords.r,
            z: Some(&coords.z),
            params: Some(params),
        }
    }

    fn check_shapes(&self) -> MillerResult<()> {
        let n = self.theta.len();
        let lens = std::iter::once(self.r.len()).chain(self.z.map(|z| z.len()));
        for len in lens {
            if len != n {
                return Err(MillerError::Shape {
                    expected: n,
                    got: len,
                });
            }
        }
        if n == 0 {
            return Err(MillerError::Shape {
                expected: 1,
                got: 0,
            });
        }
        Ok(())
    }
}

/// Write `dataset` to `path`, choosing the container by extension.
/// The extension and array shapes are checked before anything is written.
pub fn write_dataset(dataset: &SurfaceDataset<'_>, path: &Path) -> MillerResult<()> {
    let format = DatasetFormat::from_path(path)?;
    dataset.check_shapes()?;

    write_atomically(path, |tmp| match format {
        DatasetFormat::NetCdf => write_netcdf(dataset, tmp, path),
        DatasetFormat::Npz => write_npz(dataset, tmp, path),
    })?;
    log::info!(
        "Saved {:?} dataset ({} samples) to '{}'",
        format,
        dataset.theta.len(),
        path.display()
    );
    Ok(())
}

fn dataset_error(path: &Path, reason: impl std::fmt::Debug) -> MillerError {
    MillerError::Dataset {
        path: path.to_path_buf(),
        reason: format!("{reason:?}"),
    }
}

/// Filesystem failures keep the IO class; anything else is an encoder error.
fn writer_error(path: &Path, e: WriteError) -> MillerError {
    match e {
        WriteError::IOErrorKind(kind) => MillerError::io(path, std::io::Error::from(kind)),
        other => dataset_error(path, other),
    }
}

fn write_netcdf(ds: &SurfaceDataset<'_>, tmp: &Path, path: &Path) -> MillerResult<()> {
    let err = |e: netcdf3::InvalidDataSet| dataset_error(path, e);
    let io_err = |e: WriteError| writer_error(path, e);

    let mut def = DataSet::new();
    def.add_fixed_dim(THETA, ds.theta.len()).map_err(err)?;

    def.add_var_f64(THETA, &[THETA]).map_err(err)?;
    def.add_var_attr_string(THETA, "units", "rad").map_err(err)?;
    def.add_var_attr_string(THETA, "long_name", "poloidal angle").map_err(err)?;

    def.add_var_f64(R_VAR, &[THETA]).map_err(err)?;
    def.add_var_attr_string(R_VAR, "units", "m").map_err(err)?;
    def.add_var_attr_string(R_VAR, "long_name", "major radius of flux surface")
        .map_err(err)?;

    if ds.z.is_some() {
        def.add_var_f64(Z_VAR, &[THETA]).map_err(err)?;
        def.add_var_attr_string(Z_VAR, "units", "m").map_err(err)?;
        def.add_var_attr_string(Z_VAR, "long_name", "height of flux surface")
            .map_err(err)?;
    }

    def.add_global_attr_string("title", "Miller flux-surface boundary")
        .map_err(err)?;
    if let Some(params) = ds.params {
        for (key, value) in params.entries() {
            def.add_global_attr_f64(key, vec![value]).map_err(err)?;
        }
    }

    let mut writer = FileWriter::open(tmp).map_err(io_err)?;
    writer.set_def(&def, Version::Classic, 0).map_err(io_err)?;
    writer.write_var_f64(THETA, &ds.theta.to_vec()).map_err(io_err)?;
    writer.write_var_f64(R_VAR, &ds.r.to_vec()).map_err(io_err)?;
    if let Some(z) = ds.z {
        writer.write_var_f64(Z_VAR, &z.to_vec()).map_err(io_err)?;
    }
    writer.close().map_err(io_err)?;
    Ok(())
}

fn write_npz(ds: &SurfaceDataset<'_>, tmp: &Path, path: &Path) -> MillerResult<()> {
    let file = File::create(tmp).map_err(|e| MillerError::io(path, e))?;
    let mut npz = NpzWriter::new(file);
    let err = |e: ndarray_npy::WriteNpzError| MillerError::Dataset {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    npz.add_array(THETA, ds.theta).map_err(err)?;
    npz.add_array(R_VAR, ds.r).map_err(err)?;
    if let Some(z) = ds.z {
        npz.add_array(Z_VAR, z).map_err(err)?;
    }
    if let Some(params) = ds.params {
        for (key, value) in params.entries() {
            npz.add_array(key, &arr0(value)).map_err(err)?;
        }
    }
    npz.finish().map_err(err)?;
    Ok(())
}
