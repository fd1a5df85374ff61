// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Shaping Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The four scalars of the Miller parametrization and partial overrides
//! used while layering defaults, config files and flags.

use crate::constants::{
    DEFAULT_ASPECT_RATIO, DEFAULT_ELONGATION, DEFAULT_MAJOR_RADIUS, DEFAULT_TRIANGULARITY,
};
use crate::error::{MillerError, MillerResult};
use std::fmt;

/// Name of a shaping parameter. Flag names, config keys and dataset
/// attributes all use the same spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AspectRatio,
    Elongation,
    Triangularity,
    MajorRadius,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::AspectRatio,
        Field::Elongation,
        Field::Triangularity,
        Field::MajorRadius,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::AspectRatio => "A",
            Field::Elongation => "kappa",
            Field::Triangularity => "delta",
            Field::MajorRadius => "R0",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Range-check a single value for this field.
    pub fn validate(self, value: f64) -> MillerResult<f64> {
        if !value.is_finite() {
            return Err(MillerError::parameter(
                self.key(),
                value,
                "must be a finite number",
            ));
        }
        match self {
            Field::AspectRatio if value == 0.0 => Err(MillerError::parameter(
                self.key(),
                value,
                "must be nonzero (minor radius is R0 / A)",
            )),
            Field::Triangularity if value.abs() > 1.0 => Err(MillerError::parameter(
                self.key(),
                value,
                "must lie in [-1, 1] (arcsin domain)",
            )),
            _ => Ok(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fully resolved Miller shaping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapingParameters {
    /// Aspect ratio A = R0 / r
    pub aspect_ratio: f64,
    /// Elongation κ
    pub kappa: f64,
    /// Triangularity δ
    pub delta: f64,
    /// Major radius R0 (m)
    pub r0: f64,
}

impl Default for ShapingParameters {
    fn default() -> Self {
        ShapingParameters {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            kappa: DEFAULT_ELONGATION,
            delta: DEFAULT_TRIANGULARITY,
            r0: DEFAULT_MAJOR_RADIUS,
        }
    }
}

impl ShapingParameters {
    /// Build and validate in one step.
    pub fn new(aspect_ratio: f64, kappa: f64, delta: f64, r0: f64) -> MillerResult<Self> {
        let params = ShapingParameters {
            aspect_ratio,
            kappa,
            delta,
            r0,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::AspectRatio => self.aspect_ratio,
            Field::Elongation => self.kappa,
            Field::Triangularity => self.delta,
            Field::MajorRadius => self.r0,
        }
    }

    fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::AspectRatio => self.aspect_ratio = value,
            Field::Elongation => self.kappa = value,
            Field::Triangularity => self.delta = value,
            Field::MajorRadius => self.r0 = value,
        }
    }

    /// Check every field, then the extents derived from them; the first
    /// offending one is reported. A valid set yields finite R and Z for
    /// every θ.
    pub fn validate(&self) -> MillerResult<()> {
        for field in Field::ALL {
            field.validate(self.get(field))?;
        }

        let r = self.minor_radius();
        if !r.is_finite() {
            return Err(MillerError::parameter(
                Field::AspectRatio.key(),
                self.aspect_ratio,
                "minor radius R0 / A overflows",
            ));
        }
        if !(self.kappa * r).is_finite() {
            return Err(MillerError::parameter(
                Field::Elongation.key(),
                self.kappa,
                "vertical extent kappa * R0 / A overflows",
            ));
        }
        if !(self.r0.abs() + r.abs()).is_finite() {
            return Err(MillerError::parameter(
                Field::MajorRadius.key(),
                self.r0,
                "radial extent R0 + R0 / A overflows",
            ));
        }
        Ok(())
    }

    /// Minor radius r = R0 / A (m).
    pub fn minor_radius(&self) -> f64 {
        self.r0 / self.aspect_ratio
    }

    /// `(key, value)` pairs in canonical order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        Field::ALL.map(|f| (f.key(), self.get(f)))
    }
}

impl fmt::Display for ShapingParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A={} kappa={} delta={} R0={}",
            self.aspect_ratio, self.kappa, self.delta, self.r0
        )
    }
}

/// A partial parameter set from one source (config file or flags).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterOverrides {
    pub aspect_ratio: Option<f64>,
    pub kappa: Option<f64>,
    pub delta: Option<f64>,
    pub r0: Option<f64>,
}

impl ParameterOverrides {
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::AspectRatio => self.aspect_ratio,
            Field::Elongation => self.kappa,
            Field::Triangularity => self.delta,
            Field::MajorRadius => self.r0,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::AspectRatio => &mut self.aspect_ratio,
            Field::Elongation => &mut self.kappa,
            Field::Triangularity => &mut self.delta,
            Field::MajorRadius => &mut self.r0,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&f| self.get(f).is_none())
    }

    /// Layer these overrides on top of `base`, field by field.
    pub fn apply_to(&self, base: ShapingParameters) -> ShapingParameters {
        let mut merged = base;
        for field in Field::ALL {
            if let Some(value) = self.get(field) {
                merged.set(field, value);
            }
        }
        merged
    }
}
