// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::CONFIG_SECTION;
use crate::error::{MillerError, MillerResult};
use crate::params::{Field, ParameterOverrides, ShapingParameters};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A value as written in the config file, before numeric validation.
/// Ordering matters for untagged decoding: integers are tried before floats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    List(Vec<RawValue>),
    Table(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Parse as a shaping parameter. Only numeric literals are accepted;
    /// range checks wait until flags have been merged over the file.
    pub fn to_parameter(&self, field: Field) -> MillerResult<f64> {
        match self {
            RawValue::Integer(i) => Ok(*i as f64),
            RawValue::Float(x) => Ok(*x),
            other => Err(MillerError::parameter(
                field.key(),
                other,
                "expected a numeric literal",
            )),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(x) => write!(f, "{x}"),
            RawValue::Text(s) => write!(f, "{s:?}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            RawValue::Table(_) => f.write_str("{...}"),
        }
    }
}

/// On-disk layout: a `miller` table plus anything else, which is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    miller: Option<BTreeMap<String, RawValue>>,
}

/// Config file syntax, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    /// True when `path` names something this loader reads rather than an
    /// output file.
    pub fn is_config_path(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some(ext) if ext.eq_ignore_ascii_case("toml") || ext.eq_ignore_ascii_case("json")
        )
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub section: BTreeMap<String, RawValue>,
}

impl ConfigFile {
    /// Read and decode a config file. Missing or malformed files are
    /// errors; there is no fallback to defaults.
    pub fn from_file(path: &Path) -> MillerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MillerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents, ConfigFormat::from_path(path), path)
    }

    /// Decode config text; `path` is only used in error messages.
    pub fn parse(contents: &str, format: ConfigFormat, path: &Path) -> MillerResult<Self> {
        let parsed: Result<ConfigDocument, String> = match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        };
        let doc = parsed.map_err(|reason| MillerError::Config {
            path: path.to_path_buf(),
            reason,
        })?;

        let section = match doc.miller {
            Some(section) => section,
            None => {
                log::warn!(
                    "No [{CONFIG_SECTION}] table in '{}'; using defaults",
                    path.display()
                );
                BTreeMap::new()
            }
        };

        Ok(ConfigFile {
            path: path.to_path_buf(),
            section,
        })
    }

    /// Numeric overrides for the keys present in the file.
    pub fn overrides(&self) -> MillerResult<ParameterOverrides> {
        let mut overrides = ParameterOverrides::default();
        for (key, raw) in &self.section {
            match Field::from_key(key) {
                Some(field) => overrides.set(field, raw.to_parameter(field)?),
                None => log::debug!(
                    "Ignoring unknown key '{key}' in '{}'",
                    self.path.display()
                ),
            }
        }
        Ok(overrides)
    }
}

/// Merge defaults, an optional config file and flag overrides, last wins.
pub fn resolve(
    defaults: &ShapingParameters,
    file_path: Option<&Path>,
    cli_overrides: &ParameterOverrides,
) -> MillerResult<ShapingParameters> {
    let mut params = *defaults;

    if let Some(path) = file_path {
        let file = ConfigFile::from_file(path)?;
        let from_file = file.overrides()?;
        log::info!(
            "Loaded {} parameter(s) from '{}'",
            Field::ALL.iter().filter(|&&f| from_file.get(f).is_some()).count(),
            path.display()
        );
        params = from_file.apply_to(params);
    }

    params = cli_overrides.apply_to(params);
    params.validate()?;
    log::debug!("Resolved shaping parameters: {params}");
    Ok(params)
}
