// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller CLI Arguments
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Command-line flags and their lowering into a run [`Plan`].

use clap::{ArgAction, Parser};
use miller_types::config::ConfigFormat;
use miller_types::constants::{DEFAULT_IMAGE_PATH, DEFAULT_POINTS, MIN_POINTS};
use miller_types::params::ParameterOverrides;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

options:
{options}{after-help}
";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "miller",
    version,
    about = "Plot and export a Miller-parametrized tokamak flux surface",
    help_template = HELP_TEMPLATE
)]
pub struct Args {
    /// Aspect ratio A = R0 / r
    #[arg(long = "A", value_name = "FLOAT", allow_negative_numbers = true)]
    pub aspect_ratio: Option<f64>,

    /// Elongation
    #[arg(long = "kappa", value_name = "FLOAT", allow_negative_numbers = true)]
    pub kappa: Option<f64>,

    /// Triangularity, |delta| <= 1
    #[arg(long = "delta", value_name = "FLOAT", allow_negative_numbers = true)]
    pub delta: Option<f64>,

    /// Major radius [m]
    #[arg(long = "R0", value_name = "FLOAT", allow_negative_numbers = true)]
    pub r0: Option<f64>,

    /// Image path (default miller.png); a .toml or .json path is read as the config file
    #[arg(long, value_name = "PATH")]
    pub filename: Option<PathBuf>,

    /// Configuration file with a [miller] table
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Dataset path, .nc or .npz
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Poloidal angle samples on [0, 2π]
    #[arg(long, value_name = "N", default_value_t = DEFAULT_POINTS, value_parser = parse_points)]
    pub points: usize,

    /// Do not write the image
    #[arg(long)]
    pub no_plot: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_points(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number"))?;
    if n < MIN_POINTS {
        return Err(format!("at least {MIN_POINTS} points are required"));
    }
    Ok(n)
}

/// What a single invocation reads, computes and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub config: Option<PathBuf>,
    /// `None` when the image is suppressed.
    pub image: Option<PathBuf>,
    pub dataset: Option<PathBuf>,
    pub points: usize,
    pub overrides: ParameterOverrides,
}

impl Args {
    /// Flag values as a partial parameter set.
    pub fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            aspect_ratio: self.aspect_ratio,
            kappa: self.kappa,
            delta: self.delta,
            r0: self.r0,
        }
    }

    /// Sort the path flags into config, image and dataset roles.
    ///
    /// The error is a usage message: both `--input` and a config-typed
    /// `--filename` name a configuration file.
    pub fn plan(&self) -> Result<Plan, String> {
        let filename_is_config = self
            .filename
            .as_deref()
            .is_some_and(ConfigFormat::is_config_path);

        let (config, image) = if filename_is_config {
            if let Some(input) = &self.input {
                return Err(format!(
                    "'--input {}' conflicts with configuration file '--filename {}'",
                    input.display(),
                    self.filename.as_deref().unwrap_or(input).display()
                ));
            }
            (self.filename.clone(), PathBuf::from(DEFAULT_IMAGE_PATH))
        } else {
            (
                self.input.clone(),
                self.filename
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH)),
            )
        };

        Ok(Plan {
            config,
            image: (!self.no_plot).then_some(image),
            dataset: self.output.clone(),
            points: self.points,
            overrides: self.overrides(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("miller").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let plan = parse(&[]).plan().unwrap();
        assert_eq!(plan.config, None);
        assert_eq!(plan.image.as_deref(), Some(Path::new("miller.png")));
        assert_eq!(plan.dataset, None);
        assert_eq!(plan.points, 50);
        assert!(plan.overrides.is_empty());
    }

    #[test]
    fn test_shaping_flags() {
        let args = parse(&["--delta", "0.42", "--kappa=1.1", "--A", "3", "--R0", "6.2"]);
        let o = args.overrides();
        assert_eq!(o.delta, Some(0.42));
        assert_eq!(o.kappa, Some(1.1));
        assert_eq!(o.aspect_ratio, Some(3.0));
        assert_eq!(o.r0, Some(6.2));
    }

    #[test]
    fn test_negative_triangularity() {
        let args = parse(&["--delta", "-0.3"]);
        assert_eq!(args.delta, Some(-0.3));
    }

    #[test]
    fn test_filename_sets_image() {
        let plan = parse(&["--filename", "test_output.png"]).plan().unwrap();
        assert_eq!(plan.image.as_deref(), Some(Path::new("test_output.png")));
        assert_eq!(plan.config, None);
    }

    #[test]
    fn test_config_typed_filename() {
        let plan = parse(&["--filename", "input.toml"]).plan().unwrap();
        assert_eq!(plan.config.as_deref(), Some(Path::new("input.toml")));
        assert_eq!(plan.image.as_deref(), Some(Path::new("miller.png")));

        let plan = parse(&["--filename", "cfg/Input.JSON"]).plan().unwrap();
        assert_eq!(plan.config.as_deref(), Some(Path::new("cfg/Input.JSON")));
    }

    #[test]
    fn test_input_with_image_filename() {
        let plan = parse(&["--input", "input.toml", "--filename", "shape.png"])
            .plan()
            .unwrap();
        assert_eq!(plan.config.as_deref(), Some(Path::new("input.toml")));
        assert_eq!(plan.image.as_deref(), Some(Path::new("shape.png")));
    }

    #[test]
    fn test_two_config_files_conflict() {
        let err = parse(&["--input", "a.toml", "--filename", "b.toml"])
            .plan()
            .unwrap_err();
        assert!(err.contains("a.toml") && err.contains("b.toml"), "{err}");
    }

    #[test]
    fn test_no_plot_with_output() {
        let plan = parse(&["--no-plot", "--output", "surface.nc"]).plan().unwrap();
        assert_eq!(plan.image, None);
        assert_eq!(plan.dataset.as_deref(), Some(Path::new("surface.nc")));
    }

    #[test]
    fn test_points_bounds() {
        assert_eq!(parse(&["--points", "200"]).points, 200);
        assert!(Args::try_parse_from(["miller", "--points", "1"]).is_err());
        assert!(Args::try_parse_from(["miller", "--points", "many"]).is_err());
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(Args::try_parse_from(["miller", "--delta", "tall"]).is_err());
        assert!(Args::try_parse_from(["miller", "--bogus"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        assert_eq!(parse(&[]).verbose, 0);
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn test_help_lists_options_heading() {
        let help = Args::command().render_help().to_string();
        assert!(help.contains("options:"), "{help}");
        assert!(help.contains("--kappa"));
    }
}
