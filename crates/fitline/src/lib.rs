#![forbid(unsafe_code)]

//! fitline public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude for hosts embedding the fitting engine.
//!
//! # Example
//! ```
//! use fitline::prelude::*;
//!
//! let config = fitline::load_config()?;
//! let mut oracle = MonospaceOracle::new(1.0);
//! let request = LayoutRequest::new("Chlorine gas", 48.0, FontSizeBounds::new(3.0, 8.0)?)
//!     .max_lines(2);
//!
//! let outcome = ShrinkSearch::with_config(&config)
//!     .find_fitting_font_size(&mut oracle, &request)
//!     .expect("monospace oracle always measures");
//! assert!(outcome.fits);
//! # Ok::<(), fitline::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use fitline_core::{ConfigError, ConfigParse, FitConfig};

// --- Text re-exports -------------------------------------------------------

pub use fitline_text::{
    BreakStrategy, CachedOracle, FitSession, FontSizeBounds, LayoutError, LayoutRequest,
    LineAssignment, LineMode, MeasurementOracle, MonospaceOracle, RenderPlan, RewrapEngine,
    RewrapPhase, ShrinkOutcome, ShrinkSearch, SingleLineFit, StableReason,
    find_fitting_font_size,
};

// --- Layout re-exports -----------------------------------------------------

pub use fitline_layout::{Item, Slot, SlotDirection, SlotRows, allocate};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for fitline hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// One or more configuration values were rejected.
    Config(Vec<ConfigError>),
    /// A layout request was built from invalid inputs.
    Layout(LayoutError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                f.write_str("invalid fitline configuration:")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(errors) => errors
                .first()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(vec![err])
    }
}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// Standard result type for fitline APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Read [`FitConfig`] from the environment, failing on any rejected value.
///
/// Use [`FitConfig::from_env`] instead to fall back to defaults silently.
pub fn load_config() -> Result<FitConfig> {
    config_from_parse(FitConfig::from_env_with_diagnostics())
}

fn config_from_parse(parse: ConfigParse) -> Result<FitConfig> {
    if !parse.errors.is_empty() {
        return Err(Error::Config(parse.errors));
    }
    parse.config.validate()?;
    Ok(parse.config)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BreakStrategy, Error, FitConfig, FitSession, FontSizeBounds, LayoutRequest,
        LineAssignment, LineMode, MeasurementOracle, MonospaceOracle, RenderPlan, Result,
        ShrinkSearch, SlotDirection, SlotRows,
    };

    pub use crate::{core, layout, text};
}

pub use fitline_core as core;
pub use fitline_layout as layout;
pub use fitline_text as text;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_parse_yields_config() {
        let parse = ConfigParse {
            config: FitConfig::default(),
            errors: Vec::new(),
        };
        assert_eq!(config_from_parse(parse), Ok(FitConfig::default()));
    }

    #[test]
    fn diagnostics_become_errors() {
        let err = ConfigError {
            field: "shrink_step",
            value: "-1".into(),
            message: "expected positive number".into(),
        };
        let parse = ConfigParse {
            config: FitConfig::default(),
            errors: vec![err.clone()],
        };
        assert_eq!(config_from_parse(parse), Err(Error::Config(vec![err])));
    }

    #[test]
    fn layout_errors_convert() {
        let err: Error = FontSizeBounds::new(12.0, 8.0).unwrap_err().into();
        assert!(matches!(err, Error::Layout(LayoutError::InvalidFontBounds { .. })));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_error_display_lists_fields() {
        let err = Error::from(vec![
            ConfigError {
                field: "fit_epsilon",
                value: "x".into(),
                message: "expected non-negative number".into(),
            },
            ConfigError {
                field: "shrink_step",
                value: "0".into(),
                message: "expected positive number".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("fit_epsilon=x"));
        assert!(text.contains("shrink_step=0"));
    }
}
