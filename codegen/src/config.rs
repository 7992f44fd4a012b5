//! Generator configuration.
//!
//! Both generators are configured once per run. Defaults reproduce the
//! reference output; a TOML file can override any subset of fields.

use pffrg_algebra::model::{IDENTITY, RANK};
use pffrg_algebra::symmetry::Z;
use pffrg_algebra::Symmetry;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// How vertex operands are written in flow-equation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandStyle {
    /// Abstract symbols such as `Ch1A1_01`.
    #[default]
    Abstract,
    /// Fully expanded `getIntpolG(...)` interpolation calls.
    Interpolated,
}

/// Flow-equation generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    /// Model symmetry restrictions.
    pub symmetry: Symmetry,
    /// Operand notation.
    pub style: OperandStyle,
    /// Emit two-loop vertex terms.
    pub two_loop: bool,
    /// Sublattice selector for the RPA vertex-product offset (0, 1 or 2).
    pub sublattice: u8,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            symmetry: Symmetry::NONE,
            style: OperandStyle::Abstract,
            two_loop: false,
            sublattice: 1,
        }
    }
}

impl FlowConfig {
    /// Parses a TOML document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the document does not parse or
    /// the resulting configuration fails [`validate`](Self::validate).
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GenerationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the sublattice is not 0, 1 or 2.
    pub fn validate(&self) -> Result<()> {
        if self.sublattice > 2 {
            return Err(GenerationError::Config(format!(
                "sublattice must be 0, 1 or 2, got {}",
                self.sublattice
            )));
        }
        Ok(())
    }
}

/// Spin-correlation generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpinConfig {
    /// Model symmetry restrictions.
    pub symmetry: Symmetry,
    /// Abstract propagator symbols instead of expanded interpolation calls.
    pub simplified: bool,
    /// Row of the correlation matrix element.
    pub mu: usize,
    /// Column of the correlation matrix element.
    pub nu: usize,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            symmetry: Symmetry::FULL,
            simplified: true,
            mu: 2,
            nu: 1,
        }
    }
}

impl SpinConfig {
    /// Parses a TOML document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the document does not parse or
    /// the resulting configuration fails [`validate`](Self::validate).
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GenerationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if `mu` or `nu` is outside `[0,4)`,
    /// or if expanded terms are requested while the symmetry admits the x or
    /// y component. `iGLam` only knows the identity and z components.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("mu", self.mu), ("nu", self.nu)] {
            if value >= RANK {
                return Err(GenerationError::Config(format!(
                    "{name} must be in [0,{RANK}), got {value}"
                )));
            }
        }
        if !self.simplified {
            let components = self.symmetry.components();
            if let Some(c) = components.iter().find(|&&c| c != IDENTITY && c != Z) {
                return Err(GenerationError::Config(format!(
                    "expanded spin terms need the reduced-rotation or time-reversal \
                     restriction: component {c} has no iGLam index"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flow_defaults() {
        let c = FlowConfig::default();
        assert_eq!(c.symmetry, Symmetry::NONE);
        assert_eq!(c.style, OperandStyle::Abstract);
        assert!(!c.two_loop);
        assert_eq!(c.sublattice, 1);
    }

    #[test]
    fn spin_defaults() {
        let c = SpinConfig::default();
        assert_eq!(c.symmetry, Symmetry::FULL);
        assert!(c.simplified);
        assert_eq!((c.mu, c.nu), (2, 1));
    }

    #[test]
    fn flow_from_partial_toml() {
        let c = FlowConfig::from_toml(
            r#"
            style = "interpolated"
            sublattice = 2

            [symmetry]
            reduced_rotation = true
            "#,
        )
        .unwrap();
        assert_eq!(c.style, OperandStyle::Interpolated);
        assert_eq!(c.sublattice, 2);
        assert!(c.symmetry.reduced_rotation);
        assert!(!c.symmetry.time_reversal);
        assert!(!c.two_loop);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(FlowConfig::from_toml("").unwrap(), FlowConfig::default());
        assert_eq!(SpinConfig::from_toml("").unwrap(), SpinConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            FlowConfig::from_toml("sublattice = 3"),
            Err(GenerationError::Config(_))
        ));
        assert!(matches!(
            SpinConfig::from_toml("mu = 4"),
            Err(GenerationError::Config(_))
        ));
        assert!(matches!(
            FlowConfig::from_toml("unknown = 1"),
            Err(GenerationError::Config(_))
        ));
    }

    #[test]
    fn expanded_spin_needs_a_restriction() {
        let unrestricted = SpinConfig {
            symmetry: Symmetry::NONE,
            simplified: false,
            ..SpinConfig::default()
        };
        assert!(matches!(unrestricted.validate(), Err(GenerationError::Config(_))));

        for symmetry in [
            Symmetry::FULL,
            Symmetry {
                reduced_rotation: true,
                time_reversal: false,
            },
            Symmetry {
                reduced_rotation: false,
                time_reversal: true,
            },
        ] {
            let config = SpinConfig {
                symmetry,
                simplified: false,
                ..SpinConfig::default()
            };
            assert!(config.validate().is_ok(), "{symmetry:?}");
        }

        let simplified = SpinConfig {
            symmetry: Symmetry::NONE,
            ..SpinConfig::default()
        };
        assert!(simplified.validate().is_ok());
    }
}
