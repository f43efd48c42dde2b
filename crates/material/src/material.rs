//! Material definitions and presets

// crate modules
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// Named material variants
///
/// Used for reporting and to look up presets by name. Anything built from
/// user supplied values is [MaterialKind::Custom].
///
/// ```rust
/// # use ntransport_material::MaterialKind;
/// assert_eq!(MaterialKind::try_from("H2O").unwrap(), MaterialKind::Water);
/// assert_eq!(MaterialKind::try_from("pb").unwrap(), MaterialKind::Lead);
/// assert!(MaterialKind::try_from("unobtainium").is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Empty space, never collides
    Vacuum,
    /// Light water
    Water,
    /// Natural lead
    Lead,
    /// Reactor grade graphite
    Graphite,
    /// User defined properties
    #[default]
    Custom,
}

impl MaterialKind {
    /// Preset [Material] for named kinds, `None` for [MaterialKind::Custom]
    pub fn preset(&self) -> Option<Material> {
        match self {
            Self::Vacuum => Some(Material::vacuum()),
            Self::Water => Some(Material::water()),
            Self::Lead => Some(Material::lead()),
            Self::Graphite => Some(Material::graphite()),
            Self::Custom => None,
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Vacuum => "Vacuum",
            Self::Water => "Water",
            Self::Lead => "Lead",
            Self::Graphite => "Graphite",
            Self::Custom => "Custom",
        };
        write!(f, "{s}")
    }
}

/// Convert from a name or chemical symbol, insensitive to case
impl TryFrom<&str> for MaterialKind {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vacuum" | "void" => Ok(Self::Vacuum),
            "water" | "h2o" => Ok(Self::Water),
            "lead" | "pb" => Ok(Self::Lead),
            "graphite" | "c" => Ok(Self::Graphite),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::FailedToInferMaterial(s.to_string())),
        }
    }
}

impl std::str::FromStr for MaterialKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

/// Homogeneous material seen by a neutron
///
/// Defined by a macroscopic cross-section and the probability that any given
/// collision is an absorption. The mean free path is always derived as
/// `1/cross_section`, so the two can never disagree.
///
/// Fields are private and validated on construction, so a [Material] is
/// immutable and always safe to sample against.
///
/// ```rust
/// # use ntransport_material::{Material, MaterialKind};
/// let water = Material::water();
/// assert_eq!(water.cross_section(), 3.47);
/// assert_eq!(water.mean_free_path(), 1.0 / 3.47);
///
/// // Custom materials are checked
/// let thin = Material::new(0.00642, 0.00642).unwrap();
/// assert_eq!(thin.kind(), MaterialKind::Custom);
/// assert!(Material::new(-1.0, 0.5).is_err());
/// assert!(Material::new(1.0, 1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    kind: MaterialKind,
    cross_section: f64,
    absorption_probability: f64,
}

impl Material {
    /// Custom material from a cross-section (cm⁻¹) and absorption probability
    pub fn new(cross_section: f64, absorption_probability: f64) -> Result<Self> {
        Self::with_kind(MaterialKind::Custom, cross_section, absorption_probability)
    }

    /// Material of any non-vacuum kind with explicit properties
    ///
    /// Useful for variations on the presets, e.g. water at reduced density.
    pub fn with_kind(
        kind: MaterialKind,
        cross_section: f64,
        absorption_probability: f64,
    ) -> Result<Self> {
        if kind == MaterialKind::Vacuum {
            return Err(Error::PropertiesForVacuum);
        }

        if !cross_section.is_finite() || cross_section <= 0.0 {
            return Err(Error::InvalidCrossSection {
                kind,
                value: cross_section,
            });
        }

        // written to also catch NAN
        if !(absorption_probability > 0.0 && absorption_probability <= 1.0) {
            return Err(Error::InvalidAbsorptionProbability {
                kind,
                value: absorption_probability,
            });
        }

        Ok(Self {
            kind,
            cross_section,
            absorption_probability,
        })
    }

    /// Empty space, with zero cross-section and infinite mean free path
    pub const fn vacuum() -> Self {
        Self {
            kind: MaterialKind::Vacuum,
            cross_section: 0.0,
            absorption_probability: 0.0,
        }
    }

    /// Light water, Σ = 3.47 cm⁻¹, 0.642% absorption
    pub const fn water() -> Self {
        Self {
            kind: MaterialKind::Water,
            cross_section: 3.47,
            absorption_probability: 0.00642,
        }
    }

    /// Lead, Σ = 0.38 cm⁻¹, 1.389% absorption
    pub const fn lead() -> Self {
        Self {
            kind: MaterialKind::Lead,
            cross_section: 0.38,
            absorption_probability: 0.01389,
        }
    }

    /// Graphite, Σ = 0.40 cm⁻¹, 0.095% absorption
    pub const fn graphite() -> Self {
        Self {
            kind: MaterialKind::Graphite,
            cross_section: 0.40,
            absorption_probability: 0.00095,
        }
    }

    /// Macroscopic cross-section (cm⁻¹)
    #[inline]
    pub fn cross_section(&self) -> f64 {
        self.cross_section
    }

    /// Probability that a collision absorbs the neutron
    #[inline]
    pub fn absorption_probability(&self) -> f64 {
        self.absorption_probability
    }

    /// Mean distance between collisions (cm), infinite for vacuum
    #[inline]
    pub fn mean_free_path(&self) -> f64 {
        1.0 / self.cross_section
    }

    /// Named variant of the material
    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// True for the vacuum sentinel
    pub fn is_vacuum(&self) -> bool {
        self.kind == MaterialKind::Vacuum
    }
}

impl TryFrom<MaterialKind> for Material {
    type Error = Error;

    fn try_from(kind: MaterialKind) -> Result<Self> {
        kind.preset()
            .ok_or(Error::NoPreset(kind))
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} (sigma = {} /cm, p_abs = {})",
            self.kind, self.cross_section, self.absorption_probability
        )
    }
}
