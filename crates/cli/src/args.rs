//! Command line arguments

// ntransport modules
use ntransport_material::{Material, MaterialKind};
use ntransport_sampling::LogMode;
use ntransport_transport::{LogTracer, TransportConfig, DEFAULT_MAX_STEPS};

// external crates
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Batch engine on a 1D slab starting at x = 0
    Slab {
        /// Slab width (cm)
        #[arg(short, long, default_value_t = 10.0)]
        width: f64,

        #[command(flatten)]
        material: MaterialArgs,
    },

    /// Single-region engine on one volume around the origin
    Volume {
        /// Shape of the region
        #[arg(short, long, value_enum, default_value_t = Shape::Slab)]
        shape: Shape,

        /// Slab width from x = 0, sphere radius, or cuboid half-width (cm)
        #[arg(long, default_value_t = 10.0)]
        size: f64,

        /// Number of spatial dimensions
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
        dim: u8,

        #[command(flatten)]
        material: MaterialArgs,
    },

    /// Woodcock delta-tracking through two abutting slabs
    Woodcock {
        #[command(flatten)]
        slabs: SlabMaterials,

        /// Position of the interface between the slabs (cm)
        #[arg(long, default_value_t = 5.0)]
        split: f64,

        /// Far face of the second slab (cm)
        #[arg(short, long, default_value_t = 10.0)]
        width: f64,

        /// Number of spatial dimensions
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
        dim: u8,
    },

    /// Step the incremental engine through the 2D demo scene frame by frame
    ///
    /// The scene is a lead circle (r = 2.5) at the origin, a graphite slab
    /// over x = [-10, 0] and a water slab over x = [5, 10].
    Animate {
        /// Stop after this many frames, even if neutrons are still alive
        #[arg(long)]
        frames: Option<u64>,

        /// Print every n-th frame
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,

        /// Start neutrons in random directions rather than along +x
        #[arg(long)]
        isotropic: bool,
    },

    /// Run the benchmark sequence of every engine
    Demo,
}

/// Options shared by every engine
#[derive(Args)]
pub struct RunArgs {
    /// Number of neutron histories
    #[arg(short = 'n', long, default_value_t = 100_000, global = true)]
    pub particles: u64,

    /// Fix the random seed for a reproducible run
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Use the fast approximate logarithm for free flights
    #[arg(long, global = true)]
    pub fast_log: bool,

    /// Maximum number of flights per history
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STEPS, global = true)]
    pub max_steps: u64,

    /// Let histories run for as long as they take
    #[arg(long, global = true, conflicts_with = "max_steps")]
    pub no_step_limit: bool,

    /// Run on the calling thread only
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Show progress bars
    #[arg(short, long, global = true)]
    pub progress: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every particle event (needs -vv to be seen)
    #[arg(long, global = true)]
    pub trace: bool,
}

impl RunArgs {
    /// Engine configuration from the command line
    pub fn config(&self) -> TransportConfig {
        let log_mode = match self.fast_log {
            true => LogMode::Fast,
            false => LogMode::Exact,
        };

        let max_steps = match self.no_step_limit {
            true => None,
            false => Some(self.max_steps),
        };

        let mut config = TransportConfig::new()
            .with_log_mode(log_mode)
            .with_max_steps(max_steps)
            .with_progress(self.progress);

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.sequential {
            config = config.sequential();
        }
        if self.trace {
            config = config.with_tracer(LogTracer);
        }
        config
    }
}

/// Material by preset name, optionally with properties overridden
#[derive(Args)]
pub struct MaterialArgs {
    /// Material preset (water, lead, graphite, custom)
    #[arg(short, long, default_value = "water")]
    pub material: MaterialKind,

    /// Macroscopic cross-section (cm⁻¹), overrides the preset
    #[arg(long)]
    pub cross_section: Option<f64>,

    /// Absorption probability per collision, overrides the preset
    #[arg(long)]
    pub absorption: Option<f64>,
}

impl MaterialArgs {
    /// Build the material, checking any custom values
    pub fn material(&self) -> Result<Material> {
        let preset = self.material.preset();

        let (cross_section, absorption) = match (preset, self.cross_section, self.absorption) {
            (None, None, _) | (None, _, None) => {
                bail!(
                    "{} materials need both a cross-section and an absorption probability",
                    self.material
                )
            }
            (Some(m), None, None) => return Ok(m),
            (Some(m), cs, p) => (
                cs.unwrap_or(m.cross_section()),
                p.unwrap_or(m.absorption_probability()),
            ),
            (None, Some(cs), Some(p)) => (cs, p),
        };

        Material::with_kind(self.material, cross_section, absorption)
            .with_context(|| format!("invalid {} material", self.material))
    }
}

/// Materials for the two Woodcock slabs, each a preset with optional overrides
#[derive(Args)]
pub struct SlabMaterials {
    /// Material of the slab nearest the source
    #[arg(long, default_value = "graphite")]
    pub first: MaterialKind,

    /// Cross-section of the near slab (cm⁻¹), overrides the preset
    #[arg(long)]
    pub first_cross_section: Option<f64>,

    /// Absorption probability of the near slab, overrides the preset
    #[arg(long)]
    pub first_absorption: Option<f64>,

    /// Material of the far slab
    #[arg(long, default_value = "graphite")]
    pub second: MaterialKind,

    /// Cross-section of the far slab (cm⁻¹), overrides the preset
    #[arg(long)]
    pub second_cross_section: Option<f64>,

    /// Absorption probability of the far slab, overrides the preset
    #[arg(long)]
    pub second_absorption: Option<f64>,
}

impl SlabMaterials {
    /// Near and far materials, built the same way as [MaterialArgs]
    pub fn materials(&self) -> Result<(Material, Material)> {
        let first = MaterialArgs {
            material: self.first,
            cross_section: self.first_cross_section,
            absorption: self.first_absorption,
        };
        let second = MaterialArgs {
            material: self.second,
            cross_section: self.second_cross_section,
            absorption: self.second_absorption,
        };

        Ok((
            first.material().context("near slab")?,
            second.material().context("far slab")?,
        ))
    }
}

/// Region shapes for the single-region engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Slab over x = [0, size]
    Slab,
    /// Sphere (circle in 2D) of radius `size`
    Sphere,
    /// Cube (square in 2D) of half-width `size`
    Cuboid,
}
