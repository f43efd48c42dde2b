// crate modules
use crate::error::{Error, Result};
use crate::vector::Vector;

// ntransport modules
use ntransport_utils::f;

/// Region shapes that make up a scene
///
/// The set of shapes is closed, so containment is a `match` rather than a
/// virtual call. Shapes are generic over the dimension `D` and read naturally
/// in both 2D and 3D:
///
/// - [Volume::Slab] is bounded in x only, infinite in every other direction
/// - [Volume::Sphere] is centred on the origin (a circle in 2D)
/// - [Volume::Cuboid] is axis-aligned between two corners (a rectangle in 2D)
///
/// Always build volumes through [Volume::slab()], [Volume::sphere()] and
/// [Volume::cuboid()] so that degenerate shapes are caught immediately.
///
/// ```rust
/// # use ntransport_geometry::{Vector3, Volume};
/// let slab = Volume::<3>::slab(0.0, 10.0).unwrap();
/// assert!(slab.contains(&Vector3::new(5.0, 1e6, -1e6)));
/// assert!(!slab.contains(&Vector3::new(-0.1, 0.0, 0.0)));
///
/// // Inverted bounds are rejected
/// assert!(Volume::<3>::slab(10.0, 0.0).is_err());
/// ```
///
/// Boundaries are inclusive. A point exactly on the surface is inside.
#[derive(Debug, Clone, PartialEq)]
pub enum Volume<const D: usize> {
    /// Infinite slab between two planes of constant x
    Slab {
        /// Lower x bound
        x_min: f64,
        /// Upper x bound
        x_max: f64,
    },
    /// Origin centred sphere (circle in 2D)
    Sphere {
        /// Sphere radius
        radius: f64,
    },
    /// Axis-aligned box (rectangle in 2D)
    Cuboid {
        /// Corner with the lowest coordinates
        min: Vector<D>,
        /// Corner with the highest coordinates
        max: Vector<D>,
    },
}

impl<const D: usize> Volume<D> {
    /// Slab between `x_min` and `x_max`
    ///
    /// Bounds may be infinite, which gives a region that contains everything.
    pub fn slab(x_min: f64, x_max: f64) -> Result<Self> {
        let volume = Self::Slab { x_min, x_max };
        volume.validate()?;
        Ok(volume)
    }

    /// Origin centred sphere of the given radius
    pub fn sphere(radius: f64) -> Result<Self> {
        let volume = Self::Sphere { radius };
        volume.validate()?;
        Ok(volume)
    }

    /// Axis-aligned cuboid between the `min` and `max` corners
    ///
    /// ```rust
    /// # use ntransport_geometry::{Error, Vector3, Volume};
    /// let cuboid = Volume::cuboid(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
    /// assert!(cuboid.unwrap().contains(&Vector3::new(1.0, 0.0, -1.0)));
    ///
    /// // Corners the wrong way round along y
    /// let cuboid = Volume::cuboid(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 1.0));
    /// assert_eq!(cuboid, Err(Error::DegenerateCuboid { axis: 1, min: 1.0, max: 0.0 }));
    /// ```
    pub fn cuboid(min: Vector<D>, max: Vector<D>) -> Result<Self> {
        let volume = Self::Cuboid { min, max };
        volume.validate()?;
        Ok(volume)
    }

    /// Check the shape is not degenerate
    ///
    /// Called by every constructor. Engines call this again on borrowed
    /// volumes, since the variants can also be built directly.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Slab { x_min, x_max } => {
                // written to also catch NAN
                if !(x_min < x_max) {
                    return Err(Error::DegenerateSlab {
                        x_min: *x_min,
                        x_max: *x_max,
                    });
                }
            }
            Self::Sphere { radius } => {
                if !(*radius > 0.0) {
                    return Err(Error::NonPositiveRadius(*radius));
                }
            }
            Self::Cuboid { min, max } => {
                for (axis, (lo, hi)) in min.iter().zip(max.iter()).enumerate() {
                    if !(lo < hi) {
                        return Err(Error::DegenerateCuboid {
                            axis,
                            min: *lo,
                            max: *hi,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Point containment, inclusive of the boundary
    #[inline]
    pub fn contains(&self, point: &Vector<D>) -> bool {
        match self {
            Self::Slab { x_min, x_max } => *x_min <= point[0] && point[0] <= *x_max,
            Self::Sphere { radius } => point.norm() <= *radius,
            Self::Cuboid { min, max } => point
                .iter()
                .zip(min.iter().zip(max.iter()))
                .all(|(p, (lo, hi))| lo <= p && p <= hi),
        }
    }

    /// Short name of the shape for the given dimension
    ///
    /// ```rust
    /// # use ntransport_geometry::Volume;
    /// assert_eq!(Volume::<2>::sphere(1.0).unwrap().name(), "Circle");
    /// assert_eq!(Volume::<3>::sphere(1.0).unwrap().name(), "Sphere");
    /// ```
    pub fn name(&self) -> &'static str {
        match (self, D) {
            (Self::Slab { .. }, _) => "Slab",
            (Self::Sphere { .. }, 2) => "Circle",
            (Self::Sphere { .. }, _) => "Sphere",
            (Self::Cuboid { .. }, 2) => "Rectangle",
            (Self::Cuboid { .. }, _) => "Cuboid",
        }
    }
}

impl Volume<2> {
    /// Origin centred circle, the 2D reading of [Volume::Sphere]
    pub fn circle(radius: f64) -> Result<Self> {
        Self::sphere(radius)
    }

    /// Axis-aligned rectangle, the 2D reading of [Volume::Cuboid]
    pub fn rectangle(min: Vector<2>, max: Vector<2>) -> Result<Self> {
        Self::cuboid(min, max)
    }
}

impl<const D: usize> std::fmt::Display for Volume<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Slab { x_min, x_max } => f!("x = [{x_min}, {x_max}]"),
            Self::Sphere { radius } => f!("r = {radius}"),
            Self::Cuboid { min, max } => f!(
                "[{}] to [{}]",
                min.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "),
                max.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
            ),
        };
        write!(f, "{} {}", self.name(), s)
    }
}
