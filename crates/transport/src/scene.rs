//! Regions and the majorant cross-section for delta-tracking

// crate modules
use crate::error::{Error, Result};

// ntransport modules
use ntransport_geometry::{Vector, Volume};
use ntransport_material::Material;
use ntransport_utils::SliceExt;

// external crates
use log::debug;

/// A borrowed volume filled with a material
#[derive(Debug, Clone, Copy)]
pub struct Region<'a, const D: usize> {
    /// Shape of the region, owned by the caller
    pub volume: &'a Volume<D>,
    /// Material filling the region
    pub material: Material,
}

/// Ordered set of regions with a common majorant cross-section
///
/// Regions are searched in the order given, so where volumes overlap the
/// first one listed wins. The majorant is the largest cross-section of any
/// region and sets the rate at which tentative collisions are sampled
/// everywhere in the scene.
///
/// ```rust
/// # use ntransport_geometry::{Vector2, Volume};
/// # use ntransport_material::Material;
/// # use ntransport_transport::Scene;
/// let circle = Volume::<2>::circle(2.5).unwrap();
/// let slab = Volume::<2>::slab(-10.0, 0.0).unwrap();
///
/// let scene = Scene::new(&[Material::lead(), Material::graphite()], &[&circle, &slab]).unwrap();
/// assert_eq!(scene.majorant(), 0.40);
///
/// // the circle is listed first, so it owns the overlap
/// let region = scene.locate(&Vector2::new(-1.0, 0.0)).unwrap();
/// assert_eq!(region.material, Material::lead());
///
/// assert!(scene.locate(&Vector2::new(3.0, 0.0)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Scene<'a, const D: usize> {
    regions: Vec<Region<'a, D>>,
    majorant: f64,
    min_mean_free_path: f64,
}

impl<'a, const D: usize> Scene<'a, D> {
    /// Pair `materials[i]` with `volumes[i]`
    ///
    /// Fails if the lists differ in length, are empty, contain a degenerate
    /// volume, or hold nothing but vacuum.
    pub fn new(materials: &[Material], volumes: &[&'a Volume<D>]) -> Result<Self> {
        if materials.len() != volumes.len() {
            return Err(Error::MismatchedScene {
                materials: materials.len(),
                volumes: volumes.len(),
            });
        }
        if materials.is_empty() {
            return Err(Error::EmptyScene);
        }
        for volume in volumes {
            volume.validate()?;
        }

        let cross_sections = materials
            .iter()
            .map(Material::cross_section)
            .collect::<Vec<f64>>();
        let majorant = cross_sections.try_max()?;
        if majorant <= 0.0 {
            return Err(Error::NoCollidingMaterial);
        }

        let regions = materials
            .iter()
            .zip(volumes)
            .map(|(material, volume)| Region {
                volume: *volume,
                material: *material,
            })
            .collect::<Vec<_>>();

        debug!(
            "Scene of {} regions, majorant {majorant} (mfp {})",
            regions.len(),
            1.0 / majorant
        );

        Ok(Self {
            regions,
            majorant,
            min_mean_free_path: 1.0 / majorant,
        })
    }

    /// First region containing `position`, if any
    #[inline]
    pub fn locate(&self, position: &Vector<D>) -> Option<&Region<'a, D>> {
        self.regions.iter().find(|r| r.volume.contains(position))
    }

    /// Chance that a tentative collision in `region` is real
    ///
    /// Equal to `1 / (majorant * mean free path)`, i.e. the ratio of the
    /// region cross-section to the majorant. Zero for vacuum.
    #[inline]
    pub fn real_collision_probability(&self, region: &Region<D>) -> f64 {
        region.material.cross_section() / self.majorant
    }

    /// Largest cross-section in the scene
    pub fn majorant(&self) -> f64 {
        self.majorant
    }

    /// Mean free path at the majorant cross-section
    pub fn min_mean_free_path(&self) -> f64 {
        self.min_mean_free_path
    }

    /// Regions in priority order
    pub fn regions(&self) -> &[Region<'a, D>] {
        &self.regions
    }
}
