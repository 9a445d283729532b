use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::periodic_table::ElementType;

use super::{SurfaceError, SurfaceSampler};

/// Van der Waals surface sampled on golden-spiral spheres.
///
/// Every atom contributes points on a sphere of `scale_factor` times its van
/// der Waals radius; points buried inside another atom's scaled sphere are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VdwSurface {
    /// multiplier applied to every van der Waals radius
    pub scale_factor: f64,
    /// points per square Ångström of sphere area
    pub density: f64,
}

impl Default for VdwSurface {
    fn default() -> Self {
        Self {
            scale_factor: 1.4,
            density: 1.0,
        }
    }
}

impl VdwSurface {
    fn validate(&self) -> Result<(), SurfaceError> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(SurfaceError::InvalidParameter(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(SurfaceError::InvalidParameter(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        Ok(())
    }
}

impl SurfaceSampler for VdwSurface {
    fn surface_points(
        &self,
        positions: &[Vector3<f64>],
        elements: &[ElementType],
    ) -> Result<Vec<Vector3<f64>>, SurfaceError> {
        self.validate()?;
        if positions.len() != elements.len() {
            return Err(SurfaceError::LengthMismatch {
                positions: positions.len(),
                elements: elements.len(),
            });
        }

        let radii = elements
            .iter()
            .map(|&element| {
                element
                    .vdw_radius()
                    .map(|radius| radius * self.scale_factor)
                    .ok_or(SurfaceError::MissingRadius(element))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut points = Vec::new();
        for (i, (center, &radius)) in positions.iter().zip(&radii).enumerate() {
            let n_points = (4.0 * PI * radius.powi(2) * self.density).ceil().max(1.0) as usize;

            let exposed = golden_spiral(n_points)
                .map(|direction| center + direction * radius)
                .filter(|point| {
                    positions
                        .iter()
                        .zip(&radii)
                        .enumerate()
                        .all(|(j, (other, &other_radius))| {
                            i == j || (point - other).norm_squared() >= other_radius.powi(2)
                        })
                });
            points.extend(exposed);
        }

        log::debug!(
            "sampled {} surface points around {} atoms",
            points.len(),
            positions.len()
        );
        Ok(points)
    }
}

/// `n` roughly evenly spaced unit vectors on a golden-angle spiral
fn golden_spiral(n: usize) -> impl Iterator<Item = Vector3<f64>> {
    let increment = PI * (3.0 - 5f64.sqrt());
    let offset = 2.0 / n as f64;

    (0..n).map(move |k| {
        let y = k as f64 * offset - 1.0 + offset / 2.0;
        let r = (1.0 - y * y).sqrt();
        let phi = k as f64 * increment;
        Vector3::new(phi.cos() * r, y, phi.sin() * r)
    })
}
