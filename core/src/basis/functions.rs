use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Function of the form K*x^i*y^j*z^k*exp(-alpha*r^2)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub exponent: f64,
    /// The contraction coefficient of this gaussian, including the normalization constant
    pub coefficient: f64,
    /// (i, j, k) exponents of polynomial terms
    pub angular: (i32, i32, i32),
}

impl Gaussian {
    /// Normalization constant of a Cartesian primitive
    pub fn norm(exponent: f64, angular: (i32, i32, i32)) -> f64 {
        let (i, j, k) = angular;

        (std::f64::consts::FRAC_2_PI * exponent)
            .powi(3)
            .sqrt()
            .sqrt()
            * f64::sqrt(
                (8.0 * exponent).powi(i + j + k)
                    / ((i + 1..=2 * i).product::<i32>()
                        * (j + 1..=2 * j).product::<i32>()
                        * (k + 1..=2 * k).product::<i32>()) as f64,
            )
    }

    /// Value of this primitive at displacement `d` from its center.
    #[inline(always)]
    pub fn evaluate(&self, d: &Vector3<f64>) -> f64 {
        let (i, j, k) = self.angular;

        self.coefficient
            * d.x.powi(i)
            * d.y.powi(j)
            * d.z.powi(k)
            * (-self.exponent * d.norm_squared()).exp()
    }
}

/// Linear combination of many [`Gaussian`]s
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractedGaussian(pub SmallVec<[Gaussian; 6]>);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisFunction {
    /// The contracted gaussian making up this basis function
    pub contracted_gaussian: ContractedGaussian,
    /// The position of this basis function, in Bohr
    pub position: Vector3<f64>,
}

impl BasisFunction {
    /// Evaluate this basis function at a given position (Bohr)
    pub fn evaluate(&self, at: Vector3<f64>) -> f64 {
        let d = at - self.position;
        let ContractedGaussian(primitives) = &self.contracted_gaussian;

        primitives.iter().map(|primitive| primitive.evaluate(&d)).sum()
    }
}
