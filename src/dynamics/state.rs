use nalgebra::{SVector, Vector3};

// ---------------------------------------------------------------------------
// Integration variable shared by every flight model
// ---------------------------------------------------------------------------

/// Fixed set of named scalar fields, stored contiguously.
///
/// Each model fixes `N` and the meaning of each slot (see the `fields`
/// modules of the models). The derivative of a state has the same shape: one
/// rate per field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicalState<const N: usize> {
    pub values: SVector<f64, N>,
}

impl<const N: usize> DynamicalState<N> {
    pub fn new(values: [f64; N]) -> Self {
        Self { values: SVector::from(values) }
    }

    pub fn zeros() -> Self {
        Self { values: SVector::zeros() }
    }

    pub fn get(&self, field: usize) -> f64 {
        self.values[field]
    }

    pub fn set(&mut self, field: usize, value: f64) {
        self.values[field] = value;
    }

    /// Three consecutive fields starting at `first`, as a vector.
    pub fn vector3(&self, first: usize) -> Vector3<f64> {
        self.values.fixed_rows::<3>(first).into_owned()
    }

    pub fn set_vector3(&mut self, first: usize, v: &Vector3<f64>) {
        self.values.fixed_rows_mut::<3>(first).copy_from(v);
    }
}

/// What the integrator needs from a state: scaled addition of a rate, and
/// straight-line blending for event interpolation.
pub trait StateVector: Copy + std::fmt::Debug {
    /// `self + rate * dt`, every field.
    fn apply(&self, rate: &Self, dt: f64) -> Self;

    /// `self + (other - self) * f`, every field.
    fn lerp(&self, other: &Self, f: f64) -> Self;

    fn is_finite(&self) -> bool;
}

impl<const N: usize> StateVector for DynamicalState<N> {
    fn apply(&self, rate: &Self, dt: f64) -> Self {
        Self { values: self.values + rate.values * dt }
    }

    fn lerp(&self, other: &Self, f: f64) -> Self {
        Self { values: self.values.lerp(&other.values, f) }
    }

    fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
