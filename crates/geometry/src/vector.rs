//! Position and direction vectors

/// Point or direction in `D` dimensional space
///
/// A plain value type. Addition, scalar multiplication, component-wise
/// multiplication and magnitude all come from `nalgebra`.
///
/// ```rust
/// # use ntransport_geometry::Vector3;
/// let position = Vector3::new(1.0, 2.0, 2.0);
/// let direction = Vector3::new(0.0, 0.0, 1.0);
///
/// assert_eq!(position + direction * 2.0, Vector3::new(1.0, 2.0, 4.0));
/// assert_eq!(position.component_mul(&position), Vector3::new(1.0, 4.0, 4.0));
/// assert_eq!(position.norm(), 3.0);
/// ```
pub type Vector<const D: usize> = nalgebra::SVector<f64, D>;

/// Position or direction in the plane
pub type Vector2 = Vector<2>;

/// Position or direction in space
pub type Vector3 = Vector<3>;

/// Unit vector along the first (x) axis
///
/// Source neutrons are born travelling along this axis.
///
/// ```rust
/// # use ntransport_geometry::{reference_axis, Vector2, Vector3};
/// assert_eq!(reference_axis::<2>(), Vector2::new(1.0, 0.0));
/// assert_eq!(reference_axis::<3>(), Vector3::new(1.0, 0.0, 0.0));
/// ```
pub fn reference_axis<const D: usize>() -> Vector<D> {
    let mut axis = Vector::<D>::zeros();
    axis[0] = 1.0;
    axis
}
