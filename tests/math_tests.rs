use phys_oscillator::math::{Vector2, Transform, lerp, approx_eq};
use std::f32::consts::{PI, FRAC_PI_2};
use approx::assert_relative_eq;

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, 5.0);

    // Addition and subtraction
    assert_eq!(v1 + v2, Vector2::new(5.0, 7.0));
    assert_eq!(v2 - v1, Vector2::new(3.0, 3.0));

    // Scalar multiplication, both sides
    assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(2.0 * v1, Vector2::new(2.0, 4.0));
    assert_eq!(-v1, Vector2::new(-1.0, -2.0));

    // Dot and planar cross product
    assert_eq!(v1.dot(&v2), 14.0);
    assert_eq!(v1.cross(&v2), 1.0 * 5.0 - 2.0 * 4.0);

    // Length
    assert_relative_eq!(Vector2::new(3.0, 4.0).length(), 5.0);
    assert_relative_eq!(v1.normalize().length(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_vector2_rotation() {
    let v = Vector2::unit_x();

    let quarter = v.rotated(FRAC_PI_2);
    assert_relative_eq!(quarter.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(quarter.y, 1.0, epsilon = 1e-6);

    // The perpendicular is a counter-clockwise quarter turn
    assert_eq!(v.perpendicular(), Vector2::unit_y());

    let half = Vector2::new(-0.4, 0.0).rotated(PI);
    assert_relative_eq!(half.x, 0.4, epsilon = 1e-6);
    assert_relative_eq!(half.y, 0.0, epsilon = 1e-6);
}

#[test]
fn test_vector2_nalgebra_interop() {
    let v = Vector2::new(1.5, -2.5);
    let na = v.to_nalgebra();
    assert_eq!(Vector2::from_nalgebra(&na), v);
}

#[test]
fn test_transform_points() {
    let t = Transform::new(Vector2::new(2.0, 1.0), FRAC_PI_2);

    // Local +x maps to world +y around the transform's origin
    let p = t.transform_point(Vector2::new(1.0, 0.0));
    assert_relative_eq!(p.x, 2.0, epsilon = 1e-6);
    assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);

    // Directions ignore translation
    let d = t.transform_vector(Vector2::new(1.0, 0.0));
    assert_relative_eq!(d.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(d.y, 1.0, epsilon = 1e-6);

    let back = t.inverse_transform_point(p);
    assert_relative_eq!(back.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(back.y, 0.0, epsilon = 1e-6);

    assert_eq!(Transform::default(), Transform::identity());
}

#[test]
fn test_scalar_helpers() {
    assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    assert!(approx_eq(0.1 + 0.2, 0.3));
    assert!(!approx_eq(1.0, 1.001));
}
