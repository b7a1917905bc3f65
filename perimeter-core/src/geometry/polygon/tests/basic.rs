use super::super::*;
use test_log::test;

fn triangle() -> Polygon {
    Polygon::new(vec![
        R2 { x: 0., y: 0. },
        R2 { x: 1., y: 0. },
        R2 { x: 0.5, y: 1. },
    ])
}

fn square() -> Polygon {
    Polygon::new(vec![
        R2 { x: 0., y: 0. },
        R2 { x: 1., y: 0. },
        R2 { x: 1., y: 1. },
        R2 { x: 0., y: 1. },
    ])
}

/// L-shape: 4 wide, 3 tall, with a 2×1 bite out of the top-right corner
fn ell() -> Polygon {
    Polygon::new(vec![
        R2 { x: 0., y: 0. },
        R2 { x: 4., y: 0. },
        R2 { x: 4., y: 2. },
        R2 { x: 2., y: 2. },
        R2 { x: 2., y: 3. },
        R2 { x: 0., y: 3. },
    ])
}

#[test]
fn test_areas() {
    assert_relative_eq!(triangle().area(), 0.5, epsilon = 1e-10);
    assert_relative_eq!(square().area(), 1.0, epsilon = 1e-10);
    assert_relative_eq!(ell().area(), 10.0, epsilon = 1e-10);
    // Clockwise winding gives the same unsigned area
    let mut cw = square();
    cw.vertices.reverse();
    assert!(cw.signed_area() < 0.);
    assert_relative_eq!(cw.area(), 1.0, epsilon = 1e-10);
}

#[test]
fn test_contains() {
    let s = square();
    assert!(s.contains(&R2 { x: 0.5, y: 0.5 }));
    assert!(!s.contains(&R2 { x: 1.5, y: 0.5 }));
    assert!(!s.contains(&R2 { x: 0.5, y: -0.1 }));

    // The bitten-out corner of the L is outside
    let l = ell();
    assert!(l.contains(&R2 { x: 1., y: 2.5 }));
    assert!(!l.contains(&R2 { x: 3., y: 2.5 }));
}

#[test]
fn test_center_and_centroid() {
    assert_relative_eq!(square().center(), R2 { x: 0.5, y: 0.5 }, epsilon = 1e-12);
    assert_relative_eq!(square().centroid(), R2 { x: 0.5, y: 0.5 }, epsilon = 1e-12);
    // Rectangle 4×2 (area 8, centroid (2, 1)) plus 2×1 block (area 2, centroid (1, 2.5))
    let c = ell().centroid();
    assert_relative_eq!(c, R2 { x: 1.8, y: 1.3 }, epsilon = 1e-12);
}

#[test]
fn test_edges() {
    let l = ell();
    assert_eq!(l.edge_lengths(), vec![4., 2., 2., 1., 2., 3.]);
    assert_eq!(l.perimeter(), 14.);
    assert_eq!(l.min_edge_length(), 1.);
    assert_eq!(l.edge_midpoint(0), R2 { x: 2., y: 0. });
    assert_eq!(l.bbox().width(), 4.);
    assert_eq!(l.bbox().height(), 3.);
}

#[test]
fn test_outward_normals() {
    let l = ell();
    assert_relative_eq!(l.outward_normal(0), R2 { x: 0., y: -1. }, epsilon = 1e-12);
    assert_relative_eq!(l.outward_normal(1), R2 { x: 1., y: 0. }, epsilon = 1e-12);
    // Inner corner edges still point out of the shape, not away from the centroid
    assert_relative_eq!(l.outward_normal(2), R2 { x: 0., y: 1. }, epsilon = 1e-12);
    assert_relative_eq!(l.outward_normal(3), R2 { x: 1., y: 0. }, epsilon = 1e-12);

    // Winding doesn't matter
    let mut cw = ell();
    cw.vertices.reverse();
    // Reversed edge 4 is original edge 0
    assert_relative_eq!(cw.outward_normal(4), R2 { x: 0., y: -1. }, epsilon = 1e-12);
}

#[test]
fn test_orientations() {
    use Orientation::*;
    assert_eq!(ell().orientations(), Some(vec![Right, Up, Left, Up, Left, Down]));
    assert!(square().is_rectilinear());
    assert!(!triangle().is_rectilinear());
    assert_eq!(triangle().orientation(0), Some(Right));
    assert_eq!(triangle().orientation(1), None);
    assert!(Right.is_horizontal() && !Up.is_horizontal());
    assert_eq!(Up.opposite(), Down);
}

#[test]
fn test_display() {
    assert_eq!(
        format!("{}", triangle()),
        "Polygon[(0.000, 0.000), (1.000, 0.000), (0.500, 1.000)]"
    );
}
