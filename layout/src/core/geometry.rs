//! Contains the 2D coordinate type that the renderers work with.

// Stores a 2D coordinate, or a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn zero() -> Point {
        Self { x: 0., y: 0. }
    }

    pub fn new(x: f64, y: f64) -> Point {
        Self { x, y }
    }

    pub fn splat(s: f64) -> Point {
        Point::new(s, s)
    }

    pub fn add(&self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    /// Scale each coordinate by the matching coordinate of \p s.
    pub fn mul(&self, s: Point) -> Point {
        Point::new(self.x * s.x, self.y * s.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(x: {:.3}, y: {:.3})", self.x, self.y)
    }
}

#[test]
fn test_point_ops() {
    let p = Point::new(2., 3.).mul(Point::new(10., 20.)).add(Point::splat(5.));
    assert_eq!(p, Point::new(25., 65.));
    assert_eq!(format!("{}", Point::zero()), "(x: 0.000, y: 0.000)");
}
