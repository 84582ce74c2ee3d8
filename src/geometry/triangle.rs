// Import the point type and midpoint helper from the sibling module
use super::point::{midpoint, Point};
use super::GeometryError;

// Serialization - lets a final generation be dumped to JSON
// (no Deserialize: that would bypass the non-degenerate check in `new`)
use serde::Serialize;

// sin(π/6) and cos(π/6) fix the seed's orientation: apex on top, flat base below
use std::f64::consts::FRAC_PI_6;

/// One triangle of a Sierpinski generation
///
/// Vertices are ordered (p1, p2, p3) and private: a `Triangle` never changes
/// after it is built. Subdividing produces brand new triangles.
///
/// Invariant: the vertices are finite and not collinear.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Triangle {
    p1: Point,
    p2: Point,
    p3: Point,
}

impl Triangle {
    /// Build a triangle from arbitrary points, rejecting degenerate input
    ///
    /// # Errors
    /// - `GeometryError::NonFinite` if any coordinate is NaN or infinite
    /// - `GeometryError::Degenerate` if the points are duplicated or collinear
    pub fn new(p1: Point, p2: Point, p3: Point) -> Result<Self, GeometryError> {
        // `find` returns the first offending point, if any
        if let Some(bad) = [p1, p2, p3].into_iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite(bad));
        }
        if is_collinear(&[p1, p2, p3]) {
            return Err(GeometryError::Degenerate(p1, p2, p3));
        }
        Ok(Self { p1, p2, p3 })
    }

    // Skips validation. Only used where the invariant already holds by construction:
    // the seed and the corner children of a valid parent.
    fn from_vertices(p1: Point, p2: Point, p3: Point) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn p3(&self) -> Point {
        self.p3
    }

    /// All three vertices in order
    pub fn vertices(&self) -> [Point; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Unsigned area
    pub fn area(&self) -> f64 {
        cross(self.p1, self.p2, self.p3).abs() / 2.0
    }

    /// Whether `p` lies inside the triangle or on its boundary
    ///
    /// Uses edge functions: `p` is inside when it sits on the same side of
    /// all three edges, whatever the winding order of the vertices.
    pub fn contains(&self, p: Point) -> bool {
        let d1 = cross(self.p1, self.p2, p);
        let d2 = cross(self.p2, self.p3, p);
        let d3 = cross(self.p3, self.p1, p);

        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }

    /// The three corner children of this triangle; see [`subdivide`]
    pub fn subdivide(&self) -> [Triangle; 3] {
        subdivide(self)
    }
}

/// Twice the signed area of (a, b, c); zero when the points are collinear
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Check if three points fail to span a triangle
///
/// Duplicate points are a special case of collinear points, so one
/// cross product covers both.
pub fn is_collinear(points: &[Point; 3]) -> bool {
    cross(points[0], points[1], points[2]) == 0.0
}

/// Build the seed equilateral triangle
///
/// The apex sits at `(x_shift, y_shift)`. The other two vertices sit
/// `side · cos(π/6)` below it, `side · sin(π/6)` to the right and left.
///
/// `side` must be positive; `RenderConfig::validate` enforces that before
/// this is ever called by the render driver.
pub fn equilateral_triangle(side: f64, x_shift: f64, y_shift: f64) -> Triangle {
    let k1 = FRAC_PI_6.sin();
    let k2 = FRAC_PI_6.cos();

    Triangle::from_vertices(
        Point::new(x_shift, y_shift),
        Point::new(x_shift + side * k1, y_shift + side * k2),
        Point::new(x_shift - side * k1, y_shift + side * k2),
    )
}

/// Split a triangle into its three corner triangles
///
/// With edge midpoints a = mid(p1, p2), b = mid(p2, p3), c = mid(p3, p1) the
/// children are (p1, a, c), (a, p2, b) and (c, b, p3), in that order.
///
/// The central triangle (a, b, c) is deliberately left out. Dropping it at
/// every depth is what carves the holes of the fractal.
pub fn subdivide(triangle: &Triangle) -> [Triangle; 3] {
    let Triangle { p1, p2, p3 } = *triangle;

    let a = midpoint(p1, p2);
    let b = midpoint(p2, p3);
    let c = midpoint(p3, p1);

    [
        Triangle::from_vertices(p1, a, c),
        Triangle::from_vertices(a, p2, b),
        Triangle::from_vertices(c, b, p3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn sample() -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 8.0),
        )
        .unwrap()
    }

    #[test]
    fn test_equilateral_triangle_vertices() {
        let tri = equilateral_triangle(2.0, 0.0, 0.0);
        let root3 = 3f64.sqrt();

        assert!(close(tri.p1(), Point::new(0.0, 0.0)));
        assert!(close(tri.p2(), Point::new(1.0, root3)));
        assert!(close(tri.p3(), Point::new(-1.0, root3)));
    }

    #[test]
    fn test_equilateral_triangle_sides_are_equal() {
        let tri = equilateral_triangle(900.0, 500.0, 50.0);
        let [a, b, c] = tri.vertices();
        let dist = |p: Point, q: Point| ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();

        assert!((dist(a, b) - 900.0).abs() < 1e-6);
        assert!((dist(b, c) - 900.0).abs() < 1e-6);
        assert!((dist(c, a) - 900.0).abs() < 1e-6);
    }

    #[test]
    fn test_equilateral_triangle_is_shifted() {
        let base = equilateral_triangle(10.0, 0.0, 0.0);
        let moved = equilateral_triangle(10.0, 500.0, 50.0);

        for (p, q) in base.vertices().iter().zip(moved.vertices().iter()) {
            assert!(close(Point::new(p.x + 500.0, p.y + 50.0), *q));
        }
    }

    #[test]
    fn test_subdivide_returns_corner_triangles_in_order() {
        let tri = sample();
        let [t1, t2, t3] = subdivide(&tri);

        let a = Point::new(2.0, 0.0);
        let b = Point::new(2.0, 4.0);
        let c = Point::new(0.0, 4.0);

        assert_eq!(t1.vertices(), [tri.p1(), a, c]);
        assert_eq!(t2.vertices(), [a, tri.p2(), b]);
        assert_eq!(t3.vertices(), [c, b, tri.p3()]);
    }

    #[test]
    fn test_subdivide_uses_only_vertices_and_midpoints() {
        let tri = equilateral_triangle(900.0, 500.0, 50.0);
        let [p1, p2, p3] = tri.vertices();
        let allowed = [
            p1,
            p2,
            p3,
            midpoint(p1, p2),
            midpoint(p2, p3),
            midpoint(p3, p1),
        ];

        let children = subdivide(&tri);
        assert_eq!(children.len(), 3);
        for child in &children {
            for v in child.vertices() {
                assert!(allowed.contains(&v), "unexpected vertex {:?}", v);
            }
        }
    }

    #[test]
    fn test_subdivide_drops_central_triangle() {
        let tri = sample();
        let [p1, p2, p3] = tri.vertices();
        let centre = [midpoint(p1, p2), midpoint(p2, p3), midpoint(p3, p1)];

        for child in subdivide(&tri) {
            // Every child keeps exactly one parent vertex, so none of them is (a, b, c)
            let parent_vertices = child
                .vertices()
                .iter()
                .filter(|v| tri.vertices().contains(v))
                .count();
            assert_eq!(parent_vertices, 1);
            assert_ne!(child.vertices(), centre);
        }
    }

    #[test]
    fn test_subdivide_keeps_three_quarters_of_area() {
        let tri = equilateral_triangle(900.0, 500.0, 50.0);
        let children_area: f64 = subdivide(&tri).iter().map(Triangle::area).sum();
        assert!((children_area - tri.area() * 0.75).abs() < tri.area() * 1e-9);
    }

    #[test]
    fn test_method_matches_free_function() {
        let tri = sample();
        assert_eq!(tri.subdivide(), subdivide(&tri));
    }

    #[test]
    fn test_new_rejects_degenerate() {
        let p = Point::new(1.0, 1.0);
        assert!(matches!(
            Triangle::new(p, p, Point::new(2.0, 3.0)),
            Err(GeometryError::Degenerate(..))
        ));
        assert!(matches!(
            Triangle::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)),
            Err(GeometryError::Degenerate(..))
        ));
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let bad = Point::new(f64::INFINITY, 0.0);
        assert_eq!(
            Triangle::new(Point::new(0.0, 0.0), bad, Point::new(1.0, 1.0)).unwrap_err(),
            GeometryError::NonFinite(bad)
        );
        assert!(matches!(
            Triangle::new(Point::new(f64::NAN, 0.0), bad, Point::new(1.0, 1.0)),
            Err(GeometryError::NonFinite(_))
        ));
    }

    #[test]
    fn test_contains() {
        let tri = sample();
        assert!(tri.contains(Point::new(1.0, 1.0)));
        assert!(tri.contains(Point::new(0.0, 0.0))); // vertex
        assert!(tri.contains(Point::new(2.0, 0.0))); // edge
        assert!(!tri.contains(Point::new(4.0, 4.0)));
        assert!(!tri.contains(Point::new(-0.1, 1.0)));
    }

    #[test]
    fn test_collinear_detection() {
        assert!(is_collinear(&[Point::new(0.0, 0.0); 3]));
        assert!(is_collinear(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
        ]));
        assert!(!is_collinear(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ]));
    }
}
