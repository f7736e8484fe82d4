//! Simple geometry primitives.

use crate::sprites::Drawable;

/// A tiny position vector.
///
/// Coordinates are signed; sprites routinely hang off the edges of the display.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A tiny rectangle based on two absolute `Point`s.
///
/// `p1` is the top-left corner (inclusive), `p2` the bottom-right corner (exclusive).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub p1: Point,
    pub p2: Point,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl core::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl core::ops::AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Point {
        Point::new(x, y)
    }
}

impl Rect {
    /// Create a rectangle from two `Point`s.
    pub fn new(p1: &Point, p2: &Point) -> Rect {
        let p1 = *p1;
        let p2 = *p2;

        Rect { p1, p2 }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Rect {
        let p1 = Point::new(x, y);
        let p2 = p1 + Point::new(width as i32, height as i32);

        Rect { p1, p2 }
    }

    /// Create a rectangle of the given size centered on `center`.
    ///
    /// Odd sizes put the extra pixel on the bottom-right, the same way the top-left corner is
    /// derived from `center - size / 2`.
    pub fn from_center(center: &Point, width: u32, height: u32) -> Rect {
        let (width, height) = (width as i32, height as i32);
        let p1 = Point::new(center.x - width / 2, center.y - height / 2);
        let p2 = p1 + Point::new(width, height);

        Rect { p1, p2 }
    }

    /// Create a rectangle centered on `center` that fits a `Drawable`.
    pub fn from_drawable<D>(center: &Point, drawable: &D) -> Rect
    where
        D: Drawable,
    {
        Rect::from_center(center, drawable.width(), drawable.height())
    }

    pub fn width(&self) -> u32 {
        (self.p2.x - self.p1.x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.p2.y - self.p1.y).max(0) as u32
    }

    pub fn top(&self) -> i32 {
        self.p1.y
    }

    pub fn left(&self) -> i32 {
        self.p1.x
    }

    /// The center of the rectangle, rounded toward the top-left.
    pub fn center(&self) -> Point {
        Point::new(
            self.p1.x + self.width() as i32 / 2,
            self.p1.y + self.height() as i32 / 2,
        )
    }

    /// Test whether `point` lies inside the rectangle.
    pub fn contains(&self, point: &Point) -> bool {
        let (top, right, bottom, left) = self.get_bounds();

        point.x >= left && point.x < right && point.y >= top && point.y < bottom
    }

    /// Test for intersections between two rectangles.
    ///
    /// Rectangles intersect when the geometry of either overlaps.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (top1, right1, bottom1, left1) = self.get_bounds();
        let (top2, right2, bottom2, left2) = other.get_bounds();

        bottom1 > top2 && bottom2 > top1 && right1 > left2 && right2 > left1
    }

    /// Compute the bounding box for this rectangle.
    ///
    /// # Returns
    ///
    /// Tuple of `(top, right, bottom, left)`, e.g. in CSS clockwise order.
    fn get_bounds(&self) -> (i32, i32, i32, i32) {
        (self.p1.y, self.p2.x, self.p2.y, self.p1.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let r1 = Rect::from_xywh(10, 10, 10, 10);

        // Test intersection between equal-sized rectangles
        for y in 0..3 {
            for x in 0..3 {
                let r2 = Rect::from_xywh(x * 5 + 5, y * 5 + 5, 10, 10);

                assert!(r1.intersects(&r2), "Should intersect");
                assert!(r2.intersects(&r1), "Should intersect");
            }
        }

        // Test non-intersections
        for y in 0..3 {
            for x in 0..3 {
                if x == 1 && y == 1 {
                    continue;
                }

                let r2 = Rect::from_xywh(x * 10, y * 10, 10, 10);

                assert!(!r1.intersects(&r2), "Should not intersect");
                assert!(!r2.intersects(&r1), "Should not intersect");
            }
        }

        // Negative coordinates
        let r2 = Rect::new(&Point::new(-30, -30), &Point::new(11, 11));
        assert!(r1.intersects(&r2), "Should intersect");
        assert!(r2.intersects(&r1), "Should intersect");
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::from_center(&Point::new(100, 50), 20, 10);
        assert_eq!(rect.p1, Point::new(90, 45));
        assert_eq!(rect.p2, Point::new(110, 55));
        assert_eq!(rect.center(), Point::new(100, 50));

        // Odd sizes keep the center
        let rect = Rect::from_center(&Point::new(100, 50), 21, 11);
        assert_eq!(rect.p1, Point::new(90, 45));
        assert_eq!(rect.center(), Point::new(100, 50));
        assert_eq!((rect.width(), rect.height()), (21, 11));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::from_xywh(-5, 0, 10, 10);

        assert!(rect.contains(&Point::new(-5, 0)));
        assert!(rect.contains(&Point::new(4, 9)));
        assert!(!rect.contains(&Point::new(5, 9)), "Right edge is exclusive");
        assert!(!rect.contains(&Point::new(0, 10)), "Bottom edge is exclusive");
    }
}
