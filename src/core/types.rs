use std::fmt;

/// A single cell: `x` is the column, `y` the row, `value` the color stored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GridPoint {
    pub x: usize,
    pub y: usize,
    pub value: u8,
}

impl GridPoint {
    pub fn new(x: usize, y: usize, value: u8) -> Self {
        Self { x, y, value }
    }
}

/// Inclusive axis-aligned bounding box in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GridRegion {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl GridRegion {
    /// Corners are normalized so that `x1 <= x2` and `y1 <= y2` always hold.
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Bounding box of a point set, `None` when there are no points.
    pub fn bounding<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GridPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut region = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            region.x1 = region.x1.min(p.x);
            region.y1 = region.y1.min(p.y);
            region.x2 = region.x2.max(p.x);
            region.y2 = region.y2.max(p.y);
        }
        Some(region)
    }

    pub fn width(&self) -> usize { self.x2 - self.x1 + 1 }
    pub fn height(&self) -> usize { self.y2 - self.y1 + 1 }
    pub fn area(&self) -> usize { self.width() * self.height() }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }

    /// Every `(x, y)` inside the box, row-major.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y1..=self.y2).flat_map(move |y| (self.x1..=self.x2).map(move |x| (x, y)))
    }
}

impl fmt::Display for GridRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})-({},{})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_dimensions() {
        let r = GridRegion::new(1, 2, 3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 1);
        assert_eq!(r.area(), 3);
    }

    #[test]
    fn region_normalizes_corners() {
        let r = GridRegion::new(4, 5, 1, 0);
        assert_eq!(r, GridRegion::new(1, 0, 4, 5));
    }

    #[test]
    fn bounding_of_points() {
        let pts = vec![
            GridPoint::new(2, 1, 3),
            GridPoint::new(0, 4, 3),
            GridPoint::new(5, 2, 3),
        ];
        let r = GridRegion::bounding(&pts).unwrap();
        assert_eq!(r, GridRegion::new(0, 1, 5, 4));
        assert!(GridRegion::bounding(&Vec::<GridPoint>::new()).is_none());
    }

    #[test]
    fn contains_is_inclusive() {
        let r = GridRegion::new(1, 1, 2, 2);
        assert!(r.contains(1, 1));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(0, 1));
    }

    #[test]
    fn coords_row_major() {
        let r = GridRegion::new(0, 0, 1, 1);
        let coords: Vec<_> = r.coords().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn display_format() {
        assert_eq!(GridRegion::new(1, 1, 2, 2).to_string(), "(1,1)-(2,2)");
    }
}
