//! Ordered coordinate collection shared by the primitive rasterizers.

use crate::symmetry::Point;
use std::collections::VecDeque;

/// A fixed number of coordinate lists that flatten in list order.
///
/// Rasterizers that emit points out of stroke order (the circle's eight
/// octants, the curve's three segments) write into separate lists, using
/// [`prepend`](Self::prepend) where the emission direction opposes the
/// stroke direction, so the flattened set still walks the shape
/// contiguously. Stamp spacing relies on that ordering.
#[derive(Debug, Clone)]
pub struct CoordSet {
    lists: Vec<VecDeque<Point>>,
}

impl CoordSet {
    pub fn new(numlists: usize) -> Self {
        Self {
            lists: vec![VecDeque::new(); numlists],
        }
    }

    /// Add a point at the end of list `i`.
    pub fn append(&mut self, i: usize, p: Point) {
        self.lists[i].push_back(p);
    }

    /// Add a point at the front of list `i`.
    pub fn prepend(&mut self, i: usize, p: Point) {
        self.lists[i].push_front(p);
    }

    /// Replace list `i` wholesale.
    pub fn set_list(&mut self, i: usize, pts: Vec<Point>) {
        self.lists[i] = pts.into();
    }

    /// Total number of points across all lists.
    pub fn len(&self) -> usize {
        self.lists.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(VecDeque::is_empty)
    }

    /// Iterate every point in list order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.lists.iter().flatten().copied()
    }

    /// Flatten into a single ordered point list.
    pub fn into_points(self) -> Vec<Point> {
        self.lists.into_iter().flatten().collect()
    }
}

impl From<Vec<Point>> for CoordSet {
    fn from(pts: Vec<Point>) -> Self {
        Self {
            lists: vec![pts.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_prepend_order() {
        let mut cs = CoordSet::new(2);
        cs.append(0, Point::new(1, 0));
        cs.append(0, Point::new(2, 0));
        cs.prepend(1, Point::new(4, 0));
        cs.prepend(1, Point::new(3, 0));
        assert_eq!(cs.len(), 4);
        assert_eq!(
            cs.into_points(),
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(4, 0)
            ]
        );
    }

    #[test]
    fn test_set_list() {
        let mut cs = CoordSet::new(3);
        cs.set_list(1, vec![Point::new(9, 9)]);
        assert_eq!(cs.into_points(), vec![Point::new(9, 9)]);
    }
}
