use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Moore neighborhood: adjacency counts and the numbered border of a cascade.
const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal neighborhood: the only directions a cascade expands through.
const ORTHOGONAL: [(isize, isize); 4] = [
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, 0),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// In-bounds walk over a fixed displacement table. Holds no borrow of the
/// grid, so callers may mutate cells while iterating.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, displacements: &'static [(isize, isize)]) -> Self {
        Self {
            center,
            bounds,
            displacements,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= self.displacements.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                self.displacements[self.index as usize],
                self.bounds,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

pub trait NeighborIterExt {
    fn iter_moore(&self, index: Coord2) -> NeighborIter;
    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_moore(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_bounds(self), &MOORE)
    }

    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_bounds(self), &ORTHOGONAL)
    }
}

fn array_bounds<T>(array: &Array2<T>) -> Coord2 {
    let dim = array.dim();
    (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moore_iteration_clips_at_corners() {
        let grid: Array2<u8> = Array2::default([3, 3]);

        let corner: Vec<_> = grid.iter_moore((0, 0)).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

        let center: Vec<_> = grid.iter_moore((1, 1)).collect();
        assert_eq!(center.len(), 8);
    }

    #[test]
    fn orthogonal_iteration_excludes_diagonals() {
        let grid: Array2<u8> = Array2::default([3, 3]);

        let neighbors: Vec<_> = grid.iter_orthogonal((1, 1)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }
}
