use numpy::ndarray::ArrayView1;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Default)]
/// A 1-indexed lattice point on a 2D grid.
/// `x` is the first axis (bounded by `xm`), `y` the second (bounded by `ym`).
/// Field order is the lexicographic sort order.
pub struct Coord2D {
    pub x: isize,
    pub y: isize,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Default)]
/// A 1-indexed lattice point on a 3D grid.
/// `x` is the first axis (bounded by `xm`), then `y` and `z`.
/// Field order is the lexicographic sort order.
pub struct Coord3D {
    pub x: isize,
    pub y: isize,
    pub z: isize,
}

impl Coord2D {
    pub fn new(x: isize, y: isize) -> Coord2D {
        Coord2D { x, y }
    }

    /// Check if the point lies in `[1, xm] x [1, ym]`.
    pub fn is_valid(&self, xm: isize, ym: isize) -> bool {
        1 <= self.x && self.x <= xm && 1 <= self.y && self.y <= ym
    }

    /// Offset into a flat array with strides `(1, xm)`.
    pub fn linear_index(&self, xm: isize) -> isize {
        (self.x - 1) + (self.y - 1) * xm
    }

    /// Chebyshev distance, the metric of the square neighborhood.
    pub fn chebyshev(&self, other: &Coord2D) -> isize {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl Coord3D {
    pub fn new(x: isize, y: isize, z: isize) -> Coord3D {
        Coord3D { x, y, z }
    }

    /// Check if the point lies in `[1, xm] x [1, ym] x [1, zm]`.
    pub fn is_valid(&self, xm: isize, ym: isize, zm: isize) -> bool {
        1 <= self.x && self.x <= xm
            && 1 <= self.y && self.y <= ym
            && 1 <= self.z && self.z <= zm
    }

    /// Offset into a flat array with strides `(1, xm, xm * ym)`.
    pub fn linear_index(&self, xm: isize, ym: isize) -> isize {
        (self.x - 1) + (self.y - 1) * xm + (self.z - 1) * xm * ym
    }

    /// Chebyshev distance, the metric of the cubic neighborhood.
    pub fn chebyshev(&self, other: &Coord3D) -> isize {
        (self.x - other.x).abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

/////////////////////////////////////////////////////////////////////////////////////////
///////////   Casting   /////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////

impl From<(isize, isize)> for Coord2D {
    fn from(other: (isize, isize)) -> Coord2D {
        Coord2D { x: other.0, y: other.1 }
    }
}

impl From<Coord2D> for (isize, isize) {
    fn from(other: Coord2D) -> (isize, isize) {
        (other.x, other.y)
    }
}

impl From<(isize, isize, isize)> for Coord3D {
    fn from(other: (isize, isize, isize)) -> Coord3D {
        Coord3D { x: other.0, y: other.1, z: other.2 }
    }
}

impl From<Coord3D> for (isize, isize, isize) {
    fn from(other: Coord3D) -> (isize, isize, isize) {
        (other.x, other.y, other.z)
    }
}

impl From<ArrayView1<'_, isize>> for Coord2D {
    /// Read a `(x, y)` row.
    fn from(other: ArrayView1<isize>) -> Coord2D {
        Coord2D { x: other[0], y: other[1] }
    }
}

impl From<ArrayView1<'_, isize>> for Coord3D {
    /// Read a `(x, y, z)` row.
    fn from(other: ArrayView1<isize>) -> Coord3D {
        Coord3D { x: other[0], y: other[1], z: other[2] }
    }
}
