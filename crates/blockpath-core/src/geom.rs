//! Geometry primitives: [`Pos`], [`Vec3`] and [`Region`].
//!
//! Cell coordinates are integers; entity positions and collision extents are
//! real-valued and expressed in the same world units.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// An integer voxel cell. Y grows up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Pos {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
    /// One cell up.
    pub const UP: Self = Self { x: 0, y: 1, z: 0 };
    /// One cell down.
    pub const DOWN: Self = Self { x: 0, y: -1, z: 0 };

    /// Create a new cell position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a position shifted by (dx, dy, dz).
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The cell directly above.
    #[inline]
    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// The cell directly below.
    #[inline]
    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The real-valued position of the cell's minimum corner.
    #[inline]
    pub fn corner(self) -> Vec3 {
        Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A real-valued point or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The cell containing this point.
    #[inline]
    pub fn floored(self) -> Pos {
        Pos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    #[inline]
    pub fn distance_squared(self, other: Vec3) -> f64 {
        let d = self - other;
        d.x * d.x + d.y * d.y + d.z * d.z
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A half-open box of cells \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub min: Pos,
    pub max: Pos,
}

impl Region {
    /// Create a new region from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(a: Pos, b: Pos) -> Self {
        Self {
            min: Pos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Pos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Size as a `Pos` (extent along each axis).
    #[inline]
    pub fn size(self) -> Pos {
        self.max - self.min
    }

    /// Total number of cells in the region.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let s = self.size();
        s.x as usize * s.y as usize * s.z as usize
    }

    /// Whether the region has zero or negative volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Whether `p` is inside the half-open region.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Intersection of two regions (may be empty).
    ///
    /// If the two regions do not overlap, the zero (empty) region is returned.
    #[inline]
    pub fn intersect(self, other: Region) -> Self {
        let r = Self {
            min: Pos::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            max: Pos::new(
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
                self.max.z.min(other.max.z),
            ),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Iterator over every cell, x fastest, then z, then y.
    #[inline]
    pub fn iter(self) -> RegionIter {
        RegionIter {
            region: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Region {
    type Item = Pos;
    type IntoIter = RegionIter;
    #[inline]
    fn into_iter(self) -> RegionIter {
        self.iter()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Layer-major iterator over the cells in a [`Region`].
#[derive(Clone, Debug)]
pub struct RegionIter {
    region: Region,
    cur: Pos,
}

impl Iterator for RegionIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.region.is_empty() || self.cur.y >= self.region.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.region.max.x {
            self.cur.x = self.region.min.x;
            self.cur.z += 1;
            if self.cur.z >= self.region.max.z {
                self.cur.z = self.region.min.z;
                self.cur.y += 1;
            }
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_arithmetic() {
        let a = Pos::new(1, 2, 3);
        let b = Pos::new(4, 5, 6);
        assert_eq!(a + b, Pos::new(5, 7, 9));
        assert_eq!(b - a, Pos::new(3, 3, 3));
        assert_eq!(a.up(), Pos::new(1, 3, 3));
        assert_eq!(a.down(), a + Pos::DOWN);
    }

    #[test]
    fn floored_handles_negative_coordinates() {
        assert_eq!(Vec3::new(-0.5, 64.0, 0.999).floored(), Pos::new(-1, 64, 0));
        assert_eq!(Vec3::new(2.0, -0.0001, -3.0).floored(), Pos::new(2, -1, -3));
    }

    #[test]
    fn distance_squared() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(a.distance_squared(b), 9.0);
    }

    #[test]
    fn region_auto_canonicalize() {
        let r = Region::new(Pos::new(3, 2, 1), Pos::new(0, 0, 0));
        assert_eq!(r.min, Pos::ZERO);
        assert_eq!(r.max, Pos::new(3, 2, 1));
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn region_contains_is_half_open() {
        let r = Region::new(Pos::ZERO, Pos::new(2, 2, 2));
        assert!(r.contains(Pos::ZERO));
        assert!(r.contains(Pos::new(1, 1, 1)));
        assert!(!r.contains(Pos::new(2, 0, 0)));
        assert!(!r.contains(Pos::new(0, -1, 0)));
    }

    #[test]
    fn region_iter_visits_every_cell_once() {
        let r = Region::new(Pos::new(-1, 0, 0), Pos::new(1, 2, 3));
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(cells.len(), r.len());
        assert_eq!(cells[0], Pos::new(-1, 0, 0));
        assert_eq!(cells[1], Pos::new(0, 0, 0));
        assert_eq!(cells[2], Pos::new(-1, 0, 1));
        assert_eq!(*cells.last().unwrap(), Pos::new(0, 1, 2));
    }

    #[test]
    fn region_intersect_no_overlap_returns_empty() {
        let a = Region::new(Pos::ZERO, Pos::new(2, 2, 2));
        let b = Region::new(Pos::new(5, 5, 5), Pos::new(7, 7, 7));
        assert!(a.intersect(b).is_empty());
        assert_eq!(a.intersect(b), Region::default());
        assert_eq!(Region::default().iter().count(), 0);
    }
}
