//! Strongly-typed identifiers for surfaces and cells.
//!
//! Each geometry object carries two names: the *user id* chosen by the
//! caller when the geometry is built (arbitrary, sparse, only ever used
//! at the input/output boundary) and the *index* assigned at insertion
//! (dense, `0..N-1`, used everywhere inside the transport loop and for
//! linking host data such as cross sections to cells).

use std::fmt;

/// User-chosen identifier of a surface.
///
/// Arbitrary `u32`; uniqueness within one geometry is enforced at
/// insertion time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SurfaceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// User-chosen identifier of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CellId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Dense internal index of a surface, assigned at insertion.
///
/// `SurfaceIndex(n)` is the n-th surface added to the geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceIndex(pub usize);

impl fmt::Display for SurfaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense internal index of a cell, assigned at insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(pub usize);

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
