//! `ControlPointId` / `BlockId`: strong handles for user-assigned indices
//!
//! Control points and blocks are addressed by stable indices chosen by the
//! caller. Wrapping them in newtypes keeps a block index from being passed
//! where a control-point index is expected, at zero runtime cost.
//!
//! Both types are `repr(transparent)` over `u32` and (de)serialize as plain
//! integers, so configuration files can write `[0, 1, 3, 2]` directly.

use std::fmt;

/// Index of a user-supplied control point (a block corner).
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ControlPointId(u32);

impl ControlPointId {
    /// Creates a new `ControlPointId` from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ControlPointId(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Index of a block in the block definition set.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    /// Creates a new `BlockId` from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        BlockId(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for ControlPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for ControlPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockId").field(&self.0).finish()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// Conversions
// -----------------------------------------------------------------------------

impl From<u32> for ControlPointId {
    #[inline]
    fn from(raw: u32) -> Self {
        ControlPointId(raw)
    }
}

impl From<u32> for BlockId {
    #[inline]
    fn from(raw: u32) -> Self {
        BlockId(raw)
    }
}
