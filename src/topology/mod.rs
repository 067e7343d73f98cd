//! Top-level module for block and cell topology.
//!
//! This module provides:
//! - Strong index types for control points and blocks
//! - The `CellType` reference element with its corner, edge, and face tables

pub mod cell_type;
pub mod point;

pub use cell_type::CellType;
pub use point::{BlockId, ControlPointId};
