//! Geometry utilities for block-mesher.
//!
//! This module provides the multilinear reference mapping used to fill
//! blocks and the signed measures used to flag degenerate cells.

pub mod metrics;
pub mod quality;
