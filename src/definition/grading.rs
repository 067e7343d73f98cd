//! One-dimensional point distributions along block edges.
//!
//! A grading turns a segment count `n` into `n + 1` parametric positions in
//! `[0, 1]`. The expansion ratio is the length of the last segment divided by
//! the length of the first one, so `r > 1` clusters points at the start of
//! the edge and `r < 1` at its end.

use crate::topology::cell_type::CellType;

/// Ratios closer to one than this are treated as uniform.
const UNIFORM_TOL: f64 = 1e-12;

/// Grading of a single block edge.
///
/// Serializes untagged: a bare number is a [`EdgeGrading::Ratio`], an object
/// `{ "first": .., "second": .. }` is a [`EdgeGrading::TwoSided`] grading.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EdgeGrading {
    /// Geometric expansion over the whole edge.
    Ratio(f64),
    /// Edge split at its midpoint, each half graded independently.
    ///
    /// The first half gets `ceil(n / 2)` segments, the second `floor(n / 2)`.
    TwoSided { first: f64, second: f64 },
}

impl Default for EdgeGrading {
    fn default() -> Self {
        EdgeGrading::Ratio(1.0)
    }
}

impl EdgeGrading {
    /// Uniform spacing.
    pub const UNIFORM: EdgeGrading = EdgeGrading::Ratio(1.0);

    /// Checks that every ratio is finite and strictly positive.
    pub fn validate(&self) -> Result<(), String> {
        let check = |r: f64| {
            if r.is_finite() && r > 0.0 {
                Ok(())
            } else {
                Err(format!("grading ratio must be finite and > 0, got {r}"))
            }
        };
        match *self {
            EdgeGrading::Ratio(r) => check(r),
            EdgeGrading::TwoSided { first, second } => {
                check(first)?;
                check(second)
            }
        }
    }

    /// Returns `true` when the grading produces equal segments.
    pub fn is_uniform(&self) -> bool {
        match *self {
            EdgeGrading::Ratio(r) => (r - 1.0).abs() <= UNIFORM_TOL,
            EdgeGrading::TwoSided { first, second } => {
                (first - 1.0).abs() <= UNIFORM_TOL && (second - 1.0).abs() <= UNIFORM_TOL
            }
        }
    }

    /// Parametric positions of the `n + 1` points along the edge.
    ///
    /// The first position is exactly `0.0` and the last exactly `1.0`.
    /// `n` must be at least one.
    pub fn distribution(&self, n: usize) -> Vec<f64> {
        match *self {
            EdgeGrading::Ratio(r) => geometric(n, r),
            EdgeGrading::TwoSided { .. } if n < 2 => geometric(n, 1.0),
            EdgeGrading::TwoSided { first, second } => {
                let n_first = n.div_ceil(2);
                let n_second = n / 2;
                let mut out = Vec::with_capacity(n + 1);
                out.extend(geometric(n_first, first).into_iter().map(|t| 0.5 * t));
                out.extend(
                    geometric(n_second, second)
                        .into_iter()
                        .skip(1)
                        .map(|t| 0.5 + 0.5 * t),
                );
                out
            }
        }
    }
}

/// `n + 1` positions whose segment lengths form a geometric series with
/// last/first ratio `r`.
fn geometric(n: usize, r: f64) -> Vec<f64> {
    debug_assert!(n >= 1);
    let mut out = Vec::with_capacity(n + 1);
    out.push(0.0);
    if n == 1 {
        out.push(1.0);
        return out;
    }
    if (r - 1.0).abs() <= UNIFORM_TOL {
        for i in 1..n {
            out.push(i as f64 / n as f64);
        }
        out.push(1.0);
        return out;
    }
    let q = r.powf(1.0 / (n as f64 - 1.0));
    // sum_{k<n} q^k
    let total = (1.0 - q.powi(n as i32)) / (1.0 - q);
    let mut len = 1.0 / total;
    let mut acc = 0.0;
    for _ in 1..n {
        acc += len;
        out.push(acc);
        len *= q;
    }
    out.push(1.0);
    out
}

/// Resolves a block's grading list into one [`EdgeGrading`] per edge.
///
/// Accepted lengths, for a block of dimension `D`:
/// - `0`: uniform on every edge;
/// - `D`: one grading per axis, applied to each parallel edge;
/// - `2^(D-1) * D`: one grading per edge, in [`CellType::edges`] order.
pub fn resolve_edge_gradings(
    cell_type: CellType,
    gradings: &[EdgeGrading],
) -> Result<Vec<EdgeGrading>, String> {
    let dim = cell_type.dimension();
    let per_axis = cell_type.edges_per_axis();
    let n_edges = cell_type.edges().len();
    for g in gradings {
        g.validate()?;
    }
    match gradings.len() {
        0 => Ok(vec![EdgeGrading::UNIFORM; n_edges]),
        len if len == dim => Ok((0..n_edges).map(|e| gradings[e / per_axis]).collect()),
        len if len == n_edges => Ok(gradings.to_vec()),
        len => Err(format!(
            "expected 0, {dim}, or {n_edges} grading values for a {dim}D block, got {len}"
        )),
    }
}
