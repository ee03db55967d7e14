//! Network graph edge management.
//!
//! The graph itself is undirected (spanning-tree extraction requires it),
//! but a rigid-body transform between two stations is inherently directed.
//! Every edge therefore carries an [`EdgeDir`] recording which station is
//! the transform domain (`from`) and which is the range (`into`); an edge
//! recovered from an undirected traversal is compared against the wanted
//! direction and reversed when necessary.

use std::fmt;

use thiserror::Error;

use rignet_core::stat::track;
use rignet_core::{Iso3, Real, Validity};

use crate::station::{key_is_valid, StaKey, NULL_STA_KEY};

/// Weight assigned to a robust edge holding a single sample, for which no
/// scatter estimate exists yet. Large enough that any estimated edge is
/// preferred by the spanning tree.
pub const WEIGHT_UNESTIMATED: Real = 1024.0 * 1024.0;

/// Outcome of comparing two edge direction interpretations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirCompare {
    /// Keys do not describe the same station pair (or a direction is invalid).
    Different,
    /// Same pair, same interpretation.
    Forward,
    /// Same pair, swapped interpretation.
    Reverse,
}

/// Ordered pair of station keys fixing the interpretation of an edge
/// transform: `x_into = xform(x_from)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDir {
    /// Domain station of the edge transform.
    pub from: StaKey,
    /// Range station of the edge transform.
    pub into: StaKey,
}

impl EdgeDir {
    /// Direction from `from` toward `into`.
    pub fn new(from: StaKey, into: StaKey) -> Self {
        Self { from, into }
    }

    /// True if both keys are valid and distinct.
    pub fn is_valid(&self) -> bool {
        key_is_valid(self.from) && key_is_valid(self.into) && self.from != self.into
    }

    /// Compare this direction interpretation with `test`.
    pub fn compare_to(&self, test: &EdgeDir) -> DirCompare {
        if !self.is_valid() {
            return DirCompare::Different;
        }
        if test.from == self.from && test.into == self.into {
            DirCompare::Forward
        } else if test.into == self.from && test.from == self.into {
            DirCompare::Reverse
        } else {
            DirCompare::Different
        }
    }

    /// True for the canonical direction (`from < into`).
    pub fn is_forward(&self) -> bool {
        self.from < self.into
    }

    /// Direction with domain and range stations swapped.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.into,
            into: self.from,
        }
    }
}

impl Default for EdgeDir {
    fn default() -> Self {
        Self {
            from: NULL_STA_KEY,
            into: NULL_STA_KEY,
        }
    }
}

impl fmt::Display for EdgeDir {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(fmtr, "from: {} into: {}", self.from, self.into)
        } else {
            write!(fmtr, "<null>")
        }
    }
}

/// Errors from edge operations rejected by the edge variant.
#[derive(Debug, Error)]
pub enum EdgeError {
    /// Transform accumulation is defined only on robust edges.
    #[error("transform accumulation requires a robust edge, got {kind} edge ({dir})")]
    NotRobust {
        /// Variant name of the offending edge.
        kind: &'static str,
        /// Direction of the offending edge.
        dir: EdgeDir,
    },
}

/// Single measured orientation between two station frames.
#[derive(Debug, Clone)]
pub struct EdgeOri {
    dir: EdgeDir,
    xform: Iso3,
    fit_err: Real,
}

impl EdgeOri {
    /// Edge carrying `xform` (interpreted per `dir`) with fit error weight.
    pub fn new(dir: EdgeDir, xform: Iso3, fit_err: Real) -> Self {
        Self { dir, xform, fit_err }
    }
}

/// Robustly tracked orientation between two station frames.
///
/// Every accumulated sample feeds a streaming transform tracker; the edge
/// transform is the tracker median and the edge weight is the median
/// scatter estimate.
#[derive(Debug, Clone)]
pub struct EdgeRobust {
    dir: EdgeDir,
    samples: Vec<Iso3>,
    tracker: track::Transforms,
}

impl EdgeRobust {
    /// Edge seeded with a first sample, reserving tracker capacity.
    pub fn new(dir: EdgeDir, xform: &Iso3, reserve: usize) -> Self {
        let mut edge = Self {
            dir,
            samples: Vec::with_capacity(reserve),
            tracker: track::Transforms::new(reserve),
        };
        edge.accumulate(xform);
        edge
    }

    /// Insert a sample into the running tracker.
    pub fn accumulate(&mut self, xform: &Iso3) {
        self.samples.push(*xform);
        self.tracker.insert(xform);
    }

    /// Number of accumulated samples.
    pub fn size(&self) -> usize {
        self.tracker.size()
    }

    fn weight(&self) -> Real {
        if self.tracker.size() < 2 {
            WEIGHT_UNESTIMATED
        } else {
            self.tracker.median_error_estimate(false)
        }
    }

    fn reversed(&self) -> Self {
        let mut rev = Self {
            dir: self.dir.reversed(),
            samples: Vec::with_capacity(self.samples.capacity()),
            tracker: track::Transforms::new(self.samples.capacity()),
        };
        for sample in &self.samples {
            rev.accumulate(&sample.inverse());
        }
        rev
    }
}

/// Network edge: the closed set of variants a [`crate::Geometry`] stores.
#[derive(Debug, Clone)]
pub enum Edge {
    /// Placeholder with direction only; weight and transform are invalid.
    Base(EdgeDir),
    /// One measured orientation with a fixed fit error.
    Ori(EdgeOri),
    /// Running robust orientation over accumulated samples.
    Robust(EdgeRobust),
}

impl Edge {
    /// Convenience constructor for a measured orientation edge.
    pub fn ori(dir: EdgeDir, xform: Iso3, fit_err: Real) -> Self {
        Self::Ori(EdgeOri::new(dir, xform, fit_err))
    }

    /// Convenience constructor for a robust edge seeded with one sample.
    pub fn robust(dir: EdgeDir, xform: &Iso3, reserve: usize) -> Self {
        Self::Robust(EdgeRobust::new(dir, xform, reserve))
    }

    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Base(_) => "base",
            Self::Ori(_) => "ori",
            Self::Robust(_) => "robust",
        }
    }

    /// Direction interpretation of the edge transform.
    pub fn edge_dir(&self) -> EdgeDir {
        match self {
            Self::Base(dir) => *dir,
            Self::Ori(edge) => edge.dir,
            Self::Robust(edge) => edge.dir,
        }
    }

    /// Domain station key.
    pub fn from_key(&self) -> StaKey {
        self.edge_dir().from
    }

    /// Range station key.
    pub fn into_key(&self) -> StaKey {
        self.edge_dir().into
    }

    /// Edge weight used by spanning-tree extraction (smaller is better).
    ///
    /// NaN for placeholder edges.
    pub fn weight(&self) -> Real {
        match self {
            Self::Base(_) => Real::null(),
            Self::Ori(edge) => edge.fit_err,
            Self::Robust(edge) => edge.weight(),
        }
    }

    /// Transform carrying `from`-frame coordinates into `into`-frame
    /// coordinates.
    ///
    /// Null for placeholder edges; the robust variant reports its running
    /// median.
    pub fn xform(&self) -> Iso3 {
        match self {
            Self::Base(_) => Iso3::null(),
            Self::Ori(edge) => edge.xform,
            Self::Robust(edge) => edge.tracker.median(),
        }
    }

    /// Owned edge of the same variant describing traversal in the other
    /// direction: keys swapped, transform inverted.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Base(dir) => Self::Base(dir.reversed()),
            Self::Ori(edge) => Self::Ori(EdgeOri::new(
                edge.dir.reversed(),
                edge.xform.inverse(),
                edge.fit_err,
            )),
            Self::Robust(edge) => Self::Robust(edge.reversed()),
        }
    }

    /// Insert a sample into a robust edge's running tracker.
    ///
    /// The sample is interpreted per the edge's own direction. Placeholder
    /// and single-orientation edges reject accumulation.
    pub fn accumulate(&mut self, xform: &Iso3) -> Result<(), EdgeError> {
        match self {
            Self::Robust(edge) => {
                edge.accumulate(xform);
                Ok(())
            }
            other => Err(EdgeError::NotRobust {
                kind: other.kind(),
                dir: other.edge_dir(),
            }),
        }
    }

    /// True if the direction is usable and the edge transform is valid.
    pub fn is_valid(&self) -> bool {
        self.edge_dir().is_valid() && self.xform().is_valid()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(dir) => write!(fmtr, "{dir} wgt: <null>"),
            Self::Ori(edge) => write!(fmtr, "{} wgt: {:.6}", edge.dir, edge.fit_err),
            Self::Robust(edge) => write!(
                fmtr,
                "{} wgt: {:.6} trackSize: {}",
                edge.dir,
                edge.weight(),
                edge.size()
            ),
        }
    }
}
