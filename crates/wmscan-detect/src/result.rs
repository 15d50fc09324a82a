use serde::Serialize;

use wmscan_core::{OrderedQuad, Quad};

/// A raw candidate produced inside a strategy, ranked by area before one
/// winner is returned.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionCandidate {
    pub quad: Quad,
    pub strategy: &'static str,
    pub area: f32,
}

/// Why a strategy did not produce a decoded watermark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MissReason {
    /// No 4-vertex candidate was found.
    NoQuad,
    /// A quad was found but rejected as non-convex or degenerate before
    /// rectification.
    GeometryRejected,
    /// Rectification ran but the decoder reported no watermark.
    DecodeFailed,
}

/// Per-strategy record kept for the exhaustion outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttemptRecord {
    pub strategy: &'static str,
    pub reason: MissReason,
}

/// A successful detect-rectify-decode attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecodeAttempt {
    /// Name of the winning strategy.
    pub strategy: &'static str,
    /// Corner coordinates used, in `[TL, TR, BR, BL]` order, for
    /// visualization overlays.
    pub corners: OrderedQuad,
    pub symbol: String,
    pub confidence: f32,
}

/// Terminal outcome of one scan.
///
/// Exhaustion is a normal result the caller must handle — an arbitrary
/// photo usually contains no watermark — so it is a value here, never an
/// error.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ScanOutcome {
    Decoded(DecodeAttempt),
    NotFound { attempts: Vec<AttemptRecord> },
}

impl ScanOutcome {
    pub fn is_decoded(&self) -> bool {
        matches!(self, ScanOutcome::Decoded(_))
    }

    /// The successful attempt, if any.
    pub fn decoded(&self) -> Option<&DecodeAttempt> {
        match self {
            ScanOutcome::Decoded(attempt) => Some(attempt),
            ScanOutcome::NotFound { .. } => None,
        }
    }
}
