//! Fiducial-less quadrilateral detection for watermark scanning.
//!
//! Four independent detection strategies are tried in a fixed priority
//! order; the first candidate that both survives geometric validation and
//! decodes through the injected watermark decoder wins. See
//! [`Scanner::detect_and_decode`].

mod codec;
mod error;
mod orchestrator;
mod params;
mod result;
pub mod strategies;

pub use codec::{DecodeReading, EncodeError, WatermarkDecoder, WatermarkEncoder};
pub use error::ScanError;
pub use orchestrator::Scanner;
pub use params::{ContourParams, DocumentParams, EdgeParams, HarrisParams, ScanParams};
pub use result::{AttemptRecord, DecodeAttempt, DetectionCandidate, MissReason, ScanOutcome};
pub use strategies::{
    default_strategies, ContourStrategy, DocumentStrategy, EdgeStrategy, HarrisStrategy,
    QuadDetector,
};
