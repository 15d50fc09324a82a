use image::{imageops, GrayImage, RgbImage};
use log::{debug, info};

use crate::codec::WatermarkDecoder;
use crate::error::ScanError;
use crate::params::ScanParams;
use crate::result::{AttemptRecord, DecodeAttempt, MissReason, ScanOutcome};
use crate::strategies::{default_strategies, QuadDetector};
use wmscan_core::rectify;

/// The detect-rectify-decode cascade.
///
/// Runs its strategies in priority order and exits on the first decode
/// that reports a present watermark; strategies are never combined or
/// voted. The decoder is injected at construction so tests can substitute
/// a deterministic mock.
///
/// A scanner holds no per-image state: every `detect_and_decode` call is
/// independent, so concurrent callers may share separate scanners freely
/// (sharing one decoder across threads is governed by the decoder's own
/// contract).
pub struct Scanner<D> {
    strategies: Vec<Box<dyn QuadDetector>>,
    decoder: D,
    params: ScanParams,
}

impl<D: WatermarkDecoder> Scanner<D> {
    /// Scanner with the default strategy cascade and parameters.
    pub fn new(decoder: D) -> Self {
        Self::with_params(decoder, ScanParams::default())
    }

    pub fn with_params(decoder: D, params: ScanParams) -> Self {
        let strategies = default_strategies(&params);
        Self {
            strategies,
            decoder,
            params,
        }
    }

    /// Replace the strategy list. Order is priority order.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn QuadDetector>>) -> Self {
        self.strategies = strategies;
        self
    }

    #[inline]
    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Locate a watermarked quadrilateral region in `image` and decode it.
    ///
    /// Exhaustion (no strategy yielded both a quad and a successful
    /// decode) is the `Ok(ScanOutcome::NotFound { .. })` path; only a
    /// malformed input image is an `Err`.
    pub fn detect_and_decode(&self, image: &RgbImage) -> Result<ScanOutcome, ScanError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ScanError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let gray: GrayImage = imageops::grayscale(image);
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let name = strategy.name();
            debug!("trying strategy {name}");

            let Some(quad) = strategy.detect(&gray) else {
                debug!("{name}: no quadrilateral");
                attempts.push(AttemptRecord {
                    strategy: name,
                    reason: MissReason::NoQuad,
                });
                continue;
            };

            let ordered = quad.order();
            if !ordered.is_convex() {
                debug!("{name}: geometry rejected (non-convex or degenerate quad)");
                attempts.push(AttemptRecord {
                    strategy: name,
                    reason: MissReason::GeometryRejected,
                });
                continue;
            }

            let rectified = rectify(image, &ordered, self.params.output_size);
            let reading = self.decoder.decode(&rectified);
            if reading.present {
                info!(
                    "{name}: watermark decoded with confidence {:.3}",
                    reading.confidence
                );
                return Ok(ScanOutcome::Decoded(DecodeAttempt {
                    strategy: name,
                    corners: ordered,
                    symbol: reading.symbol,
                    confidence: reading.confidence,
                }));
            }

            debug!("{name}: quadrilateral found but decode failed");
            attempts.push(AttemptRecord {
                strategy: name,
                reason: MissReason::DecodeFailed,
            });
        }

        info!("cascade exhausted after {} strategies", attempts.len());
        Ok(ScanOutcome::NotFound { attempts })
    }
}
