//! Boundary traits for the external watermark codec.
//!
//! The codec itself (typically a model-backed encoder/decoder) lives
//! outside this crate; the cascade only consumes [`WatermarkDecoder`].

use image::RgbImage;

/// One reading from the decode primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeReading {
    /// Decoded symbol string; meaningful only when `present` is true.
    pub symbol: String,
    /// Whether a watermark was detected at all.
    pub present: bool,
    /// Decoder confidence in `[0, 1]`; meaningful only when `present`.
    pub confidence: f32,
}

impl DecodeReading {
    /// The "nothing found" reading.
    pub fn absent() -> Self {
        Self {
            symbol: String::new(),
            present: false,
            confidence: 0.0,
        }
    }
}

/// Read side of the watermark codec.
///
/// Implementations must be deterministic for a fixed input image. A
/// decoder backed by a single model worker is typically not reentrant;
/// concurrent callers must pool or serialize access according to the
/// implementation's own contract. The scanner itself issues strictly
/// sequential decode calls.
pub trait WatermarkDecoder {
    fn decode(&self, rectified: &RgbImage) -> DecodeReading;
}

impl<D: WatermarkDecoder + ?Sized> WatermarkDecoder for &D {
    fn decode(&self, rectified: &RgbImage) -> DecodeReading {
        (**self).decode(rectified)
    }
}

/// Embedding failure reported by a codec implementation.
#[derive(thiserror::Error, Debug)]
#[error("watermark embedding failed: {0}")]
pub struct EncodeError(pub String);

/// Write side of the codec. Declared here because it is part of the same
/// external boundary; the detection cascade never calls it.
pub trait WatermarkEncoder {
    fn encode(&self, cover: &RgbImage, message: &str) -> Result<RgbImage, EncodeError>;
}
