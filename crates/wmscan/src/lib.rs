//! High-level facade for watermark region scanning.
//!
//! Wires image loading to the detection cascade so callers (HTTP
//! handlers, GUIs, batch jobs) can go from a file path or an in-memory
//! frame to a [`ScanOutcome`] in one call.

use std::path::Path;

use image::RgbImage;

pub use wmscan_core as core;
pub use wmscan_detect as detect;

pub use wmscan_core::{order_corners, rectify, OrderedQuad, Quad, DEFAULT_OUTPUT_SIZE};
pub use wmscan_detect::{
    DecodeReading, QuadDetector, ScanOutcome, ScanParams, Scanner, WatermarkDecoder,
};

/// Errors produced by the facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input file could not be read or decoded as pixel data. This is
    /// the fatal precondition failure: no strategies are attempted.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Scan(#[from] wmscan_detect::ScanError),
}

/// Load an image file as 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, Error> {
    Ok(image::open(path.as_ref())?.to_rgb8())
}

/// Run the full cascade on an in-memory frame with default parameters.
pub fn scan_image<D: WatermarkDecoder>(image: &RgbImage, decoder: &D) -> Result<ScanOutcome, Error> {
    Ok(Scanner::new(decoder).detect_and_decode(image)?)
}

/// Load `path` and run the full cascade with default parameters.
pub fn scan_path<D: WatermarkDecoder>(
    path: impl AsRef<Path>,
    decoder: &D,
) -> Result<ScanOutcome, Error> {
    let image = load_rgb(path)?;
    scan_image(&image, decoder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    struct AbsentDecoder;

    impl WatermarkDecoder for AbsentDecoder {
        fn decode(&self, _rectified: &RgbImage) -> DecodeReading {
            DecodeReading::absent()
        }
    }

    #[test]
    fn featureless_frame_scans_to_not_found() {
        let image = RgbImage::from_pixel(96, 96, Rgb([140u8, 140, 140]));
        let outcome = scan_image(&image, &AbsentDecoder).expect("scan runs");
        assert!(!outcome.is_decoded());
    }

    #[test]
    fn missing_file_is_a_precondition_failure() {
        let err = scan_path("/definitely/not/a/file.png", &AbsentDecoder).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }
}
