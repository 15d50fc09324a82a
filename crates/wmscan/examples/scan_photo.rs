//! Scan a photo for a watermarked region and print what the cascade did.
//!
//! The real watermark decoder is an external model; this example plugs in
//! a stub so the detection side can be exercised on any image:
//!
//! ```text
//! cargo run --example scan_photo -- photo.jpg
//! ```

use image::RgbImage;
use wmscan::{scan_path, DecodeReading, ScanOutcome, WatermarkDecoder};

/// Stand-in for the model-backed decoder: reports "present" for any
/// rectified image that is not mostly blank, so the cascade's choice of
/// strategy and corners can be inspected.
struct StubDecoder;

impl WatermarkDecoder for StubDecoder {
    fn decode(&self, rectified: &RgbImage) -> DecodeReading {
        let mean: f64 = rectified
            .pixels()
            .map(|p| (p.0[0] as f64 + p.0[1] as f64 + p.0[2] as f64) / 3.0)
            .sum::<f64>()
            / (rectified.width() as f64 * rectified.height() as f64);
        if mean < 5.0 {
            return DecodeReading::absent();
        }
        DecodeReading {
            symbol: "STUB0".to_string(),
            present: true,
            confidence: 0.5,
        }
    }
}

fn main() {
    wmscan::core::init_with_level(log::LevelFilter::Debug).expect("logger");

    let path = std::env::args()
        .nth(1)
        .expect("usage: scan_photo <image-path>");

    match scan_path(&path, &StubDecoder) {
        Ok(ScanOutcome::Decoded(attempt)) => {
            println!("decoded '{}' via {}", attempt.symbol, attempt.strategy);
            for (label, p) in ["TL", "TR", "BR", "BL"].iter().zip(attempt.corners.corners()) {
                println!("  {label}: ({:.1}, {:.1})", p.x, p.y);
            }
        }
        Ok(ScanOutcome::NotFound { attempts }) => {
            println!("no watermarked region found:");
            for a in attempts {
                println!("  {}: {:?}", a.strategy, a.reason);
            }
        }
        Err(err) => {
            eprintln!("scan failed: {err}");
            std::process::exit(1);
        }
    }
}
