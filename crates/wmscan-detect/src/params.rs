use serde::{Deserialize, Serialize};

use wmscan_core::{DEFAULT_EPSILON_RATIO, DEFAULT_OUTPUT_SIZE};

/// Configuration for the scan cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanParams {
    /// Side length of the rectified square handed to the decoder.
    pub output_size: u32,
    /// Document-outline strategy parameters.
    pub document: DocumentParams,
    /// General contour strategy parameters.
    pub contour: ContourParams,
    /// Harris-corner strategy parameters.
    pub harris: HarrisParams,
    /// Edge/Hough-line strategy parameters.
    pub edge: EdgeParams,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            output_size: DEFAULT_OUTPUT_SIZE,
            document: DocumentParams::default(),
            contour: ContourParams::default(),
            harris: HarrisParams::default(),
            edge: EdgeParams::default(),
        }
    }
}

/// Parameters for the document-outline strategy (printed photos).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentParams {
    /// Gaussian blur sigma applied before edge detection.
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// How many of the largest outer contours to try.
    pub max_contours: usize,
    /// Accept a quad only above this fraction of the frame area.
    pub min_area_ratio: f32,
    /// Polygon approximation tolerance, fraction of contour perimeter.
    pub epsilon_ratio: f32,
}

impl Default for DocumentParams {
    fn default() -> Self {
        Self {
            blur_sigma: 1.4,
            canny_low: 50.0,
            canny_high: 150.0,
            max_contours: 10,
            min_area_ratio: 0.10,
            epsilon_ratio: DEFAULT_EPSILON_RATIO,
        }
    }
}

/// Parameters for the general contour strategy (digital images and
/// screenshots).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContourParams {
    /// Neighborhood radius for the adaptive threshold.
    pub block_radius: u32,
    /// Contours below this absolute area (px^2) are ignored.
    pub min_area: f32,
    /// Accepted bounding-box aspect ratio range (width / height).
    pub min_aspect: f32,
    pub max_aspect: f32,
    /// Candidates covering at least this fraction of the frame are
    /// rejected as the degenerate full-frame border contour.
    pub max_area_ratio: f32,
    pub epsilon_ratio: f32,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            block_radius: 5,
            min_area: 1000.0,
            min_aspect: 0.5,
            max_aspect: 2.0,
            max_area_ratio: 0.98,
            epsilon_ratio: DEFAULT_EPSILON_RATIO,
        }
    }
}

/// Parameters for the Harris-corner strategy (complex scenes).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HarrisParams {
    /// Harris detector free parameter.
    pub k: f32,
    /// Radius of the structure-tensor summation window.
    pub block_radius: u32,
    /// Keep response pixels above `threshold_rel * max_response`.
    pub threshold_rel: f32,
}

impl Default for HarrisParams {
    fn default() -> Self {
        Self {
            k: 0.04,
            block_radius: 1,
            threshold_rel: 0.01,
        }
    }
}

/// Parameters for the edge/Hough-line strategy (high-contrast geometric
/// shapes).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Bilateral filter window size.
    pub bilateral_window: u32,
    pub sigma_color: f32,
    pub sigma_spatial: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Minimum Hough accumulator votes for a detected line.
    pub vote_threshold: u32,
    /// Non-maximum suppression radius in Hough space.
    pub suppression_radius: u32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            bilateral_window: 9,
            sigma_color: 75.0,
            sigma_spatial: 75.0,
            canny_low: 30.0,
            canny_high: 80.0,
            vote_threshold: 100,
            suppression_radius: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_round_trip_through_json() {
        let params = ScanParams::default();
        let json = serde_json::to_string(&params).expect("serialize");
        let back: ScanParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.output_size, params.output_size);
        assert_eq!(back.document.max_contours, params.document.max_contours);
        assert_eq!(back.edge.vote_threshold, params.edge.vote_threshold);
    }

    #[test]
    fn defaults_match_the_tuned_cascade() {
        let params = ScanParams::default();
        assert_eq!(params.output_size, 1024);
        assert!((params.document.min_area_ratio - 0.10).abs() < f32::EPSILON);
        assert!((params.contour.min_area - 1000.0).abs() < f32::EPSILON);
        assert!((params.harris.k - 0.04).abs() < f32::EPSILON);
        assert_eq!(params.edge.vote_threshold, 100);
    }
}
