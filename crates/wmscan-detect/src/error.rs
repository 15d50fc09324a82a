/// Fatal precondition failures that abort a scan before any strategy
/// runs. Strategy misses and cascade exhaustion are *not* errors; they
/// surface as [`crate::ScanOutcome`] values.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("empty input image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}
