pub mod alignment;
pub mod ema;
pub mod types;

pub use alignment::{AlignmentDetector, Verdict};
pub use types::Signal;
