pub mod dwt;
pub mod filter;

pub use dwt::{decompose, DecompositionResult, DetailBands, Orientation};
pub use filter::WaveletKind;
