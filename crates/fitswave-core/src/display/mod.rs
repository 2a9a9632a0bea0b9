pub mod resample;
pub mod stretch;

pub use resample::resample;
pub use stretch::normalize;
