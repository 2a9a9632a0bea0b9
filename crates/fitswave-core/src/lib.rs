pub mod consts;
pub mod display;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod raster;
pub mod wavelet;
