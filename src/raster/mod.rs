//! Rasterization
//!
//! Upload bytes in, one RGB bitmap per page out.

mod error;
mod rasterizer;
mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;

pub use error::{RasterError, RasterResult};
pub use rasterizer::{RasterEvent, Rasterizer};
pub use types::{PageImage, SourceFormat, POINTS_PER_INCH};
