//! Redraw closed 2D paths as sums of rotating epicycles.
//!
//! A sampled path is split into its X and Y coordinate sequences, each sequence
//! is decomposed by a discrete Fourier transform into frequency components, and
//! an animation sums the components as chained rotating vectors so that one full
//! revolution of the chains retraces the original path.

#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub mod epicycles;
pub mod fourier;
pub mod program;
pub mod render;

pub use epicycles::epicycle_chain;
pub use epicycles::epicycle_position;
pub use epicycles::Animation;
pub use epicycles::Clock;
pub use epicycles::Frame;
pub use epicycles::Options;
pub use epicycles::SystemClock;
pub use fourier::sort_by_amplitude_descending;
pub use fourier::transform;
pub use fourier::FrequencyComponent;
pub use render::fit_polylines;
pub use render::load_polyline_from_csv_file;
pub use render::load_polyline_from_svg_file;
pub use render::print_svg_polylines;
pub use render::Scale;
