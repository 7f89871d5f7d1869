//! All kinds of errors in this crate.

use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// Every variant except [`Uninitialized`](Error::Uninitialized) is a
/// configuration error, and is raised by `initialize` before any cell
/// is touched.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Cell size should be positive.
    CellSizeError,
    /// A {width}x{height} image with cell size {cell_size} gives a {rows}x{columns} grid, but at least 3x3 is required.
    GridSizeError {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Cell size in pixels.
        cell_size: u32,
        /// Resulting number of rows.
        rows: usize,
        /// Resulting number of columns.
        columns: usize,
    },
    /// The generation budget should be at least 2, got {0}.
    GenerationsError(usize),
    /// The {0} ratio should be between 0 and 1.
    RatioError(&'static str),
    /// The sickness duration should be positive.
    SicknessDurationError,
    /// The automaton has not been initialized yet.
    Uninitialized,
}
