//! A library for map tile grid calculations
//!
//! ## Web Mercator grids
//!
//! ```rust
//! use tile_grid::{Extent, Grid, Origin};
//!
//! let grid = Grid::web_mercator_tiles(256, Origin::TopLeft);
//! let extent = grid.tile_extent(0, 0, 1);
//! assert_eq!(extent.maxx, 0.0);
//! ```
//!
//! ## Grid iterators
//!
//! ```rust
//! use tile_grid::{Grid, GridIterator, Origin};
//!
//! let grid = Grid::web_mercator_tiles(256, Origin::TopLeft);
//! let limit = grid.level_tile_limits(&grid.extent, 2, 0);
//! for (z, x, y) in GridIterator::level(2, limit) {
//!     println!("Tile {}/{}/{}", z, x, y);
//! }
//! ```

mod grid;
mod grid_iterator;
#[cfg(test)]
mod grid_test;

pub use grid::{
    extent_merc_to_wgs84, extent_wgs84_to_merc, lonlat_to_merc, merc_to_lonlat, Extent,
    ExtentInt, Grid, Origin, EARTH_RADIUS, MERC_MAX, MERC_MAX_LAT,
};
pub use grid_iterator::GridIterator;
