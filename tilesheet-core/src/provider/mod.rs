//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Raster tile providers

pub mod mbtiles;
pub mod remote;
pub mod tiles_manager;


pub use self::mbtiles::MbTiles;
pub use self::remote::RemoteTiles;
pub use self::tiles_manager::{TileSource, Tilesource, TilesManager};

use crate::core::{BoundingBox, Error};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tile_grid::Origin;

/// Tile address in the provider's row numbering scheme
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TileRef {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileRef {
    pub fn new(zoom: u8, x: u32, y: u32) -> TileRef {
        TileRef { zoom, x, y }
    }
    /// Row number counted from the opposite edge (TMS <-> XYZ)
    pub fn flipped_y(&self) -> u32 {
        (1u32 << self.zoom).saturating_sub(1).saturating_sub(self.y)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "zoom={} x={} y={}", self.zoom, self.x, self.y)
    }
}

/// Geographic rectangle covered by a tile, in WGS84 degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileFootprint {
    pub lon_low: f64,
    pub lat_low: f64,
    pub lon_high: f64,
    pub lat_high: f64,
}

/// Tile row numbering
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TileScheme {
    /// Row 0 at the south edge
    Tms,
    /// Row 0 at the north edge (also known as XYZ)
    Wmts,
}

impl TileScheme {
    pub fn origin(&self) -> Origin {
        match self {
            TileScheme::Tms => Origin::BottomLeft,
            TileScheme::Wmts => Origin::TopLeft,
        }
    }
}

impl FromStr for TileScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tms" => Ok(TileScheme::Tms),
            "wmts" | "xyz" => Ok(TileScheme::Wmts),
            _ => Err(format!("unknown tile scheme '{}' (expected tms or wmts)", s)),
        }
    }
}

impl fmt::Display for TileScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TileScheme::Tms => write!(f, "tms"),
            TileScheme::Wmts => write!(f, "wmts"),
        }
    }
}

#[derive(Error, Debug)]
pub enum TileError {
    /// Tile neither cached nor retrievable. Rendering continues with a gap.
    #[error("tile {tile} unavailable: {reason}")]
    Unavailable { tile: TileRef, reason: String },
    /// The tile source itself is unusable
    #[error("tile source '{name}' failed: {reason}")]
    Source { name: String, reason: String },
}

impl TileError {
    pub fn unavailable<S: Into<String>>(tile: &TileRef, reason: S) -> TileError {
        TileError::Unavailable {
            tile: *tile,
            reason: reason.into(),
        }
    }
}

pub trait TileProvider {
    /// Tiles covering `bbox` at `zoom`, in fetch order
    fn tiles_list(&self, bbox: &BoundingBox, zoom: u8) -> Result<Vec<TileRef>, Error>;
    /// Encoded tile image
    fn tile(&self, tile: &TileRef) -> Result<Vec<u8>, TileError>;
    /// Geographic footprint of a tile
    fn tile_footprint(&self, tile: &TileRef) -> TileFootprint;
}
