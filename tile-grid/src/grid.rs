//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//!Tile grids

use std::f64::consts;

/// Spherical Mercator earth radius in meters
pub const EARTH_RADIUS: f64 = 6378137.0;
/// Half of the Spherical Mercator world width in meters
pub const MERC_MAX: f64 = 20037508.3427892480;
/// Latitude where Spherical Mercator becomes square
pub const MERC_MAX_LAT: f64 = 85.0511287798066;
/// Resolution of zoom level 0 for 256 pixel tiles, rounded to 10 digits
const PIXEL_WIDTH_Z0: f64 = 156543.0339280410;
/// Number of zoom levels of the Web Mercator grid
const MERC_LEVELS: u8 = 23;

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
}

/// Min and max grid cell numbers
#[derive(PartialEq, Clone, Debug)]
pub struct ExtentInt {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

// Max grid cell numbers
type CellIndex = (u32, u32);

/// Grid origin
///
/// `BottomLeft` numbers rows from the south like TMS,
/// `TopLeft` numbers rows from the north like WMTS and XYZ.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Origin {
    TopLeft,
    BottomLeft,
}

/// Tile grid
#[derive(Clone, Debug)]
pub struct Grid {
    /// The width of an individual tile, in pixels.
    width: u16,
    /// The height of an individual tile, in pixels.
    height: u16,
    /// The geographical extent covered by the grid, in meters.
    /// The (minx,miny) point defines the origin of a `BottomLeft` grid,
    /// (minx,maxy) the origin of a `TopLeft` grid.
    /// The (maxx,maxy) point is used to determine how many tiles there are for each zoom level.
    pub extent: Extent,
    /// Meters per pixel for each of the zoom levels defined by the grid,
    /// ordered from largest to smallest. The largest value corresponds to zoom level 0.
    resolutions: Vec<f64>,
    /// maxx/maxy for each resolution
    level_max: Vec<CellIndex>,
    /// Grid origin
    pub origin: Origin,
}

impl Grid {
    /// Web Mercator grid with square tiles of `tile_size` pixels
    pub fn web_mercator_tiles(tile_size: u16, origin: Origin) -> Grid {
        let z0 = PIXEL_WIDTH_Z0 * 256.0 / tile_size as f64;
        let resolutions = (0..MERC_LEVELS)
            .map(|z| z0 / (z as f64).exp2())
            .collect();
        Grid::new(
            tile_size,
            tile_size,
            Extent {
                minx: -MERC_MAX,
                miny: -MERC_MAX,
                maxx: MERC_MAX,
                maxy: MERC_MAX,
            },
            resolutions,
            origin,
        )
    }

    pub fn new(
        width: u16,
        height: u16,
        extent: Extent,
        resolutions: Vec<f64>,
        origin: Origin,
    ) -> Grid {
        let mut grid = Grid {
            width,
            height,
            extent,
            resolutions,
            origin,
            level_max: Vec::new(),
        };
        grid.level_max = grid.level_max();
        grid
    }
    pub fn tile_width(&self) -> u16 {
        self.width
    }
    pub fn nlevels(&self) -> u8 {
        self.resolutions.len() as u8
    }
    pub fn maxzoom(&self) -> u8 {
        self.nlevels() - 1
    }
    /// Extent of a given tile, rows counted from the grid origin
    pub fn tile_extent(&self, xtile: u32, ytile: u32, zoom: u8) -> Extent {
        // based on mapcache_grid_get_tile_extent
        let res = self.resolutions[zoom as usize];
        let tile_sx = self.width as f64;
        let tile_sy = self.height as f64;
        match self.origin {
            Origin::BottomLeft => Extent {
                minx: self.extent.minx + (res * xtile as f64 * tile_sx),
                miny: self.extent.miny + (res * ytile as f64 * tile_sy),
                maxx: self.extent.minx + (res * (xtile + 1) as f64 * tile_sx),
                maxy: self.extent.miny + (res * (ytile + 1) as f64 * tile_sy),
            },
            Origin::TopLeft => Extent {
                minx: self.extent.minx + (res * xtile as f64 * tile_sx),
                miny: self.extent.maxy - (res * (ytile + 1) as f64 * tile_sy),
                maxx: self.extent.minx + (res * (xtile + 1) as f64 * tile_sx),
                maxy: self.extent.maxy - (res * ytile as f64 * tile_sy),
            },
        }
    }
    /// (maxx, maxy) of grid level
    pub(crate) fn level_limit(&self, zoom: u8) -> CellIndex {
        let res = self.resolutions[zoom as usize];
        let unitheight = self.height as f64 * res;
        let unitwidth = self.width as f64 * res;

        let maxy =
            ((self.extent.maxy - self.extent.miny - 0.01 * unitheight) / unitheight).ceil() as u32;
        let maxx =
            ((self.extent.maxx - self.extent.minx - 0.01 * unitwidth) / unitwidth).ceil() as u32;
        (maxx, maxy)
    }
    /// (maxx, maxy) of all grid levels
    fn level_max(&self) -> Vec<CellIndex> {
        (0..self.nlevels())
            .map(|zoom| self.level_limit(zoom))
            .collect()
    }
    /// Tile index limits covering extent at a single zoom level
    pub fn level_tile_limits(&self, extent: &Extent, zoom: u8, tolerance: i32) -> ExtentInt {
        // Based on mapcache_grid_compute_limits
        const EPSILON: f64 = 0.0000001;
        let res = self.resolutions[zoom as usize];
        let unitheight = self.height as f64 * res;
        let unitwidth = self.width as f64 * res;
        let (level_maxx, level_maxy) = self.level_max[zoom as usize];

        let (mut minx, mut maxx, mut miny, mut maxy) = match self.origin {
            Origin::BottomLeft => (
                (((extent.minx - self.extent.minx) / unitwidth + EPSILON).floor() as i32)
                    - tolerance,
                (((extent.maxx - self.extent.minx) / unitwidth - EPSILON).ceil() as i32)
                    + tolerance,
                (((extent.miny - self.extent.miny) / unitheight + EPSILON).floor() as i32)
                    - tolerance,
                (((extent.maxy - self.extent.miny) / unitheight - EPSILON).ceil() as i32)
                    + tolerance,
            ),
            Origin::TopLeft => (
                (((extent.minx - self.extent.minx) / unitwidth + EPSILON).floor() as i32)
                    - tolerance,
                (((extent.maxx - self.extent.minx) / unitwidth - EPSILON).ceil() as i32)
                    + tolerance,
                (((self.extent.maxy - extent.maxy) / unitheight + EPSILON).floor() as i32)
                    - tolerance,
                (((self.extent.maxy - extent.miny) / unitheight - EPSILON).ceil() as i32)
                    + tolerance,
            ),
        };

        // to avoid requesting out-of-range tiles
        if minx < 0 {
            minx = 0;
        }
        if maxx > level_maxx as i32 {
            maxx = level_maxx as i32
        };
        if miny < 0 {
            miny = 0
        };
        if maxy > level_maxy as i32 {
            maxy = level_maxy as i32
        };

        ExtentInt {
            minx: minx as u32,
            maxx: maxx as u32,
            miny: miny as u32,
            maxy: maxy as u32,
        }
    }
}

/// Returns the Spherical Mercator (x, y) in meters
///
/// Latitudes are truncated to the square Mercator world.
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.max(-MERC_MAX_LAT).min(MERC_MAX_LAT);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Returns (lon, lat) in degrees of a Spherical Mercator position
pub fn merc_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - consts::PI * 0.5).to_degrees();
    (lon, lat)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    let (minx, miny) = lonlat_to_merc(extent.minx, extent.miny);
    let (maxx, maxy) = lonlat_to_merc(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}

/// Geographic extent of a projected extent
pub fn extent_merc_to_wgs84(extent: &Extent) -> Extent {
    let (minx, miny) = merc_to_lonlat(extent.minx, extent.miny);
    let (maxx, maxy) = merc_to_lonlat(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}
