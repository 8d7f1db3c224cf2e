//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::{Cache, Tilecache};
use crate::core::{BoundingBox, Config, Error, TilesConfig};
use crate::provider::mbtiles::MbTiles;
use crate::provider::remote::RemoteTiles;
use crate::provider::{TileError, TileFootprint, TileProvider, TileRef, TileScheme};
use tile_grid::{extent_merc_to_wgs84, extent_wgs84_to_merc, Grid, GridIterator};

/// Origin of tile images
pub trait TileSource {
    /// Name used as cache namespace
    fn name(&self) -> String;
    fn info(&self) -> String;
    fn fetch(&self, tile: &TileRef) -> Result<Vec<u8>, TileError>;
}

pub enum Tilesource {
    MbTiles(MbTiles),
    Remote(RemoteTiles),
}

impl TileSource for Tilesource {
    fn name(&self) -> String {
        match self {
            &Tilesource::MbTiles(ref src) => src.name(),
            &Tilesource::Remote(ref src) => src.name(),
        }
    }
    fn info(&self) -> String {
        match self {
            &Tilesource::MbTiles(ref src) => src.info(),
            &Tilesource::Remote(ref src) => src.info(),
        }
    }
    fn fetch(&self, tile: &TileRef) -> Result<Vec<u8>, TileError> {
        match self {
            &Tilesource::MbTiles(ref src) => src.fetch(tile),
            &Tilesource::Remote(ref src) => src.fetch(tile),
        }
    }
}

impl Config<TilesConfig> for Tilesource {
    fn from_config(config: &TilesConfig) -> Result<Self, Error> {
        if let Some(ref path) = config.mbtiles_file {
            Ok(Tilesource::MbTiles(MbTiles::open(path, config.tile_scheme)?))
        } else {
            Ok(Tilesource::Remote(RemoteTiles::new(
                config.tiles_url(),
                config.tiles_subdomains(),
            )?))
        }
    }
}

/// Cached tile provider on a Web Mercator grid
pub struct TilesManager<S: TileSource = Tilesource> {
    grid: Grid,
    scheme: TileScheme,
    source: S,
    cache: Tilecache,
    extension: String,
}

impl<S: TileSource> TilesManager<S> {
    pub fn new(
        source: S,
        cache: Tilecache,
        tile_size: u16,
        scheme: TileScheme,
        extension: &str,
    ) -> TilesManager<S> {
        TilesManager {
            grid: Grid::web_mercator_tiles(tile_size, scheme.origin()),
            scheme,
            source,
            cache,
            extension: extension.to_string(),
        }
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn scheme(&self) -> TileScheme {
        self.scheme
    }
    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn info(&self) -> String {
        format!(
            "{} ({} tiles of {} px), {}",
            self.source.info(),
            self.scheme,
            self.grid.tile_width(),
            self.cache.info()
        )
    }
    /// Cache location relative to the cache base directory
    ///
    /// Rows are always stored in XYZ numbering, independent of the tile scheme.
    pub fn cache_path(&self, tile: &TileRef) -> String {
        let row = match self.scheme {
            TileScheme::Wmts => tile.y,
            TileScheme::Tms => tile.flipped_y(),
        };
        format!(
            "{}/{}/{}/{}.{}",
            self.source.name(),
            tile.zoom,
            tile.x,
            row,
            self.extension
        )
    }
}

impl Config<TilesConfig> for TilesManager<Tilesource> {
    fn from_config(config: &TilesConfig) -> Result<Self, Error> {
        if config.tile_size == 0 {
            return Err(Error::config("tile size must be positive"));
        }
        let source = Tilesource::from_config(config)?;
        let cache = Tilecache::from_config(config)?;
        Ok(TilesManager::new(
            source,
            cache,
            config.tile_size,
            config.tile_scheme,
            &config.tile_extension(),
        ))
    }
}

impl<S: TileSource> TileProvider for TilesManager<S> {
    fn tiles_list(&self, bbox: &BoundingBox, zoom: u8) -> Result<Vec<TileRef>, Error> {
        if zoom > self.grid.maxzoom() {
            return Err(Error::config(format!(
                "zoom level {} exceeds maximum zoom level {} of the tile grid",
                zoom,
                self.grid.maxzoom()
            )));
        }
        let mut tiles = Vec::new();
        for extent in bbox.split_extents() {
            let merc = extent_wgs84_to_merc(&extent);
            let limit = self.grid.level_tile_limits(&merc, zoom, 0);
            tiles.extend(GridIterator::level(zoom, limit).map(|(z, x, y)| TileRef::new(z, x, y)));
        }
        Ok(tiles)
    }

    fn tile(&self, tile: &TileRef) -> Result<Vec<u8>, TileError> {
        let path = self.cache_path(tile);
        let mut data = Vec::new();
        let hit = self.cache.read(&path, |f| {
            if let Err(e) = f.read_to_end(&mut data) {
                warn!("Error reading cached tile {}: {}", path, e);
            }
        });
        if hit && !data.is_empty() {
            return Ok(data);
        }
        debug!("Fetching tile {} from {}", tile, self.source.name());
        let data = self.source.fetch(tile)?;
        if let Err(e) = self.cache.write(&path, &data) {
            warn!("Error writing tile {} into cache: {}", path, e);
        }
        Ok(data)
    }

    fn tile_footprint(&self, tile: &TileRef) -> TileFootprint {
        let extent = extent_merc_to_wgs84(&self.grid.tile_extent(tile.x, tile.y, tile.zoom));
        TileFootprint {
            lon_low: extent.minx,
            lat_low: extent.miny,
            lon_high: extent.maxx,
            lat_high: extent.maxy,
        }
    }
}
