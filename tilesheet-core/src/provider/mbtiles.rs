//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::provider::tiles_manager::TileSource;
use crate::provider::{TileError, TileRef, TileScheme};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

/// Raster tiles read from an MBTiles archive
///
/// MBTiles stores rows in TMS order, WMTS rows are flipped on lookup.
pub struct MbTiles {
    path: String,
    scheme: TileScheme,
    conn: Connection,
}

impl MbTiles {
    pub fn open(path: &str, scheme: TileScheme) -> Result<MbTiles, TileError> {
        let conn = Connection::open_with_flags(
            Path::new(path),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| TileError::Source {
            name: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(MbTiles {
            path: path.to_string(),
            scheme,
            conn,
        })
    }

    /// Row number as stored in the archive
    pub fn tile_row(&self, tile: &TileRef) -> u32 {
        match self.scheme {
            TileScheme::Tms => tile.y,
            TileScheme::Wmts => tile.flipped_y(),
        }
    }
}

impl TileSource for MbTiles {
    fn name(&self) -> String {
        Path::new(&self.path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "mbtiles".to_string())
    }
    fn info(&self) -> String {
        format!("MBTiles archive: {}", self.path)
    }
    fn fetch(&self, tile: &TileRef) -> Result<Vec<u8>, TileError> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT tile_data FROM tiles \
                 WHERE zoom_level = ? AND tile_column = ? AND tile_row = ?",
            )
            .map_err(|e| TileError::Source {
                name: self.path.clone(),
                reason: e.to_string(),
            })?;
        let data = stmt
            .query_row((tile.zoom, tile.x, self.tile_row(tile)), |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()
            .map_err(|e| TileError::unavailable(tile, e.to_string()))?;
        data.ok_or_else(|| TileError::unavailable(tile, format!("not found in {}", self.path)))
    }
}
