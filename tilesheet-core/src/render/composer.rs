//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::{BoundingBox, Error, SheetSpec};
use crate::provider::{TileError, TileProvider};
use crate::render::canvas::{Composition, MapCanvas};
use crate::render::layer::{Layer, SpecialOverlay};
use crate::vector::VectorSource;
use tile_grid::extent_wgs84_to_merc;

/// Parameters of one sheet
#[derive(Clone, Debug)]
pub struct SheetRequest {
    pub sheet: SheetSpec,
    pub bbox: BoundingBox,
    pub zoom: u8,
    pub track_files: Vec<String>,
    pub overlay: SpecialOverlay,
    pub output_format: String,
    /// Output file name without extension
    pub basefilename: String,
}

impl SheetRequest {
    pub fn output_path(&self) -> String {
        format!("{}.{}", self.basefilename, self.output_format)
    }
}

/// Assembles the ordered layer stack of a sheet
pub struct SheetComposer<'a, P: TileProvider, V: VectorSource> {
    provider: &'a P,
    vectors: &'a V,
}

impl<'a, P: TileProvider, V: VectorSource> SheetComposer<'a, P, V> {
    pub fn new(provider: &'a P, vectors: &'a V) -> Self {
        SheetComposer { provider, vectors }
    }

    /// Raster tiles first, then the GPX tracks, then the special overlay
    pub fn compose(&self, request: &SheetRequest) -> Result<Composition, Error> {
        let (width, height) = request.sheet.canvas_size();
        let viewport = extent_wgs84_to_merc(&request.bbox.unwrapped_extent());
        let mut layers = Vec::new();

        let tiles = self.provider.tiles_list(&request.bbox, request.zoom)?;
        info!(
            "Rendering {} tiles at zoom level {}",
            tiles.len(),
            request.zoom
        );
        let mut missing = 0;
        for tile in tiles {
            let data = match self.provider.tile(&tile) {
                Ok(data) => data,
                Err(TileError::Unavailable { reason, .. }) => {
                    warn!("missing tile {}: {}", tile, reason);
                    missing += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            layers.push(Layer::RasterTile {
                footprint: self.provider.tile_footprint(&tile),
                tile,
                data,
            });
        }
        if missing > 0 {
            warn!("{} tiles missing, the map has gaps", missing);
        }

        for path in &request.track_files {
            layers.push(Layer::GpxTrack {
                path: path.clone(),
                tracks: self.vectors.tracks(path)?,
            });
        }

        match &request.overlay {
            SpecialOverlay::Overview(path) => layers.push(Layer::OverviewTrack {
                path: path.clone(),
                tracks: self.vectors.tracks(path)?,
            }),
            SpecialOverlay::Waypoints(path) => layers.push(Layer::Waypoints {
                path: path.clone(),
                waypoints: self.vectors.waypoints(path)?,
            }),
            SpecialOverlay::None => {}
        }

        Ok(Composition {
            width,
            height,
            viewport,
            layers,
            format: request.output_format.clone(),
            scale_factor: request.sheet.scale_factor,
        })
    }

    /// Compose and draw the sheet, returns the output file path
    pub fn render<C: MapCanvas>(
        &self,
        request: &SheetRequest,
        canvas: &mut C,
    ) -> Result<String, Error> {
        let composition = self.compose(request)?;
        let path = request.output_path();
        debug!(
            "Drawing {} layers on {} x {} px",
            composition.layers.len(),
            composition.width,
            composition.height
        );
        canvas.render(&composition, &path)?;
        info!("Map written to {}", path);
        Ok(path)
    }
}
