//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Sheet composition and drawing

pub mod canvas;
pub mod composer;
pub mod layer;
pub mod style;

#[cfg(test)]
mod style_test;

pub use self::canvas::{Composition, MapCanvas, RasterCanvas};
pub use self::composer::{SheetComposer, SheetRequest};
pub use self::layer::{Layer, SpecialOverlay};
pub use self::style::{read_style, OverlayStyle};

use crate::core::config::DEFAULT_STYLE;
use crate::core::{calc_zoom_level, AreaSpec, BoundingBox, Config, Error, RenderConfig};
use crate::provider::TilesManager;
use crate::vector::GpxSource;

/// Overlay style of the config, the built-in style if the default stylesheet is absent
pub fn load_style(path: &str) -> Result<OverlayStyle, Error> {
    match read_style(path) {
        Ok(style) => Ok(style),
        Err(Error::Io(ref e))
            if e.kind() == std::io::ErrorKind::NotFound && path == DEFAULT_STYLE =>
        {
            warn!("Stylesheet '{}' not found, using built-in style", path);
            Ok(OverlayStyle::default())
        }
        Err(Error::Io(e)) => Err(Error::config(format!(
            "Could not open stylesheet '{}': {}",
            path, e
        ))),
        Err(e) => Err(e),
    }
}

/// Bounding box and zoom level of the sheet
pub fn plan_sheet(config: &RenderConfig, area: &AreaSpec) -> Result<(BoundingBox, u8), Error> {
    config.validate()?;
    let bbox = area.resolve(config.page_width_cm, config.page_height_cm)?;
    info!(
        "Bounding box: lon {} .. {}, lat {} .. {}",
        bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat
    );
    let zoom = calc_zoom_level(&config.sheet(), &bbox)?;
    debug!("Calculated zoomlevel = {}", zoom);
    Ok((bbox, zoom))
}

/// Render one map sheet, returns the path of the written file
pub fn render_sheet(config: &RenderConfig, area: &AreaSpec) -> Result<String, Error> {
    let (bbox, zoom) = plan_sheet(config, area)?;
    let sheet = config.sheet();

    let style = load_style(&config.hikingmapstyle)?;
    let tiles = TilesManager::from_config(&config.tiles)?;
    info!("Tiles: {}", tiles.info());

    let request = SheetRequest {
        sheet,
        bbox,
        zoom,
        track_files: config.track_files.clone(),
        overlay: config.overlay(),
        output_format: config.output_format.clone(),
        basefilename: config.basefilename.clone(),
    };
    let vectors = GpxSource;
    let composer = SheetComposer::new(&tiles, &vectors);
    composer.render(&request, &mut RasterCanvas::new(style))
}
