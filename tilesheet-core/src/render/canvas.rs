//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::Error;
use crate::render::layer::Layer;
use crate::render::style::{LineStyle, OverlayStyle, PointStyle, Rgba};
use crate::vector::{Position, Track, Waypoint};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tile_grid::{lonlat_to_merc, Extent, MERC_MAX};
use tiny_skia::{
    Color, FillRule, FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

/// Everything a canvas needs to draw one sheet
#[derive(Clone, Debug)]
pub struct Composition {
    /// Output size in pixels
    pub width: u32,
    pub height: u32,
    /// Visible area in Spherical Mercator meters.
    /// `maxx` exceeds the world edge when crossing the antimeridian.
    pub viewport: Extent,
    pub layers: Vec<Layer>,
    /// Output format name, e.g. `png` or `jpeg`
    pub format: String,
    pub scale_factor: f64,
}

/// Renders a composition into an output file
pub trait MapCanvas {
    fn render(&mut self, composition: &Composition, path: &str) -> Result<(), Error>;
}

/// Software rasterizer writing image files
pub struct RasterCanvas {
    style: OverlayStyle,
}

impl RasterCanvas {
    pub fn new(style: OverlayStyle) -> RasterCanvas {
        RasterCanvas { style }
    }
}

impl MapCanvas for RasterCanvas {
    fn render(&mut self, composition: &Composition, path: &str) -> Result<(), Error> {
        let output_error = |reason: String| Error::Output {
            path: path.to_string(),
            reason,
        };
        let mut pixmap = Pixmap::new(composition.width, composition.height).ok_or_else(|| {
            output_error(format!(
                "invalid canvas size {} x {}",
                composition.width, composition.height
            ))
        })?;
        pixmap.fill(Color::WHITE);
        let view = View::new(composition);
        let scale = composition.scale_factor as f32;

        for layer in &composition.layers {
            match layer {
                Layer::RasterTile {
                    tile,
                    data,
                    footprint,
                } => {
                    let tile_pixmap = match decode_tile(data) {
                        Ok(tile_pixmap) => tile_pixmap,
                        Err(e) => {
                            warn!("Skipping undecodable tile {}: {}", tile, e);
                            continue;
                        }
                    };
                    let (x0, y0) = view.project(footprint.lon_low, footprint.lat_high);
                    let (x1, y1) = view.project(footprint.lon_high, footprint.lat_low);
                    let sx = (x1 - x0) / tile_pixmap.width() as f64;
                    let sy = (y1 - y0) / tile_pixmap.height() as f64;
                    let paint = PixmapPaint {
                        quality: FilterQuality::Bilinear,
                        ..PixmapPaint::default()
                    };
                    pixmap.draw_pixmap(
                        0,
                        0,
                        tile_pixmap.as_ref(),
                        &paint,
                        Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, x0 as f32, y0 as f32),
                        None,
                    );
                }
                Layer::GpxTrack { tracks, .. } => {
                    draw_tracks(&mut pixmap, &view, tracks, &self.style.track, scale)
                }
                Layer::OverviewTrack { tracks, .. } => {
                    draw_tracks(&mut pixmap, &view, tracks, &self.style.overview, scale)
                }
                Layer::Waypoints { waypoints, .. } => {
                    draw_waypoints(&mut pixmap, &view, waypoints, &self.style.waypoint, scale)
                }
            }
        }
        save(&pixmap, &composition.format, path).map_err(output_error)
    }
}

/// Projection of WGS84 positions to canvas pixels
struct View {
    extent: Extent,
    width: f64,
    height: f64,
}

impl View {
    /// Grows the viewport to the canvas aspect ratio, keeping its center
    fn new(composition: &Composition) -> View {
        let mut extent = composition.viewport.clone();
        let width = composition.width as f64;
        let height = composition.height as f64;
        let canvas_ratio = width / height;
        if extent.width() / extent.height() < canvas_ratio {
            let grow = (extent.height() * canvas_ratio - extent.width()) / 2.0;
            extent.minx -= grow;
            extent.maxx += grow;
        } else {
            let grow = (extent.width() / canvas_ratio - extent.height()) / 2.0;
            extent.miny -= grow;
            extent.maxy += grow;
        }
        View {
            extent,
            width,
            height,
        }
    }

    fn wraps(&self) -> bool {
        self.extent.maxx > MERC_MAX
    }

    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (mut x, y) = lonlat_to_merc(lon, lat);
        // western hemisphere continues east of the antimeridian
        let center = (self.extent.minx + self.extent.maxx) / 2.0;
        if self.wraps() && x < center - MERC_MAX {
            x += 2.0 * MERC_MAX;
        }
        (
            (x - self.extent.minx) / self.extent.width() * self.width,
            (self.extent.maxy - y) / self.extent.height() * self.height,
        )
    }

    fn project_position(&self, pos: &Position) -> (f32, f32) {
        let (x, y) = self.project(pos.lon, pos.lat);
        (x as f32, y as f32)
    }
}

fn paint(color: &Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn draw_tracks(pixmap: &mut Pixmap, view: &View, tracks: &[Track], style: &LineStyle, scale: f32) {
    let paint = paint(&style.color);
    let stroke = Stroke {
        width: style.width * scale,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    for segment in tracks.iter().flat_map(|track| track.segments.iter()) {
        let mut pb = PathBuilder::new();
        for (i, pos) in segment.iter().enumerate() {
            let (x, y) = view.project_position(pos);
            if i == 0 {
                pb.move_to(x, y);
            } else {
                pb.line_to(x, y);
            }
        }
        // single points yield no path
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

fn draw_waypoints(
    pixmap: &mut Pixmap,
    view: &View,
    waypoints: &[Waypoint],
    style: &PointStyle,
    scale: f32,
) {
    let paint = paint(&style.color);
    for waypoint in waypoints {
        let (x, y) = view.project_position(&waypoint.position);
        if let Some(circle) = PathBuilder::from_circle(x, y, style.radius * scale) {
            pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn decode_tile(data: &[u8]) -> Result<Pixmap, String> {
    let img = image::load_from_memory(data)
        .map_err(|e| e.to_string())?
        .to_rgba8();
    let (w, h) = img.dimensions();
    let mut rgba = img.into_raw();
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for c in px.iter_mut().take(3) {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
    let size = IntSize::from_wh(w, h).ok_or_else(|| format!("empty tile image {} x {}", w, h))?;
    Pixmap::from_vec(rgba, size).ok_or_else(|| "invalid tile image buffer".to_string())
}

/// Image format from an output format name like `png256` or `jpeg85`
pub fn image_format(format: &str) -> Option<ImageFormat> {
    let format = format.to_lowercase();
    if format.starts_with("png") {
        Some(ImageFormat::Png)
    } else if format.starts_with("jpeg") || format == "jpg" {
        Some(ImageFormat::Jpeg)
    } else {
        ImageFormat::from_extension(&format)
    }
}

fn save(pixmap: &Pixmap, format: &str, path: &str) -> Result<(), String> {
    let image_format =
        image_format(format).ok_or_else(|| format!("unsupported output format '{}'", format))?;
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let img = RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| "invalid canvas buffer".to_string())?;
    let result = match image_format {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .save_with_format(path, image_format),
        _ => img.save_with_format(path, image_format),
    };
    result.map_err(|e| e.to_string())
}

#[test]
fn test_image_format() {
    assert_eq!(image_format("png"), Some(ImageFormat::Png));
    assert_eq!(image_format("png256"), Some(ImageFormat::Png));
    assert_eq!(image_format("JPEG85"), Some(ImageFormat::Jpeg));
    assert_eq!(image_format("jpg"), Some(ImageFormat::Jpeg));
    assert_eq!(image_format("tif"), Some(ImageFormat::Tiff));
    assert_eq!(image_format("svgz"), None);
}

#[test]
fn test_view_aspect() {
    let composition = Composition {
        width: 200,
        height: 100,
        viewport: Extent {
            minx: 0.0,
            miny: 0.0,
            maxx: 1000.0,
            maxy: 1000.0,
        },
        layers: Vec::new(),
        format: "png".to_string(),
        scale_factor: 1.0,
    };
    let view = View::new(&composition);
    assert_eq!(view.extent.minx, -500.0);
    assert_eq!(view.extent.maxx, 1500.0);
    assert_eq!(view.extent.miny, 0.0);
    let (x, y) = view.project(0.0, 0.0);
    assert!((x - 50.0).abs() < 1e-9);
    assert!((y - 100.0).abs() < 1e-9);
}
