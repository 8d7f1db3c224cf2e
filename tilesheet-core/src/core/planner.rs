//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Page geometry: bounding box and zoom level selection

use crate::core::error::Error;
use std::f64::consts;
use tile_grid::Extent;

/// Mean earth circumference in km (equatorial 40075.017 km / meridional 40007.86 km)
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40041.44;
const CM_PER_KM: f64 = 100000.0;
pub const CM_PER_INCH: f64 = 2.54;

/// Geographic bounding box in WGS84 degrees
///
/// `max_lon < min_lon` denotes a box crossing the antimeridian.
/// Constructed boxes keep their longitudes within [-180, 180].
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, Error> {
        let whole_world = min_lon.is_finite() && max_lon.is_finite() && max_lon - min_lon >= 360.0;
        let (min_lon, max_lon) = if whole_world {
            (-180.0, 180.0)
        } else {
            (wrap_lon(min_lon), wrap_lon(max_lon))
        };
        let bbox = BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let values = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::config(format!("invalid bounding box {:?}", self)));
        }
        if self.min_lat < -90.0 || self.max_lat > 90.0 {
            return Err(Error::config(format!(
                "latitudes must lie within [-90, 90], got {} .. {}",
                self.min_lat, self.max_lat
            )));
        }
        if self.min_lat >= self.max_lat {
            return Err(Error::config(format!(
                "minimum latitude {} must be smaller than maximum latitude {}",
                self.min_lat, self.max_lat
            )));
        }
        Ok(())
    }

    /// A box reaching past 180 degrees is split into a western and an eastern part
    pub fn crosses_antimeridian(&self) -> bool {
        self.max_lon < self.min_lon
    }

    /// Longitude span in degrees, measured eastwards from `min_lon`
    pub fn lon_span(&self) -> f64 {
        let span = self.max_lon - self.min_lon;
        if span < 0.0 {
            span + 360.0
        } else {
            span
        }
    }

    /// Extent in degrees, with the eastern edge unwrapped past 180 when crossing the antimeridian
    pub fn unwrapped_extent(&self) -> Extent {
        Extent {
            minx: self.min_lon,
            miny: self.min_lat,
            maxx: self.min_lon + self.lon_span(),
            maxy: self.max_lat,
        }
    }

    /// Extents in degrees, split at the antimeridian
    pub fn split_extents(&self) -> Vec<Extent> {
        if self.crosses_antimeridian() {
            vec![
                Extent {
                    minx: self.min_lon,
                    miny: self.min_lat,
                    maxx: 180.0,
                    maxy: self.max_lat,
                },
                Extent {
                    minx: -180.0,
                    miny: self.min_lat,
                    maxx: self.max_lon,
                    maxy: self.max_lat,
                },
            ]
        } else {
            vec![self.unwrapped_extent()]
        }
    }
}

/// Longitude wrapped into [-180, 180]
pub fn wrap_lon(lon: f64) -> f64 {
    if lon < -180.0 || lon > 180.0 {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    } else {
        lon
    }
}

/// Physical page and rendering parameters
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct SheetSpec {
    pub page_width_cm: f64,
    pub page_height_cm: f64,
    pub dpi: u32,
    pub scale_factor: f64,
    pub tile_size: u16,
}

impl SheetSpec {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.page_width_cm > 0.0 && self.page_height_cm > 0.0) {
            return Err(Error::config(format!(
                "page size must be positive, got {} x {} cm",
                self.page_width_cm, self.page_height_cm
            )));
        }
        if self.dpi == 0 {
            return Err(Error::config("dpi must be positive"));
        }
        if !(self.scale_factor > 0.0) {
            return Err(Error::config(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        if self.tile_size == 0 {
            return Err(Error::config("tile size must be positive"));
        }
        Ok(())
    }
    /// Pixel width the tiles have to fill
    pub fn px_width(&self) -> f64 {
        page_pixels(self.page_width_cm, self.dpi) / self.scale_factor
    }
    /// Pixel height the tiles have to fill
    pub fn px_height(&self) -> f64 {
        page_pixels(self.page_height_cm, self.dpi) / self.scale_factor
    }
    /// Size of the output image in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            page_pixels(self.page_width_cm, self.dpi).trunc() as u32,
            page_pixels(self.page_height_cm, self.dpi).trunc() as u32,
        )
    }
}

/// Number of printed dots along a page edge
pub fn page_pixels(length_cm: f64, dpi: u32) -> f64 {
    length_cm / CM_PER_INCH * dpi as f64
}

/// Map center and scale, the alternative to an explicit bounding box
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct CenterSpec {
    pub center_lon: f64,
    pub center_lat: f64,
    pub scale_denominator: f64,
}

/// Area selection, either explicit or centered
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum AreaSpec {
    BBox(BoundingBox),
    Center(CenterSpec),
}

impl AreaSpec {
    pub fn resolve(&self, page_width_cm: f64, page_height_cm: f64) -> Result<BoundingBox, Error> {
        match self {
            AreaSpec::BBox(bbox) => {
                BoundingBox::new(bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat)
            }
            AreaSpec::Center(center) => center_to_bbox(center, page_width_cm, page_height_cm),
        }
    }
}

fn cm_to_km(length_cm: f64, scale_denominator: f64) -> f64 {
    length_cm / CM_PER_KM * scale_denominator
}

/// Degrees of latitude covered by `length_cm` on paper
pub fn cm_to_degrees_lat(length_cm: f64, scale_denominator: f64) -> f64 {
    cm_to_km(length_cm, scale_denominator) / (EARTH_CIRCUMFERENCE_KM / 360.0)
}

/// Degrees of longitude covered by `length_cm` on paper at `latitude`
pub fn cm_to_degrees_lon(length_cm: f64, scale_denominator: f64, latitude: f64) -> f64 {
    cm_to_km(length_cm, scale_denominator)
        / ((EARTH_CIRCUMFERENCE_KM / 360.0) * latitude.to_radians().cos())
}

/// Bounding box of a page centered at the given position
pub fn center_to_bbox(
    center: &CenterSpec,
    page_width_cm: f64,
    page_height_cm: f64,
) -> Result<BoundingBox, Error> {
    if !(center.scale_denominator > 0.0) {
        return Err(Error::config(format!(
            "scale denominator must be positive, got {}",
            center.scale_denominator
        )));
    }
    if !center.center_lat.is_finite() || center.center_lat.abs() >= 90.0 {
        return Err(Error::config(format!(
            "center latitude must lie strictly between -90 and 90, got {}",
            center.center_lat
        )));
    }
    if !center.center_lon.is_finite() {
        return Err(Error::config(format!(
            "invalid center longitude {}",
            center.center_lon
        )));
    }
    let half_lon =
        cm_to_degrees_lon(page_width_cm, center.scale_denominator, center.center_lat) / 2.0;
    let half_lat = cm_to_degrees_lat(page_height_cm, center.scale_denominator) / 2.0;
    BoundingBox::new(
        center.center_lon - half_lon,
        center.center_lat - half_lat,
        center.center_lon + half_lon,
        center.center_lat + half_lat,
    )
}

/// Mercator y of a latitude, in units of half the world height
pub fn lat_rad(lat: f64) -> f64 {
    let sin = lat.to_radians().sin();
    let rad_x2 = ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;
    rad_x2.max(-consts::PI).min(consts::PI) / 2.0
}

/// Share of the Mercator world height covered by the box
pub fn lat_fraction(bbox: &BoundingBox) -> f64 {
    (lat_rad(bbox.max_lat) - lat_rad(bbox.min_lat)) / consts::PI
}

/// Share of the world width covered by the box
pub fn lon_fraction(bbox: &BoundingBox) -> f64 {
    bbox.lon_span() / 360.0
}

fn axis_zoom(map_px: f64, world_px: f64, fraction: f64, axis: &str) -> Result<i32, Error> {
    if !(fraction > 0.0) {
        return Err(Error::config(format!(
            "degenerate bounding box: {} fraction is {}",
            axis, fraction
        )));
    }
    Ok((map_px / world_px / fraction).log2().floor() as i32)
}

/// Zoom level whose tile resolution fits the page resolution without upsampling
pub fn calc_zoom_level(sheet: &SheetSpec, bbox: &BoundingBox) -> Result<u8, Error> {
    sheet.validate()?;
    let tile_size = sheet.tile_size as f64;
    let lat_zoom = axis_zoom(sheet.px_height(), tile_size, lat_fraction(bbox), "latitude")?;
    let lon_zoom = axis_zoom(sheet.px_width(), tile_size, lon_fraction(bbox), "longitude")?;
    let zoom = lat_zoom.min(lon_zoom);
    if zoom < 0 {
        return Err(Error::config(format!(
            "page of {:.0} x {:.0} px is too small for one tile of the requested area",
            sheet.px_width(),
            sheet.px_height()
        )));
    }
    if zoom > u8::MAX as i32 {
        return Err(Error::config(format!("zoom level {} out of range", zoom)));
    }
    Ok(zoom as u8)
}
