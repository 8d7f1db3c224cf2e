//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::Error;
use elementtree::Element;
use std::fs::File;
use std::io::{self, BufReader};
use std::str::FromStr;

/// RGBA color, not premultiplied
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }
}

/// Parses `#rrggbb` or `#rrggbbaa`
impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{}' (expected #rrggbb or #rrggbbaa)", s));
        }
        let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        let a = if hex.len() == 8 { component(6) } else { 255 };
        Ok(Rgba::new(component(0), component(2), component(4), a))
    }
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct LineStyle {
    pub color: Rgba,
    /// Stroke width in pixels at scale factor 1
    pub width: f32,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct PointStyle {
    pub color: Rgba,
    /// Marker radius in pixels at scale factor 1
    pub radius: f32,
}

/// Symbolization of the vector overlays
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct OverlayStyle {
    pub track: LineStyle,
    pub overview: LineStyle,
    pub waypoint: PointStyle,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            track: LineStyle {
                color: Rgba::new(255, 0, 0, 200),
                width: 3.0,
            },
            overview: LineStyle {
                color: Rgba::new(0, 0, 255, 200),
                width: 5.0,
            },
            waypoint: PointStyle {
                color: Rgba::new(255, 0, 0, 255),
                radius: 4.0,
            },
        }
    }
}

/// Read an overlay stylesheet
///
/// ```xml
/// <hikingmapstyle>
///   <track color="#ff0000c8" width="3"/>
///   <overview color="#0000ffc8" width="5"/>
///   <waypoint color="#ff0000" radius="4"/>
/// </hikingmapstyle>
/// ```
/// Missing elements or attributes keep their default.
/// A missing file is reported as `Error::Io` with kind `NotFound`.
pub fn read_style(path: &str) -> Result<OverlayStyle, Error> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::Io(e)
        } else {
            Error::config(format!("Could not open stylesheet '{}': {}", path, e))
        }
    })?;
    let root = Element::from_reader(BufReader::new(file))
        .map_err(|e| Error::config(format!("{} - {}", path, e)))?;
    style_from_xml(&root, path)
}

pub fn parse_style(style_xml: &str, path: &str) -> Result<OverlayStyle, Error> {
    let root = Element::from_reader(style_xml.as_bytes())
        .map_err(|e| Error::config(format!("{} - {}", path, e)))?;
    style_from_xml(&root, path)
}

fn style_from_xml(root: &Element, path: &str) -> Result<OverlayStyle, Error> {
    let mut style = OverlayStyle::default();
    for el in root.children() {
        match el.tag().name() {
            "track" => style.track = line_style(el, style.track, path)?,
            "overview" => style.overview = line_style(el, style.overview, path)?,
            "waypoint" => {
                if let Some(color) = attr(el, "color", path)? {
                    style.waypoint.color = color;
                }
                if let Some(radius) = attr(el, "radius", path)? {
                    style.waypoint.radius = radius;
                }
            }
            other => debug!("{} - ignoring element '{}'", path, other),
        }
    }
    Ok(style)
}

fn line_style(el: &Element, default: LineStyle, path: &str) -> Result<LineStyle, Error> {
    Ok(LineStyle {
        color: attr(el, "color", path)?.unwrap_or(default.color),
        width: attr(el, "width", path)?.unwrap_or(default.width),
    })
}

fn attr<T>(el: &Element, name: &str, path: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match el.get_attr(name) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|e| {
            Error::config(format!(
                "{} - invalid {} '{}' of <{}>: {}",
                path,
                name,
                value,
                el.tag().name(),
                e
            ))
        }),
        None => Ok(None),
    }
}
