//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::Error;
use crate::vector::{Position, Track, VectorSource, Waypoint};
use elementtree::Element;
use std::fs::File;
use std::io::BufReader;

/// GPX 1.0/1.1 reader
///
/// Tracks (`trk/trkseg/trkpt`) and routes (`rte/rtept`) become track lines,
/// `wpt` elements become waypoints. Elements are matched by local name, so
/// any GPX namespace is accepted.
pub struct GpxSource;

impl GpxSource {
    fn read_root(path: &str) -> Result<Element, Error> {
        let file = File::open(path).map_err(|e| vector_error(path, e))?;
        let root = Element::from_reader(BufReader::new(file)).map_err(|e| vector_error(path, e))?;
        if root.tag().name() != "gpx" {
            return Err(vector_error(
                path,
                format!("unexpected root element '{}'", root.tag().name()),
            ));
        }
        Ok(root)
    }
}

impl VectorSource for GpxSource {
    fn tracks(&self, path: &str) -> Result<Vec<Track>, Error> {
        let root = GpxSource::read_root(path)?;
        let mut tracks = Vec::new();
        for trk in children(&root, "trk") {
            let mut segments = Vec::new();
            for seg in children(trk, "trkseg") {
                segments.push(positions(seg, "trkpt", path)?);
            }
            tracks.push(Track {
                name: child_text(trk, "name"),
                segments,
            });
        }
        for rte in children(&root, "rte") {
            tracks.push(Track {
                name: child_text(rte, "name"),
                segments: vec![positions(rte, "rtept", path)?],
            });
        }
        debug!(
            "{}: {} tracks with {} points",
            path,
            tracks.len(),
            tracks.iter().map(|t| t.point_count()).sum::<usize>()
        );
        Ok(tracks)
    }

    fn waypoints(&self, path: &str) -> Result<Vec<Waypoint>, Error> {
        let root = GpxSource::read_root(path)?;
        children(&root, "wpt")
            .map(|wpt| {
                Ok(Waypoint {
                    name: child_text(wpt, "name"),
                    position: position(wpt, path)?,
                })
            })
            .collect()
    }
}

fn vector_error<E: ToString>(path: &str, e: E) -> Error {
    Error::Vector {
        path: path.to_string(),
        reason: e.to_string(),
    }
}

fn children<'a>(element: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    element.children().filter(move |child| child.tag().name() == name)
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    children(element, name)
        .next()
        .map(|child| child.text().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn positions(element: &Element, name: &str, path: &str) -> Result<Vec<Position>, Error> {
    children(element, name).map(|pt| position(pt, path)).collect()
}

fn position(element: &Element, path: &str) -> Result<Position, Error> {
    let coord = |attr: &str| -> Result<f64, Error> {
        let value = element.get_attr(attr).ok_or_else(|| {
            vector_error(path, format!("<{}> without '{}'", element.tag().name(), attr))
        })?;
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| vector_error(path, format!("invalid {} '{}': {}", attr, value, e)))
    };
    Ok(Position {
        lon: coord("lon")?,
        lat: coord("lat")?,
    })
}
