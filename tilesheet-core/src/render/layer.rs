//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::provider::{TileFootprint, TileRef};
use crate::vector::{Track, Waypoint};

/// Overlay drawn on top of the GPX tracks
#[derive(PartialEq, Clone, Debug)]
pub enum SpecialOverlay {
    None,
    /// Temporary track file of the overview map
    Overview(String),
    /// Temporary waypoint file
    Waypoints(String),
}

impl SpecialOverlay {
    /// The overview track takes priority over the waypoints
    pub fn select(temp_track: Option<&str>, temp_waypoint: Option<&str>) -> SpecialOverlay {
        match (temp_track, temp_waypoint) {
            (Some(track), _) => SpecialOverlay::Overview(track.to_string()),
            (None, Some(waypoints)) => SpecialOverlay::Waypoints(waypoints.to_string()),
            (None, None) => SpecialOverlay::None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            SpecialOverlay::None => None,
            SpecialOverlay::Overview(path) | SpecialOverlay::Waypoints(path) => Some(path),
        }
    }
}

/// Map layer, drawn in list order
#[derive(Clone, Debug)]
pub enum Layer {
    RasterTile {
        tile: TileRef,
        data: Vec<u8>,
        footprint: TileFootprint,
    },
    GpxTrack {
        path: String,
        tracks: Vec<Track>,
    },
    OverviewTrack {
        path: String,
        tracks: Vec<Track>,
    },
    Waypoints {
        path: String,
        waypoints: Vec<Waypoint>,
    },
}

impl Layer {
    pub fn name(&self) -> String {
        match self {
            Layer::RasterTile { tile, .. } => {
                format!("RasterLayer-{}-{}-{}", tile.zoom, tile.x, tile.y)
            }
            Layer::GpxTrack { .. } => "GPXLayer".to_string(),
            Layer::OverviewTrack { .. } => "OverviewLayer".to_string(),
            Layer::Waypoints { .. } => "WaypointLayer".to_string(),
        }
    }
}

#[test]
fn test_overlay_select() {
    assert_eq!(
        SpecialOverlay::select(Some("overview.gpx"), Some("wpt.gpx")),
        SpecialOverlay::Overview("overview.gpx".to_string())
    );
    assert_eq!(
        SpecialOverlay::select(None, Some("wpt.gpx")),
        SpecialOverlay::Waypoints("wpt.gpx".to_string())
    );
    assert_eq!(SpecialOverlay::select(None, None), SpecialOverlay::None);
    assert_eq!(SpecialOverlay::None.path(), None);
}

#[test]
fn test_layer_names() {
    let layer = Layer::RasterTile {
        tile: TileRef::new(10, 5, 6),
        data: Vec::new(),
        footprint: TileFootprint {
            lon_low: 0.0,
            lat_low: 0.0,
            lon_high: 1.0,
            lat_high: 1.0,
        },
    };
    assert_eq!(layer.name(), "RasterLayer-10-5-6");
    let layer = Layer::Waypoints {
        path: "wpt.gpx".to_string(),
        waypoints: Vec::new(),
    };
    assert_eq!(layer.name(), "WaypointLayer");
}
