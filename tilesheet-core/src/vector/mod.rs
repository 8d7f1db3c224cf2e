//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Vector overlay features

pub mod gpx;


pub use self::gpx::GpxSource;

use crate::core::Error;

/// WGS84 position in degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

/// Line feature, one point sequence per segment
#[derive(PartialEq, Clone, Debug)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Vec<Position>>,
}

impl Track {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|seg| seg.len()).sum()
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Waypoint {
    pub name: Option<String>,
    pub position: Position,
}

/// Reader of track and waypoint features from vector files
pub trait VectorSource {
    fn tracks(&self, path: &str) -> Result<Vec<Track>, Error>;
    fn waypoints(&self, path: &str) -> Result<Vec<Waypoint>, Error>;
}
