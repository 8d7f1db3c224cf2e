//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::grid::ExtentInt;

/// Iterator over the cells of a single zoom level, columns outer, rows inner
pub struct GridIterator {
    z: u8,
    x: u32,
    y: u32,
    limit: ExtentInt,
    finished: bool,
}

impl GridIterator {
    pub fn level(zoom: u8, limit: ExtentInt) -> GridIterator {
        let finished = limit.minx >= limit.maxx || limit.miny >= limit.maxy;
        GridIterator {
            z: zoom,
            x: limit.minx,
            y: limit.miny,
            limit,
            finished,
        }
    }
}

impl Iterator for GridIterator {
    /// Current cell index `(z, x, y)`
    type Item = (u8, u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (self.z, self.x, self.y);
        if self.y < self.limit.maxy - 1 {
            self.y += 1;
        } else if self.x < self.limit.maxx - 1 {
            self.x += 1;
            self.y = self.limit.miny;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_mercator_level() {
    use crate::grid::{Grid, Origin};
    let grid = Grid::web_mercator_tiles(256, Origin::BottomLeft);
    let limit = grid.level_tile_limits(&grid.extent, 1, 0);
    let cells = GridIterator::level(1, limit).collect::<Vec<_>>();
    assert_eq!(cells, vec![(1, 0, 0), (1, 0, 1), (1, 1, 0), (1, 1, 1)]);

    let limit = grid.level_tile_limits(&grid.extent, 0, 0);
    let cells = GridIterator::level(0, limit).collect::<Vec<_>>();
    assert_eq!(cells, vec![(0, 0, 0)]);
}

#[test]
fn test_level_iter() {
    let griditer = GridIterator::level(
        10,
        ExtentInt {
            minx: 4,
            miny: 4,
            maxx: 6,
            maxy: 7,
        },
    );
    let cells = griditer.collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            (10, 4, 4),
            (10, 4, 5),
            (10, 4, 6),
            (10, 5, 4),
            (10, 5, 5),
            (10, 5, 6)
        ]
    );
}

#[test]
fn test_empty_level() {
    let empty_columns = ExtentInt {
        minx: 2,
        miny: 2,
        maxx: 2,
        maxy: 5,
    };
    assert_eq!(GridIterator::level(3, empty_columns).count(), 0);

    let empty_rows = ExtentInt {
        minx: 0,
        miny: 4,
        maxx: 2,
        maxy: 3,
    };
    assert_eq!(GridIterator::level(3, empty_rows).count(), 0);
}
