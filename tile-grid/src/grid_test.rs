//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{
    extent_merc_to_wgs84, extent_wgs84_to_merc, lonlat_to_merc, merc_to_lonlat, Extent,
    ExtentInt, Grid, Origin, MERC_MAX,
};

fn assert_extent_eq(a: &Extent, b: &Extent, eps: f64) {
    assert!(
        (a.minx - b.minx).abs() < eps
            && (a.miny - b.miny).abs() < eps
            && (a.maxx - b.maxx).abs() < eps
            && (a.maxy - b.maxy).abs() < eps,
        "{:?} != {:?}",
        a,
        b
    );
}

#[test]
fn test_bbox() {
    let grid = Grid::web_mercator_tiles(256, Origin::BottomLeft);

    let extent000 = grid.tile_extent(0, 0, 0);
    assert_eq!(
        extent000,
        Extent {
            minx: -20037508.342789248,
            miny: -20037508.342789248,
            maxx: 20037508.342789248,
            maxy: 20037508.342789248,
        }
    );

    let extent = grid.tile_extent(486, 691, 10);
    assert_eq!(
        extent,
        Extent {
            minx: -1017529.7205322683,
            miny: 7005300.768279836,
            maxx: -978393.9620502554,
            maxy: 7044436.526761845
        }
    );
}

#[test]
fn test_top_left_origin() {
    let tms = Grid::web_mercator_tiles(256, Origin::BottomLeft);
    let wmts = Grid::web_mercator_tiles(256, Origin::TopLeft);

    // Row 332 from the north is row 691 from the south at zoom 10
    assert_extent_eq(&wmts.tile_extent(486, 332, 10), &tms.tile_extent(486, 691, 10), 1e-6);

    let extent000 = wmts.tile_extent(0, 0, 1);
    assert_extent_eq(
        &extent000,
        &Extent {
            minx: -MERC_MAX,
            miny: 0.0,
            maxx: 0.0,
            maxy: MERC_MAX,
        },
        1e-6,
    );
}

#[test]
fn test_tile_size() {
    let grid256 = Grid::web_mercator_tiles(256, Origin::TopLeft);
    let grid512 = Grid::web_mercator_tiles(512, Origin::TopLeft);

    assert_eq!(grid512.tile_width(), 512);
    // A tile covers the same ground whatever its pixel size
    assert_extent_eq(
        &grid512.tile_extent(33, 21, 6),
        &grid256.tile_extent(33, 21, 6),
        1e-6,
    );
    assert_eq!(grid512.level_limit(6), (64, 64));
}

#[test]
fn test_grid_calculations() {
    let grid = Grid::web_mercator_tiles(256, Origin::BottomLeft);
    assert_eq!(grid.maxzoom(), 22);

    assert_eq!(grid.level_limit(0), (1, 1));
    assert_eq!(grid.level_limit(10), (1024, 1024));

    assert_eq!(
        grid.level_tile_limits(&grid.tile_extent(0, 0, 0), 10, 0),
        ExtentInt {
            minx: 0,
            miny: 0,
            maxx: 1024,
            maxy: 1024,
        }
    );

    let extent = Extent {
        minx: -1017529.7205322683,
        miny: 7005300.768279828,
        maxx: -978393.9620502591,
        maxy: 7044436.526761841,
    };
    assert_eq!(
        grid.level_tile_limits(&extent, 10, 0),
        ExtentInt {
            minx: 486,
            miny: 691,
            maxx: 487,
            maxy: 692,
        }
    );
}

#[test]
fn test_level_tile_limits() {
    let wmts = Grid::web_mercator_tiles(256, Origin::TopLeft);
    let extent = wmts.tile_extent(486, 332, 10);
    assert_eq!(
        wmts.level_tile_limits(&extent, 10, 0),
        ExtentInt {
            minx: 486,
            miny: 332,
            maxx: 487,
            maxy: 333,
        }
    );

    // Whole world at zoom 2, with out-of-range rows clipped
    let limits = wmts.level_tile_limits(&wmts.extent, 2, 1);
    assert_eq!(
        limits,
        ExtentInt {
            minx: 0,
            miny: 0,
            maxx: 4,
            maxy: 4,
        }
    );
}

#[test]
fn test_projected_extent() {
    let extent_wgs84 = Extent {
        minx: 4.0,
        miny: 52.0,
        maxx: 5.0,
        maxy: 53.0,
    };
    let projected = extent_wgs84_to_merc(&extent_wgs84);
    assert_extent_eq(
        &projected,
        &Extent {
            minx: 445277.96317309426,
            miny: 6800125.454397307,
            maxx: 556597.4539663679,
            maxy: 6982997.920389788,
        },
        1e-6,
    );
    assert_eq!(
        lonlat_to_merc(extent_wgs84.minx, extent_wgs84.miny),
        (projected.minx, projected.miny)
    );
    assert_extent_eq(&extent_merc_to_wgs84(&projected), &extent_wgs84, 1e-9);
}

#[test]
fn test_merc_truncation() {
    let (_, y) = lonlat_to_merc(0.0, 90.0);
    assert!((y - MERC_MAX).abs() < 1e-3);
    let (_, y) = lonlat_to_merc(0.0, -90.0);
    assert!((y + MERC_MAX).abs() < 1e-3);
    let (lon, lat) = merc_to_lonlat(MERC_MAX, 0.0);
    assert!((lon - 180.0).abs() < 1e-9);
    assert!(lat.abs() < 1e-9);
}

#[test]
fn test_tile_bounds() {
    // XYZ tile 10/486/332, checked against mercantile
    let grid = Grid::web_mercator_tiles(256, Origin::TopLeft);
    let bounds = extent_merc_to_wgs84(&grid.tile_extent(486, 332, 10));
    assert_extent_eq(
        &bounds,
        &Extent {
            minx: -9.140625,
            miny: 53.120405283106564,
            maxx: -8.7890625,
            maxy: 53.33087298301705,
        },
        1e-7,
    );
}
