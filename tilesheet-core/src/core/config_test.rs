//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::*;
use crate::core::error::Error;
use crate::provider::TileScheme;
use crate::render::SpecialOverlay;
use std::io::Write;

const TEST_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<tilesheet>
    <tilesmanager>
        <mbtiles_file>/data/belgium.mbtiles</mbtiles_file>
        <wmts_url>https://{s}.tiles.example.org/{z}/{x}/{y}.jpg</wmts_url>
        <wmts_subdomains>abc</wmts_subdomains>
        <cache_dir>/var/cache/tiles</cache_dir>
        <tile_size>512</tile_size>
        <tile_format>image/jpeg</tile_format>
        <tile_scheme>tms</tile_scheme>
    </tilesmanager>
    <hikingmapstyle>/etc/hikingmap_style.xml</hikingmapstyle>
    <outputformat>jpeg</outputformat>
    <dpi>600</dpi>
    <scalefactor>2.5</scalefactor>
    <fontdirs>
        <fontdir>/usr/share/fonts/truetype</fontdir>
        <fontdir>  </fontdir>
        <fontdir>/usr/local/share/fonts</fontdir>
    </fontdirs>
</tilesheet>
"#;

#[test]
fn test_defaults() {
    let config = RenderConfig::default();
    assert_eq!(config.dpi, 300);
    assert_eq!(config.scale_factor, 1.0);
    assert_eq!(config.tiles.tile_size, 256);
    assert_eq!(config.tiles.tile_format, "image/png");
    assert_eq!(config.tiles.tile_scheme, TileScheme::Wmts);
    assert_eq!(config.output_format, "png");
    assert_eq!(config.hikingmapstyle, "hikingmap_style.xml");
    assert_eq!(config.output_path(), "detail.png");
    assert!(config.fontdirs.is_empty());
    assert_eq!(config.overlay(), SpecialOverlay::None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_config() {
    let cfg = parse_config(TEST_CONFIG, "tilesheet.config.xml").expect("parse_config returned Err");
    let tm = cfg.tilesmanager.as_ref().expect("missing tilesmanager");
    assert_eq!(tm.mbtiles_file, Some("/data/belgium.mbtiles".to_string()));
    assert_eq!(tm.wmts_subdomains, Some("abc".to_string()));
    assert_eq!(tm.tile_size, Some(512));
    assert_eq!(tm.tile_scheme, Some(TileScheme::Tms));
    assert_eq!(cfg.dpi, Some(600));
    assert_eq!(cfg.scalefactor, Some(2.5));
    assert_eq!(
        cfg.fontdirs,
        vec![
            "/usr/share/fonts/truetype".to_string(),
            "/usr/local/share/fonts".to_string()
        ]
    );
}

#[test]
fn test_merge_file() {
    let cfg = parse_config(TEST_CONFIG, "tilesheet.config.xml").unwrap();
    let config = RenderConfig::default().merge_file(&cfg);
    assert_eq!(config.dpi, 600);
    assert_eq!(config.scale_factor, 2.5);
    assert_eq!(config.output_format, "jpeg");
    assert_eq!(config.hikingmapstyle, "/etc/hikingmap_style.xml");
    assert_eq!(config.tiles.tile_size, 512);
    assert_eq!(config.tiles.tile_scheme, TileScheme::Tms);
    assert_eq!(config.tiles.tile_extension(), "jpg");
    assert_eq!(config.tiles.cache_dir(), "/var/cache/tiles");
    // values not in the file keep their defaults
    assert_eq!(config.page_width_cm, 20.0);
    assert_eq!(config.basefilename, "detail");
}

#[test]
fn test_partial_config() {
    let xml = "<tilesheet><dpi>150</dpi></tilesheet>";
    let cfg = parse_config(xml, "").unwrap();
    assert!(cfg.tilesmanager.is_none());
    assert!(cfg.fontdirs.is_empty());
    let config = RenderConfig::default().merge_file(&cfg);
    assert_eq!(config.dpi, 150);
    assert_eq!(config.tiles, TilesConfig::default());
    assert_eq!(config.tiles.tiles_url(), DEFAULT_TILES_URL);
    assert_eq!(config.tiles.tiles_subdomains(), "abc");
    assert_eq!(config.tiles.tile_extension(), "png");
}

#[test]
fn test_nested_root() {
    let xml = "<config><tilesheet><outputformat>jpeg</outputformat></tilesheet></config>";
    let cfg = parse_config(xml, "").unwrap();
    assert_eq!(cfg.outputformat, Some("jpeg".to_string()));

    // Unknown document: defaults, no font directories
    let cfg = parse_config("<other><dpi>1</dpi></other>", "").unwrap();
    assert_eq!(cfg, FileCfg::default());
}

#[test]
fn test_parse_errors() {
    let config = parse_config("<tilesheet><dpi>", "broken.xml");
    assert!(matches!(config, Err(Error::Config(_))));

    let config = parse_config("<tilesheet><dpi>many</dpi></tilesheet>", "bad.xml");
    match config {
        Err(Error::Config(msg)) => assert!(msg.contains("dpi"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }

    let xml = "<tilesheet><tilesmanager>\
               <tile_scheme>quadkey</tile_scheme>\
               </tilesmanager></tilesheet>";
    assert!(matches!(parse_config(xml, ""), Err(Error::Config(_))));

    let config = read_config("wrongfile.xml");
    assert!(matches!(config, Err(Error::Config(_))));
}

#[test]
fn test_read_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TEST_CONFIG.as_bytes()).unwrap();
    let cfg = read_config(file.path().to_str().unwrap()).unwrap();
    assert_eq!(cfg.dpi, Some(600));
}

#[test]
fn test_invalid_config() {
    let mut config = RenderConfig::default();
    config.scale_factor = 0.0;
    assert!(config.validate().is_err());

    let mut config = RenderConfig::default();
    config.basefilename = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_overlay_selection() {
    let mut config = RenderConfig::default();
    config.temp_waypoint_file = Some("wpt.gpx".to_string());
    assert_eq!(
        config.overlay(),
        SpecialOverlay::Waypoints("wpt.gpx".to_string())
    );
    config.temp_track_file = Some("trk.gpx".to_string());
    assert_eq!(
        config.overlay(),
        SpecialOverlay::Overview("trk.gpx".to_string())
    );
}
