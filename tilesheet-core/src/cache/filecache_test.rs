//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::cache::{Cache, Nocache};
use crate::cache::filecache::Filecache;
use crate::cache::Tilecache;
use crate::core::{Config, TilesConfig};
use std::path::Path;

#[test]
fn test_dircache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Filecache {
        basepath: format!("{}", dir.path().display()),
    };
    let path = "tile.openstreetmap.org/10/5/6.png";
    let fullpath = format!("{}/{}", cache.basepath, path);
    let obj = "0123456789";

    // Cache miss
    assert_eq!(cache.read(path, |_| {}), false);

    // Write into cache
    cache.write(path, obj.as_bytes()).unwrap();
    assert!(Path::new(&fullpath).exists());

    // Cache hit
    assert_eq!(cache.read(path, |_| {}), true);

    // Read from cache
    let mut s = String::new();
    cache.read(path, |f| {
        let _ = f.read_to_string(&mut s);
    });
    assert_eq!(&s, "0123456789");
}

#[test]
fn test_nocache() {
    let cache = Nocache;
    cache.write("0/0/0.png", b"tile").unwrap();
    assert_eq!(cache.read("0/0/0.png", |_| {}), false);
}

#[test]
fn test_cache_from_config() {
    let mut config = TilesConfig::default();
    config.cache_dir = Some("/tmp/sheet-tiles".to_string());
    match Tilecache::from_config(&config).unwrap() {
        Tilecache::Filecache(fc) => assert_eq!(fc.basepath, "/tmp/sheet-tiles"),
        other => panic!("unexpected cache {:?}", other),
    }

    let mut config = TilesConfig::default();
    config.mbtiles_file = Some("world.mbtiles".to_string());
    let cache = Tilecache::from_config(&config).unwrap();
    assert_eq!(cache.info(), "No cache");

    let config = TilesConfig::default();
    let cache = Tilecache::from_config(&config).unwrap();
    assert!(cache.info().contains("tilesheet"));
}
