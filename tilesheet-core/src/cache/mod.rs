//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod cache;
pub mod filecache;

#[cfg(test)]
mod filecache_test;

pub use self::cache::Cache;
pub use self::cache::Nocache;
pub use self::filecache::Filecache;
use crate::core::{Config, Error, TilesConfig};
use std::io;
use std::io::Read;

#[derive(Clone, Debug)]
pub enum Tilecache {
    Nocache(Nocache),
    Filecache(Filecache),
}

impl Cache for Tilecache {
    fn info(&self) -> String {
        match self {
            &Tilecache::Nocache(ref cache) => cache.info(),
            &Tilecache::Filecache(ref cache) => cache.info(),
        }
    }
    fn read<F>(&self, path: &str, read: F) -> bool
    where
        F: FnMut(&mut dyn Read),
    {
        match self {
            &Tilecache::Nocache(ref cache) => cache.read(path, read),
            &Tilecache::Filecache(ref cache) => cache.read(path, read),
        }
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        match self {
            &Tilecache::Nocache(ref cache) => cache.write(path, obj),
            &Tilecache::Filecache(ref cache) => cache.write(path, obj),
        }
    }
}

impl Config<TilesConfig> for Tilecache {
    fn from_config(config: &TilesConfig) -> Result<Self, Error> {
        // Tiles of a local archive are not worth a copy
        if config.mbtiles_file.is_some() && config.cache_dir.is_none() {
            Ok(Tilecache::Nocache(Nocache))
        } else {
            Ok(Tilecache::Filecache(Filecache {
                basepath: config.cache_dir(),
            }))
        }
    }
}
