//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::cache::Cache;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// Tiles stored below a local directory
#[derive(Clone, Debug)]
pub struct Filecache {
    pub basepath: String,
}

impl Filecache {
    fn fullpath(&self, path: &str) -> String {
        format!("{}/{}", self.basepath, path)
    }
}

impl Cache for Filecache {
    fn info(&self) -> String {
        format!("Tile cache directory: {}", self.basepath)
    }
    fn read<F>(&self, path: &str, mut read: F) -> bool
    where
        F: FnMut(&mut dyn Read),
    {
        let fullpath = self.fullpath(path);
        debug!("Filecache.read {}", fullpath);
        match File::open(&fullpath) {
            Ok(mut f) => {
                read(&mut f);
                true
            }
            Err(_e) => false,
        }
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        let fullpath = self.fullpath(path);
        debug!("Filecache.write {}", fullpath);
        if let Some(dir) = Path::new(&fullpath).parent() {
            fs::create_dir_all(dir)?;
        }
        let mut f = File::create(&fullpath)?;
        f.write_all(obj)
    }
}
