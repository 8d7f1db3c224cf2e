//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::provider::TileError;
use std::io;
use thiserror::Error;

/// Fatal errors aborting a sheet rendering
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing argument, invalid scale, degenerate bounding box or unreadable config file
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Tile(#[from] TileError),
    #[error("cannot read vector file '{path}': {reason}")]
    Vector { path: String, reason: String },
    #[error("cannot write output '{path}': {reason}")]
    Output { path: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Error {
        Error::Config(msg.into())
    }
}
