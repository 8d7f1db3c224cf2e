//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

pub mod cache;
pub mod cli;
pub mod core;
pub mod provider;
pub mod render;
pub mod vector;

#[cfg(test)]
mod logcapture;

pub use crate::core::Error;
