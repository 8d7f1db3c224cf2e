//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod error;
pub mod planner;

pub use self::config::{parse_config, read_config, Config, FileCfg, RenderConfig, TilesConfig};
pub use self::error::Error;
pub use self::planner::{
    calc_zoom_level, center_to_bbox, AreaSpec, BoundingBox, CenterSpec, SheetSpec,
};

#[cfg(test)]
mod config_test;
