//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::Error;
use crate::core::planner::SheetSpec;
use crate::provider::TileScheme;
use crate::render::SpecialOverlay;
use elementtree::Element;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "tilesheet.config.xml";
pub const CONFIG_ROOT: &str = "tilesheet";

pub const DEFAULT_PAGE_WIDTH_CM: f64 = 20.0;
pub const DEFAULT_PAGE_HEIGHT_CM: f64 = 28.7;
pub const DEFAULT_BASEFILENAME: &str = "detail";
pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;
pub const DEFAULT_STYLE: &str = "hikingmap_style.xml";
pub const DEFAULT_OUTPUT_FORMAT: &str = "png";
pub const DEFAULT_TILE_SIZE: u16 = 256;
pub const DEFAULT_TILE_FORMAT: &str = "image/png";
pub const DEFAULT_SCALE_DENOMINATOR: f64 = 50000.0;
pub const DEFAULT_TILES_URL: &str = "http://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILES_SUBDOMAINS: &str = "abc";

pub trait Config<C>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, Error>;
}

/// `<tilesmanager>` section of the config file
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TilesmanagerCfg {
    pub mbtiles_file: Option<String>,
    pub wmts_url: Option<String>,
    pub wmts_subdomains: Option<String>,
    pub cache_dir: Option<String>,
    pub tile_size: Option<u16>,
    pub tile_format: Option<String>,
    pub tile_scheme: Option<TileScheme>,
}

/// Values read from the config file. Absent entries keep the built-in default.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct FileCfg {
    pub tilesmanager: Option<TilesmanagerCfg>,
    pub hikingmapstyle: Option<String>,
    pub outputformat: Option<String>,
    pub dpi: Option<u32>,
    pub scalefactor: Option<f64>,
    /// Empty when no `<fontdirs>` element is present
    pub fontdirs: Vec<String>,
}

/// Tile provider settings
#[derive(Clone, Debug, PartialEq)]
pub struct TilesConfig {
    /// MBTiles archive, takes precedence over `wmts_url`
    pub mbtiles_file: Option<String>,
    /// Remote URL template with `{z}`, `{x}`, `{y}` and `{s}` placeholders
    pub wmts_url: Option<String>,
    /// Subdomains substituted for `{s}`, either comma separated or one letter each
    pub wmts_subdomains: Option<String>,
    /// Local folder containing cached tiles
    pub cache_dir: Option<String>,
    pub tile_size: u16,
    /// Mime type of the tile images
    pub tile_format: String,
    pub tile_scheme: TileScheme,
}

impl Default for TilesConfig {
    fn default() -> Self {
        TilesConfig {
            mbtiles_file: None,
            wmts_url: None,
            wmts_subdomains: None,
            cache_dir: None,
            tile_size: DEFAULT_TILE_SIZE,
            tile_format: DEFAULT_TILE_FORMAT.to_string(),
            tile_scheme: TileScheme::Wmts,
        }
    }
}

impl TilesConfig {
    /// File extension of cached tiles
    pub fn tile_extension(&self) -> String {
        let subtype = self
            .tile_format
            .rsplit('/')
            .next()
            .unwrap_or(&self.tile_format);
        match subtype {
            "jpeg" => "jpg".to_string(),
            ext => ext.to_string(),
        }
    }
    pub fn tiles_url(&self) -> &str {
        self.wmts_url.as_deref().unwrap_or(DEFAULT_TILES_URL)
    }
    pub fn tiles_subdomains(&self) -> &str {
        self.wmts_subdomains
            .as_deref()
            .unwrap_or(DEFAULT_TILES_SUBDOMAINS)
    }
    pub fn cache_dir(&self) -> String {
        match self.cache_dir {
            Some(ref dir) => dir.clone(),
            None => env::temp_dir().join("tilesheet").display().to_string(),
        }
    }
}

/// Complete rendering configuration
///
/// Built in layers: `RenderConfig::default()`, then `merge_file`, then command line arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub page_width_cm: f64,
    pub page_height_cm: f64,
    /// Output file name without extension
    pub basefilename: String,
    pub track_files: Vec<String>,
    pub temp_track_file: Option<String>,
    pub temp_waypoint_file: Option<String>,
    pub verbose: bool,
    pub dpi: u32,
    pub scale_factor: f64,
    /// Overlay stylesheet for tracks and waypoints
    pub hikingmapstyle: String,
    pub output_format: String,
    pub tiles: TilesConfig,
    pub fontdirs: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            page_width_cm: DEFAULT_PAGE_WIDTH_CM,
            page_height_cm: DEFAULT_PAGE_HEIGHT_CM,
            basefilename: DEFAULT_BASEFILENAME.to_string(),
            track_files: Vec::new(),
            temp_track_file: None,
            temp_waypoint_file: None,
            verbose: false,
            dpi: DEFAULT_DPI,
            scale_factor: DEFAULT_SCALE_FACTOR,
            hikingmapstyle: DEFAULT_STYLE.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            tiles: TilesConfig::default(),
            fontdirs: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Override defaults with config file values
    pub fn merge_file(mut self, cfg: &FileCfg) -> Self {
        if let Some(ref tm) = cfg.tilesmanager {
            if tm.mbtiles_file.is_some() {
                self.tiles.mbtiles_file = tm.mbtiles_file.clone();
            }
            if tm.wmts_url.is_some() {
                self.tiles.wmts_url = tm.wmts_url.clone();
            }
            if tm.wmts_subdomains.is_some() {
                self.tiles.wmts_subdomains = tm.wmts_subdomains.clone();
            }
            if tm.cache_dir.is_some() {
                self.tiles.cache_dir = tm.cache_dir.clone();
            }
            if let Some(tile_size) = tm.tile_size {
                self.tiles.tile_size = tile_size;
            }
            if let Some(ref tile_format) = tm.tile_format {
                self.tiles.tile_format = tile_format.clone();
            }
            if let Some(tile_scheme) = tm.tile_scheme {
                self.tiles.tile_scheme = tile_scheme;
            }
        }
        if let Some(ref style) = cfg.hikingmapstyle {
            self.hikingmapstyle = style.clone();
        }
        if let Some(ref format) = cfg.outputformat {
            self.output_format = format.clone();
        }
        if let Some(dpi) = cfg.dpi {
            self.dpi = dpi;
        }
        if let Some(scale_factor) = cfg.scalefactor {
            self.scale_factor = scale_factor;
        }
        if !cfg.fontdirs.is_empty() {
            self.fontdirs = cfg.fontdirs.clone();
        }
        self
    }

    pub fn sheet(&self) -> SheetSpec {
        SheetSpec {
            page_width_cm: self.page_width_cm,
            page_height_cm: self.page_height_cm,
            dpi: self.dpi,
            scale_factor: self.scale_factor,
            tile_size: self.tiles.tile_size,
        }
    }

    pub fn overlay(&self) -> SpecialOverlay {
        SpecialOverlay::select(
            self.temp_track_file.as_deref(),
            self.temp_waypoint_file.as_deref(),
        )
    }

    pub fn output_path(&self) -> String {
        format!("{}.{}", self.basefilename, self.output_format)
    }

    /// Check values before any rendering work begins
    pub fn validate(&self) -> Result<(), Error> {
        self.sheet().validate()?;
        if self.basefilename.is_empty() {
            return Err(Error::config("empty output base filename"));
        }
        if self.output_format.is_empty() {
            return Err(Error::config("empty output format"));
        }
        for dir in &self.fontdirs {
            if !Path::new(dir).is_dir() {
                warn!("Font directory '{}' not found", dir);
            }
        }
        Ok(())
    }
}

/// Config file in the current directory, or a dot-file in the home directory
pub fn search_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }
    dirs::home_dir()
        .map(|home| home.join(format!(".{}", CONFIG_FILENAME)))
        .filter(|path| path.exists())
}

/// Load and parse the config file into an config struct.
pub fn read_config(path: &str) -> Result<FileCfg, Error> {
    let file = File::open(path)
        .map_err(|e| Error::config(format!("Could not open config file '{}': {}", path, e)))?;
    let root = Element::from_reader(BufReader::new(file))
        .map_err(|e| Error::config(format!("{} - {}", path, e)))?;
    config_from_xml(&root, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config(config_xml: &str, path: &str) -> Result<FileCfg, Error> {
    let root = Element::from_reader(config_xml.as_bytes())
        .map_err(|e| Error::config(format!("{} - {}", path, e)))?;
    config_from_xml(&root, path)
}

fn config_from_xml(root: &Element, path: &str) -> Result<FileCfg, Error> {
    let app = if root.tag().name() == CONFIG_ROOT {
        Some(root)
    } else {
        root.find(CONFIG_ROOT)
    };
    let app = match app {
        Some(app) => app,
        None => {
            warn!("{} - missing element '{}', using defaults", path, CONFIG_ROOT);
            return Ok(FileCfg::default());
        }
    };

    let tilesmanager = match app.find("tilesmanager") {
        Some(tm) => Some(TilesmanagerCfg {
            mbtiles_file: subtag_value(tm, "mbtiles_file"),
            wmts_url: subtag_value(tm, "wmts_url"),
            wmts_subdomains: subtag_value(tm, "wmts_subdomains"),
            cache_dir: subtag_value(tm, "cache_dir"),
            tile_size: parse_subtag(tm, "tile_size", path)?,
            tile_format: subtag_value(tm, "tile_format"),
            tile_scheme: parse_subtag(tm, "tile_scheme", path)?,
        }),
        None => None,
    };

    let fontdirs = app
        .find("fontdirs")
        .map(|dirs| {
            dirs.find_all("fontdir")
                .map(|dir| dir.text().trim().to_string())
                .filter(|dir| !dir.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(FileCfg {
        tilesmanager,
        hikingmapstyle: subtag_value(app, "hikingmapstyle"),
        outputformat: subtag_value(app, "outputformat"),
        dpi: parse_subtag(app, "dpi", path)?,
        scalefactor: parse_subtag(app, "scalefactor", path)?,
        fontdirs,
    })
}

fn subtag_value(element: &Element, name: &str) -> Option<String> {
    element
        .find(name)
        .map(|child| child.text().trim())
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_subtag<T>(element: &Element, name: &str, path: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match subtag_value(element, name) {
        Some(value) => value.parse::<T>().map(Some).map_err(|e| {
            Error::config(format!("{} - invalid value '{}' for {}: {}", path, value, name, e))
        }),
        None => Ok(None),
    }
}
