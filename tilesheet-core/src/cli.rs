//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Command line interface

use crate::core::config::{read_config, search_config_file, DEFAULT_SCALE_DENOMINATOR};
use crate::core::{AreaSpec, BoundingBox, CenterSpec, Error, RenderConfig};
use crate::provider::TileScheme;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::str::FromStr;

pub fn app<'a, 'b>(version: &'b str) -> App<'a, 'b> {
    // http://kbknapp.github.io/clap-rs/clap/
    App::new("tilesheet")
        .version(version)
        .about("Render a map sheet for printing from raster tiles and GPX tracks")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .args_from_usage(
            "--pagewidth=[CM] 'page width in cm (default: 20.0)'
             --pageheight=[CM] 'page height in cm (default: 28.7)'
             -b, --basename=[NAME] 'base filename without extension (default: detail)'
             --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
             -d, --dpi=[DPI] 'amount of detail to render in dots per inch (default: 300)'
             -S, --scale-factor=[FACTOR] 'scale factor (default: 1.0)'
             --hikingmapstyle=[FILE] 'stylesheet for the tracks and the waypoints'
             -f, --format=[FORMAT] 'output format, e.g. png or jpeg (default: png)'
             --mbtiles=[FILE] 'input raster mbtiles file'
             --wmts-url=[URL] 'remote URL to download tiles'
             --wmts-subdomains=[SUBDOMAINS] 'URL subdomains'
             --cachedir=[DIR] 'local folder containing cached tiles'
             --tilesize=[PX] 'tile size (default: 256)'
             --tileformat=[MIMETYPE] 'tile image format (default: image/png)'
             --tilescheme=[tms|wmts] 'tile scheme (default: wmts)'
             -c, --config=[FILE] 'Load from custom config file'",
        )
        .arg(
            Arg::with_name("temptrackfile")
                .short("t")
                .takes_value(true)
                .value_name("FILE")
                .help("temp track file to render"),
        )
        .arg(
            Arg::with_name("tempwaypointfile")
                .short("y")
                .takes_value(true)
                .value_name("FILE")
                .help("temp waypoints file to render"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .help("verbose output"),
        )
        .arg(
            Arg::with_name("gpxfiles")
                .multiple(true)
                .help("GPX track files"),
        )
        .subcommand(
            SubCommand::with_name("bbox")
                .setting(AppSettings::AllowNegativeNumbers)
                .args_from_usage(
                    "-o, --minlon=<LON> 'minimum longitude'
                     -O, --maxlon=<LON> 'maximum longitude'
                     -a, --minlat=<LAT> 'minimum latitude'
                     -A, --maxlat=<LAT> 'maximum latitude'",
                )
                .about("define bounding box"),
        )
        .subcommand(
            SubCommand::with_name("center")
                .setting(AppSettings::AllowNegativeNumbers)
                .args_from_usage(
                    "--lon=<LON> 'longitude of the center of map'
                     --lat=<LAT> 'latitude of the center of map'
                     --scale=[DENOMINATOR] 'scale denominator (default: 50000)'",
                )
                .about("define center mode"),
        )
}

fn parse_arg<T>(args: &ArgMatches, name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match args.value_of(name) {
        Some(value) => value.parse::<T>().map(Some).map_err(|e| {
            Error::config(format!("Error parsing '{}' value '{}': {}", name, value, e))
        }),
        None => Ok(None),
    }
}

fn required_arg<T>(args: &ArgMatches, name: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_arg(args, name)?.ok_or_else(|| Error::config(format!("Missing argument '{}'", name)))
}

impl RenderConfig {
    /// Override config values with command line arguments
    pub fn merge_args(mut self, args: &ArgMatches) -> Result<Self, Error> {
        if let Some(width) = parse_arg(args, "pagewidth")? {
            self.page_width_cm = width;
        }
        if let Some(height) = parse_arg(args, "pageheight")? {
            self.page_height_cm = height;
        }
        if let Some(basename) = args.value_of("basename") {
            self.basefilename = basename.to_string();
        }
        if let Some(files) = args.values_of("gpxfiles") {
            self.track_files = files.map(|f| f.to_string()).collect();
        }
        if let Some(file) = args.value_of("temptrackfile") {
            self.temp_track_file = Some(file.to_string());
        }
        if let Some(file) = args.value_of("tempwaypointfile") {
            self.temp_waypoint_file = Some(file.to_string());
        }
        if args.is_present("verbose") {
            self.verbose = true;
        }
        if let Some(dpi) = parse_arg(args, "dpi")? {
            self.dpi = dpi;
        }
        if let Some(scale_factor) = parse_arg(args, "scale-factor")? {
            self.scale_factor = scale_factor;
        }
        if let Some(style) = args.value_of("hikingmapstyle") {
            self.hikingmapstyle = style.to_string();
        }
        if let Some(format) = args.value_of("format") {
            self.output_format = format.to_string();
        }
        if let Some(file) = args.value_of("mbtiles") {
            self.tiles.mbtiles_file = Some(file.to_string());
        }
        if let Some(url) = args.value_of("wmts-url") {
            self.tiles.wmts_url = Some(url.to_string());
        }
        if let Some(subdomains) = args.value_of("wmts-subdomains") {
            self.tiles.wmts_subdomains = Some(subdomains.to_string());
        }
        if let Some(dir) = args.value_of("cachedir") {
            self.tiles.cache_dir = Some(dir.to_string());
        }
        if let Some(tile_size) = parse_arg(args, "tilesize")? {
            self.tiles.tile_size = tile_size;
        }
        if let Some(tile_format) = args.value_of("tileformat") {
            self.tiles.tile_format = tile_format.to_string();
        }
        if let Some(scheme) = parse_arg::<TileScheme>(args, "tilescheme")? {
            self.tiles.tile_scheme = scheme;
        }
        Ok(self)
    }
}

/// Built-in defaults, overridden by the config file, overridden by arguments
pub fn config_from_args(args: &ArgMatches) -> Result<RenderConfig, Error> {
    let cfgpath = match args.value_of("config") {
        Some(path) => Some(path.to_string()),
        None => search_config_file().map(|path| path.display().to_string()),
    };
    let config = match cfgpath {
        Some(path) => {
            info!("Reading configuration from '{}'", path);
            RenderConfig::default().merge_file(&read_config(&path)?)
        }
        None => RenderConfig::default(),
    };
    config.merge_args(args)
}

/// Map area from the `bbox` or `center` subcommand
pub fn area_from_args(args: &ArgMatches) -> Result<AreaSpec, Error> {
    match args.subcommand() {
        ("bbox", Some(sub_m)) => Ok(AreaSpec::BBox(BoundingBox::new(
            required_arg(sub_m, "minlon")?,
            required_arg(sub_m, "minlat")?,
            required_arg(sub_m, "maxlon")?,
            required_arg(sub_m, "maxlat")?,
        )?)),
        ("center", Some(sub_m)) => Ok(AreaSpec::Center(CenterSpec {
            center_lon: required_arg(sub_m, "lon")?,
            center_lat: required_arg(sub_m, "lat")?,
            scale_denominator: parse_arg(sub_m, "scale")?.unwrap_or(DEFAULT_SCALE_DENOMINATOR),
        })),
        _ => Err(Error::config("Either 'bbox' or 'center' mode is required")),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn matches(args: &[&str]) -> ArgMatches<'static> {
        app("0.0.0").get_matches_from_safe(args).unwrap()
    }

    #[test]
    fn test_bbox_args() {
        let args = matches(&[
            "tilesheet", "-b", "sheet1", "-v", "track1.gpx", "track2.gpx", "bbox", "-o", "-3.5",
            "-O", "-3.2", "-a", "50.0", "-A", "50.1",
        ]);
        let area = area_from_args(&args).unwrap();
        assert_eq!(
            area,
            AreaSpec::BBox(BoundingBox {
                min_lon: -3.5,
                min_lat: 50.0,
                max_lon: -3.2,
                max_lat: 50.1,
            })
        );
        let config = RenderConfig::default().merge_args(&args).unwrap();
        assert_eq!(config.basefilename, "sheet1");
        assert!(config.verbose);
        assert_eq!(config.track_files, vec!["track1.gpx", "track2.gpx"]);
        assert_eq!(config.output_path(), "sheet1.png");
    }

    #[test]
    fn test_center_args() {
        let args = matches(&["tilesheet", "center", "--lon", "4.5", "--lat", "-50"]);
        assert_eq!(
            area_from_args(&args).unwrap(),
            AreaSpec::Center(CenterSpec {
                center_lon: 4.5,
                center_lat: -50.0,
                scale_denominator: 50000.0,
            })
        );
        let args = matches(&[
            "tilesheet", "center", "--lon", "4.5", "--lat", "50", "--scale", "25000",
        ]);
        match area_from_args(&args).unwrap() {
            AreaSpec::Center(center) => assert_eq!(center.scale_denominator, 25000.0),
            area => panic!("unexpected area {:?}", area),
        }
    }

    #[test]
    fn test_usage_errors() {
        assert!(app("0.0.0").get_matches_from_safe(&["tilesheet"]).is_err());
        assert!(app("0.0.0")
            .get_matches_from_safe(&["tilesheet", "bbox", "-o", "1", "-O", "2", "-a", "3"])
            .is_err());

        let args = matches(&["tilesheet", "center", "--lon", "east", "--lat", "50"]);
        assert!(matches!(area_from_args(&args), Err(Error::Config(_))));

        let args = matches(&[
            "tilesheet", "bbox", "-o", "1", "-O", "2", "-a", "3", "-A", "3",
        ]);
        assert!(matches!(area_from_args(&args), Err(Error::Config(_))));

        let args = matches(&[
            "tilesheet", "--tilescheme", "google", "center", "--lon", "1", "--lat", "2",
        ]);
        assert!(matches!(
            RenderConfig::default().merge_args(&args),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_overlay_args() {
        let args = matches(&[
            "tilesheet", "-t", "overview.gpx", "-y", "wpt.gpx", "center", "--lon", "1", "--lat",
            "2",
        ]);
        let config = RenderConfig::default().merge_args(&args).unwrap();
        assert_eq!(config.temp_track_file, Some("overview.gpx".to_string()));
        assert_eq!(config.temp_waypoint_file, Some("wpt.gpx".to_string()));
        assert_eq!(
            config.overlay(),
            crate::render::SpecialOverlay::Overview("overview.gpx".to_string())
        );
    }

    #[test]
    fn test_config_layers() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "<tilesheet>
               <tilesmanager>
                 <tile_size>512</tile_size>
                 <tile_scheme>tms</tile_scheme>
               </tilesmanager>
               <dpi>200</dpi>
               <outputformat>jpeg</outputformat>
             </tilesheet>"
        )
        .unwrap();
        let cfgpath = file.path().display().to_string();
        let args = matches(&[
            "tilesheet", "-c", &cfgpath, "--dpi", "150", "center", "--lon", "1", "--lat", "2",
        ]);
        let config = config_from_args(&args).unwrap();
        // command line wins over the config file
        assert_eq!(config.dpi, 150);
        // config file wins over the defaults
        assert_eq!(config.tiles.tile_size, 512);
        assert_eq!(config.tiles.tile_scheme, TileScheme::Tms);
        assert_eq!(config.output_format, "jpeg");
        assert_eq!(config.page_width_cm, 20.0);
        assert_eq!(config.scale_factor, 1.0);

        let args = matches(&[
            "tilesheet", "-c", "/nonexistent/tilesheet.config.xml", "center", "--lon", "1",
            "--lat", "2",
        ]);
        assert!(matches!(config_from_args(&args), Err(Error::Config(_))));
    }
}
