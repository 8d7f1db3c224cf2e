//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::provider::tiles_manager::TileSource;
use crate::provider::{TileError, TileRef};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;

const TILES_USER_AGENT: &str = "hikingmap/render_tiles";
const TILES_ACCEPT: &str = "image/png,image/*;q=0.9,*/*;q=0.8";

/// Tiles downloaded from a URL template
pub struct RemoteTiles {
    url: String,
    subdomains: Vec<String>,
    client: Client,
}

impl RemoteTiles {
    pub fn new(url: &str, subdomains: &str) -> Result<RemoteTiles, TileError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(TILES_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(TILES_ACCEPT));
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| TileError::Source {
                name: url.to_string(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(RemoteTiles {
            url: url.to_string(),
            subdomains: parse_subdomains(subdomains),
            client,
        })
    }

    /// Download URL of a tile, subdomains rotate with the tile position
    pub fn tile_url(&self, tile: &TileRef) -> String {
        let mut url = self
            .url
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string());
        if !self.subdomains.is_empty() {
            let idx = (tile.x as usize + tile.y as usize) % self.subdomains.len();
            url = url.replace("{s}", &self.subdomains[idx]);
        }
        url
    }
}

/// "a,b,c" or "abc"
pub fn parse_subdomains(subdomains: &str) -> Vec<String> {
    if subdomains.contains(',') {
        subdomains
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        subdomains
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_string())
            .collect()
    }
}

impl TileSource for RemoteTiles {
    fn name(&self) -> String {
        let host = self
            .url
            .split("://")
            .nth(1)
            .unwrap_or(&self.url)
            .split('/')
            .next()
            .unwrap_or("");
        let host = host.trim_start_matches("{s}.");
        let name: String = host
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() {
            "remote".to_string()
        } else {
            name
        }
    }
    fn info(&self) -> String {
        format!("Remote tiles: {}", self.url)
    }
    fn fetch(&self, tile: &TileRef) -> Result<Vec<u8>, TileError> {
        let url = self.tile_url(tile);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TileError::unavailable(tile, format!("Request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(TileError::unavailable(
                tile,
                format!("HTTP {} from {}", response.status(), url),
            ));
        }
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| TileError::unavailable(tile, format!("Failed to read response: {}", e)))
    }
}

#[test]
fn test_tile_url() {
    let remote = RemoteTiles::new("http://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", "abc")
        .unwrap();
    assert_eq!(
        remote.tile_url(&TileRef::new(10, 5, 5)),
        "http://b.tile.openstreetmap.org/10/5/5.png"
    );
    assert_eq!(
        remote.tile_url(&TileRef::new(10, 5, 4)),
        "http://a.tile.openstreetmap.org/10/5/4.png"
    );
    assert_eq!(remote.name(), "tile.openstreetmap.org");
}

#[test]
fn test_subdomains() {
    assert_eq!(parse_subdomains("abc"), vec!["a", "b", "c"]);
    assert_eq!(
        parse_subdomains("tiles1, tiles2"),
        vec!["tiles1".to_string(), "tiles2".to_string()]
    );
    assert!(parse_subdomains("").is_empty());

    let remote =
        RemoteTiles::new("https://tiles.example.org:8080/wmts/{z}/{x}/{y}.jpg", "").unwrap();
    assert_eq!(
        remote.tile_url(&TileRef::new(3, 1, 2)),
        "https://tiles.example.org:8080/wmts/3/1/2.jpg"
    );
    assert_eq!(remote.name(), "tiles.example.org_8080");
}
