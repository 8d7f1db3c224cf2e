//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::Error;
use crate::render::style::{parse_style, read_style, OverlayStyle, Rgba};
use std::io::ErrorKind;

#[test]
fn test_colors() {
    assert_eq!("#ff8000".parse::<Rgba>(), Ok(Rgba::new(255, 128, 0, 255)));
    assert_eq!("#0000FF80".parse::<Rgba>(), Ok(Rgba::new(0, 0, 255, 128)));
    assert!("red".parse::<Rgba>().is_err());
    assert!("#12345".parse::<Rgba>().is_err());
}

#[test]
fn test_parse_style() {
    let style = parse_style(
        r##"<hikingmapstyle>
             <track color="#00ff00" width="2.5"/>
             <waypoint radius="6"/>
             <label/>
           </hikingmapstyle>"##,
        "style.xml",
    )
    .unwrap();
    let default = OverlayStyle::default();
    assert_eq!(style.track.color, Rgba::new(0, 255, 0, 255));
    assert_eq!(style.track.width, 2.5);
    assert_eq!(style.overview, default.overview);
    assert_eq!(style.waypoint.radius, 6.0);
    assert_eq!(style.waypoint.color, default.waypoint.color);
}

#[test]
fn test_invalid_style() {
    let result = parse_style(
        r#"<hikingmapstyle><track width="wide"/></hikingmapstyle>"#,
        "style.xml",
    );
    assert!(matches!(result, Err(Error::Config(_))));

    let result = parse_style("<hikingmapstyle>", "style.xml");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_style() {
    match read_style("/nonexistent/hikingmap_style.xml") {
        Err(Error::Io(e)) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("unexpected result {:?}", other),
    }
}
