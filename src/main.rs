//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::ArgMatches;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use tilesheet_core::cli;
use tilesheet_core::render::render_sheet;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG").ok();
    let rust_log = match (args.value_of("loglevel"), rust_log_env.as_deref()) {
        (Some(loglevel), _) => loglevel,
        (None, Some(rust_log)) => rust_log,
        (None, None) if args.is_present("verbose") => "debug",
        (None, None) => "info",
    };
    builder.parse_filters(rust_log);

    builder.init();
}

fn main() {
    let version = crate_version!();
    let args = cli::app(version)
        .get_matches_from_safe(env::args())
        .unwrap_or_else(|e| e.exit());
    init_logger(&args);

    let config = cli::config_from_args(&args).unwrap_or_else(|err| {
        eprintln!("Error reading configuration - {}", err);
        process::exit(1)
    });
    let area = cli::area_from_args(&args).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1)
    });
    match render_sheet(&config, &area) {
        Ok(path) => debug!("Finished {}", path),
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            process::exit(1)
        }
    }
}
