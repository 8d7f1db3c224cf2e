//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Test logger collecting formatted log lines

use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

static LOG_LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        if let Ok(mut lines) = LOG_LINES.lock() {
            lines.push(format!("{} {}", record.level(), record.args()));
        }
    }
    fn flush(&self) {}
}

/// Installs the capturing logger once per test binary
pub fn capture_logs() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Whether any captured line, formatted as `LEVEL message`, contains `text`
pub fn logged(text: &str) -> bool {
    LOG_LINES
        .lock()
        .map(|lines| lines.iter().any(|line| line.contains(text)))
        .unwrap_or(false)
}
