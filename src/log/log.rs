use env_logger::fmt::{Color, Formatter};
use env_logger::Builder;
use log::{Level, LevelFilter, Record};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

const SUCCESS_TINT: (u8, u8, u8) = (0, 255, 0); // pure green
const WARNING_TINT: (u8, u8, u8) = (255, 255, 0); // pure yellow

/// 50 / 50 blend of two RGB colors
#[inline]
fn blend((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> (u8, u8, u8) {
    (
        ((r1 as u16 + r2 as u16) / 2) as u8,
        ((g1 as u16 + g2 as u16) / 2) as u8,
        ((b1 as u16 + b2 as u16) / 2) as u8,
    )
}

/// Base color for each standard log level
#[inline]
fn base_rgb(level: Level) -> (u8, u8, u8) {
    match level {
        Level::Error => (255, 0, 0),     // red
        Level::Warn => (255, 255, 0),    // yellow
        Level::Info => (255, 255, 255),  // white
        Level::Debug => (200, 200, 255), // blue
        Level::Trace => (220, 220, 220), // grey
    }
}

/// Colour of a record, tinted by the `success` / `warning` targets the
/// macros below log to.
fn record_rgb(target: &str, level: Level) -> (u8, u8, u8) {
    match target {
        "success" => blend(base_rgb(level), SUCCESS_TINT),
        "warning" => blend(base_rgb(level), WARNING_TINT),
        _ => base_rgb(level),
    }
}

/// Turns the absolute source path of a record into `src/…/file.rs:line:1`,
/// relative to the crate root so terminals and IDEs can link it.
fn record_location(file: Option<&str>, line: Option<u32>) -> String {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut full = PathBuf::from(file.unwrap_or("unknown"));
    if full.is_relative() {
        full = env::current_dir().unwrap_or_default().join(full);
    }
    let rel = full
        .strip_prefix(manifest_dir)
        .unwrap_or(&full)
        .to_string_lossy()
        .replace('\\', "/");
    format!("{rel}:{}:1", line.unwrap_or(0))
}

/// Installs the global logger.
///
/// `level` is the default filter; `RUST_LOG` still overrides it per module.
/// Calling it twice returns an error instead of panicking.
pub fn init_log(level: LevelFilter) -> anyhow::Result<()> {
    Builder::new()
        .format(|buf: &mut Formatter, record: &Record| {
            let mut style = buf.style();
            let rgb = record_rgb(record.target(), record.level());
            style.set_color(Color::Rgb(rgb.0, rgb.1, rgb.2));

            match record.level() {
                Level::Error | Level::Warn => style.set_bold(true),
                Level::Trace => style.set_dimmed(true),
                _ => style.set_bold(false),
            };

            // The location part carries no ANSI codes so it stays clickable.
            writeln!(
                buf,
                "[{} {}] {}  \n{}",
                chrono::Local::now().format("%H:%M:%S"),
                style.value(record.level()),
                style.value(record.args()),
                record_location(record.file(), record.line())
            )
        })
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .map_err(Into::into)
}

#[macro_export]
macro_rules! info_success {
    ($($arg:tt)*) => {
        ::log::info!(target: "success", "[SUCCESS] {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! trace_success {
    ($($arg:tt)*) => {
        ::log::trace!(target: "success", "[SUCCESS] {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! warn_warning
{ ($($arg:tt)*) => { ::log::warn! (target: "warning",  "[WARNING] {}",  format!($($arg)*)); }; }


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_averages_channels() {
        assert_eq!(blend((255, 0, 0), (0, 255, 0)), (127, 127, 0));
        assert_eq!(blend((10, 20, 30), (10, 20, 30)), (10, 20, 30));
    }

    #[test]
    fn tinted_targets_differ_from_plain_ones() {
        let plain = record_rgb("device_forge", Level::Info);
        assert_eq!(plain, base_rgb(Level::Info));
        assert_ne!(record_rgb("success", Level::Info), plain);
        assert_ne!(record_rgb("warning", Level::Info), plain);
    }

    #[test]
    fn location_is_relative_to_the_crate() {
        let file = concat!(env!("CARGO_MANIFEST_DIR"), "/src/lib.rs");
        assert_eq!(record_location(Some(file), Some(7)), "src/lib.rs:7:1");
    }

    #[test]
    fn warning_macro_logs_to_the_warning_target() {
        let ((), records) = capture::capture(|| {
            crate::warn_warning!("low on {}", "queues");
        });
        assert_eq!(records.len(), 1);
        assert!(records[0].is_warning());
        assert_eq!(records[0].message, "[WARNING] low on queues");
    }

    #[test]
    fn missing_line_defaults_to_zero() {
        assert!(record_location(None, None).ends_with(":0:1"));
    }
}
