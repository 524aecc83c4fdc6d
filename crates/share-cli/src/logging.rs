use std::io::Write;

/// Picks the log filter: an explicit level wins over the debug flag.
fn filter_for(debug: bool, level: Option<&str>) -> String {
    match level {
        Some(level) if !level.trim().is_empty() => level.to_string(),
        _ if debug => "debug".to_string(),
        _ => "info".to_string(),
    }
}

/// Initializes the logger on stderr with timestamped lines.
///
/// `level` accepts `RUST_LOG` style filters such as `share_core=debug`.
pub fn init_logging(debug: bool, level: Option<&str>) {
    env_logger::Builder::new()
        .parse_filters(&filter_for(debug, level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_overrides_debug_flag() {
        assert_eq!(filter_for(true, Some("share_core=trace")), "share_core=trace");
        assert_eq!(filter_for(false, Some("warn")), "warn");
    }

    #[test]
    fn debug_flag_picks_the_default_level() {
        assert_eq!(filter_for(true, None), "debug");
        assert_eq!(filter_for(false, None), "info");
        assert_eq!(filter_for(true, Some("  ")), "debug");
    }
}
