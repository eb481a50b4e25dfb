use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is not consulted. Only this crate is
/// raised to `debug`; eframe and the windowing stack stay at `warn`.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "warn,beach_sand=debug"
    } else {
        "warn,beach_sand=info"
    }
}

/// Sets up the global `tracing` subscriber.
///
/// `RUST_LOG` is only honoured with `debug` set, so a stray environment
/// variable cannot make a normal run verbose.
pub fn init(debug: bool) {
    let fallback = default_directives(debug);
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    } else {
        EnvFilter::new(fallback)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        for debug in [false, true] {
            assert!(EnvFilter::try_new(default_directives(debug)).is_ok());
        }
    }

    #[test]
    fn debug_only_raises_this_crate() {
        assert!(default_directives(true).contains("beach_sand=debug"));
        assert!(default_directives(true).starts_with("warn"));
        assert!(!default_directives(false).contains("debug"));
    }
}
