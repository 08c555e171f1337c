use crate::config;

/// Load settings, falling back to defaults when the config is unusable.
///
/// Logging is not up yet at this point, so the reason for a fallback is
/// printed to stderr and also handed back for the log file.
pub fn load_settings() -> (config::Settings, Option<String>) {
    let fallback = match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => return (s, None),
            Err(msg) => format!("invalid config, using defaults: {msg}"),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => format!("failed to load config, using defaults: {e}"),
    };

    eprintln!("encore: {fallback}");
    (config::Settings::default(), Some(fallback))
}
