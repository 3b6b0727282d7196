use crate::config::Settings;

/// Load and validate settings. A broken config never stops start-up: the
/// defaults are used instead and the reason is handed back so it can be
/// logged once logging is up.
pub fn load_settings() -> (Settings, Option<String>) {
    match Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (Settings::default(), Some(format!("invalid config: {msg}"))),
        },
        Err(e) => (
            Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
