/*
 * The INI writer: serializes the current in-memory settings (plus any
 * pending DLL path overrides) back into INI syntax and persists the result.
 * The output document model is `configparser::ini::Ini`, built
 * case-sensitively so section and key names survive the round trip, with
 * insertion order preserved; values are never wrapped in quotes.
 *
 * Display transforms are inverted here: override labels map back to
 * -1/0/1 and boolean displays lower-case back to true/false. Pending
 * overrides are flushed into the DLLPathOverrides section and the map is
 * cleared before returning, so a save always drains the session's staged
 * overrides exactly once.
 */
use crate::core::known_keys::{self, DLL_OVERRIDES_SECTION};
use crate::core::models::Setting;
use configparser::ini::Ini;
use std::collections::HashMap;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum WriteError {
    Io(io::Error),
}

impl From<io::Error> for WriteError {
    fn from(err: io::Error) -> Self {
        WriteError::Io(err)
    }
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Io(e) => write!(f, "Settings file write error: {e}"),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Io(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, WriteError>;

/*
 * Builds the output document: one value per key per section, settings first
 * in record order, then the pending overrides assigned into the
 * DLLPathOverrides section (overwriting same-named entries).
 */
fn build_document(settings: &[Setting], dll_overrides: &HashMap<String, String>) -> Ini {
    let mut document = Ini::new_cs();
    for setting in settings {
        document.set(
            &setting.section,
            &setting.key,
            Some(known_keys::stored_value_for(
                &setting.key,
                &setting.display_value,
            )),
        );
    }
    for (filename, path) in dll_overrides {
        document.set(DLL_OVERRIDES_SECTION, filename, Some(path.clone()));
    }
    document
}

/// Renders the settings and pending overrides as INI text without touching
/// the file system.
pub fn render_settings(settings: &[Setting], dll_overrides: &HashMap<String, String>) -> String {
    build_document(settings, dll_overrides).writes()
}

/*
 * Persists the settings and pending overrides to `path`, rewriting the file
 * in full, then clears the override map. Callers re-run the reader
 * afterwards so in-memory state matches on-disk truth.
 */
pub fn write_settings_file(
    path: &Path,
    settings: &[Setting],
    dll_overrides: &mut HashMap<String, String>,
) -> Result<()> {
    log::trace!(
        "IniWriter: Writing {} settings and {} pending overrides to {path:?}",
        settings.len(),
        dll_overrides.len()
    );
    let document = build_document(settings, dll_overrides);
    document.write(path)?;
    dll_overrides.clear();
    log::debug!("IniWriter: Persisted settings to {path:?}");
    Ok(())
}
