/*
 * File-level access to the settings file, behind the
 * `SettingsStoreOperations` trait so the application logic can be unit
 * tested against mock stores. The concrete implementation
 * (`CoreSettingsStore`) is a thin composition of std::fs with the reader
 * and writer modules.
 *
 * Also owns resolution of the default settings path: the INI lives next to
 * the executable, with the current directory as a fallback when the
 * executable path cannot be determined.
 */
use crate::core::ini_reader::{self, ReadError};
use crate::core::ini_writer;
use crate::core::models::Setting;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const INI_FILENAME: &str = "dlsstweaks.ini";

/// Resolves the settings file path: `dlsstweaks.ini` alongside the
/// executable, or relative to the current directory as a fallback.
pub fn default_ini_path() -> PathBuf {
    match env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(dir) => dir.join(INI_FILENAME),
            None => PathBuf::from(INI_FILENAME),
        },
        Err(e) => {
            log::debug!(
                "SettingsStore: Could not determine executable path ({e}), using current directory"
            );
            PathBuf::from(INI_FILENAME)
        }
    }
}

pub trait SettingsStoreOperations: Send + Sync {
    /// Reads and parses the settings file. A missing file reports as
    /// `ReadError::MissingOrEmpty`, the same fatal condition as empty content.
    fn load(&self, path: &Path) -> ini_reader::Result<Vec<Setting>>;

    /// Serializes the settings plus pending overrides to `path`, rewriting
    /// the file in full and draining the override map.
    fn save(
        &self,
        path: &Path,
        settings: &[Setting],
        dll_overrides: &mut HashMap<String, String>,
    ) -> ini_writer::Result<()>;
}

pub struct CoreSettingsStore {}

impl CoreSettingsStore {
    pub fn new() -> Self {
        CoreSettingsStore {}
    }
}

impl Default for CoreSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStoreOperations for CoreSettingsStore {
    fn load(&self, path: &Path) -> ini_reader::Result<Vec<Setting>> {
        log::trace!("CoreSettingsStore: Loading settings from {path:?}");
        if !path.exists() {
            log::error!("CoreSettingsStore: Settings file {path:?} does not exist");
            return Err(ReadError::MissingOrEmpty);
        }
        let text = fs::read_to_string(path)?;
        let settings = ini_reader::parse_settings(&text)?;
        log::debug!(
            "CoreSettingsStore: Loaded {} settings from {path:?}",
            settings.len()
        );
        Ok(settings)
    }

    fn save(
        &self,
        path: &Path,
        settings: &[Setting],
        dll_overrides: &mut HashMap<String, String>,
    ) -> ini_writer::Result<()> {
        ini_writer::write_settings_file(path, settings, dll_overrides)
    }
}
