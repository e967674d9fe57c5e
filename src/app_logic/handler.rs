use crate::app_logic::ui_constants::APP_TITLE;
use crate::core::{
    ReadError, Setting, SettingsStoreOperations, WriteError, section_order,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub enum LogicError {
    Read(ReadError),
    Write(WriteError),
    UnknownSetting { section: String, key: String },
    InvalidChoice {
        key: String,
        value: String,
        choices: &'static [&'static str],
    },
    InvalidDllPath(String),
}

impl From<ReadError> for LogicError {
    fn from(err: ReadError) -> Self {
        LogicError::Read(err)
    }
}

impl From<WriteError> for LogicError {
    fn from(err: WriteError) -> Self {
        LogicError::Write(err)
    }
}

impl std::fmt::Display for LogicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicError::Read(e) => write!(f, "{e}"),
            LogicError::Write(e) => write!(f, "{e}"),
            LogicError::UnknownSetting { section, key } => {
                write!(f, "No setting named '{key}' in section '{section}'")
            }
            LogicError::InvalidChoice { key, value, choices } => write!(
                f,
                "'{value}' is not a valid value for '{key}'. Valid values: {}",
                choices.join(", ")
            ),
            LogicError::InvalidDllPath(path) => {
                write!(f, "Could not derive a DLL filename from '{path}'")
            }
        }
    }
}

impl std::error::Error for LogicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogicError::Read(e) => Some(e),
            LogicError::Write(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogicError>;

/*
 * Manages the application state in a shell-agnostic manner: the loaded
 * settings, the pending DLL-override map collected during the session, and
 * the unsaved-changes flag. Every mutation the shell can trigger goes
 * through here; the shell itself performs no decision logic.
 *
 * File access is delegated to a `SettingsStoreOperations` implementation so
 * the whole type can be exercised with a mock store in `handler_tests.rs`.
 */
pub struct ConfigToolLogic {
    store: Arc<dyn SettingsStoreOperations>,
    ini_path: PathBuf,
    settings: Vec<Setting>,
    dll_overrides: HashMap<String, String>,
    dirty: bool,
}

impl ConfigToolLogic {
    pub fn new(store: Arc<dyn SettingsStoreOperations>, ini_path: PathBuf) -> Self {
        ConfigToolLogic {
            store,
            ini_path,
            settings: Vec::new(),
            dll_overrides: HashMap::new(),
            dirty: false,
        }
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Section names in display order (first appearance in the file).
    pub fn sections(&self) -> Vec<&str> {
        section_order(&self.settings)
    }

    pub fn pending_overrides(&self) -> &HashMap<String, String> {
        &self.dll_overrides
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Title line for the shell: application name, filename, and a `*`
    /// marker while there are unsaved changes.
    pub fn title(&self) -> String {
        let filename = self
            .ini_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.ini_path.to_string_lossy().into_owned());
        let marker = if self.dirty { "*" } else { "" };
        format!("{APP_TITLE} - {filename}{marker}")
    }

    /*
     * Rebuilds the in-memory settings from the file, discarding any edits.
     * A missing or empty file propagates as a fatal read error; the caller
     * decides how to surface it (at startup this terminates the process).
     */
    pub fn reload(&mut self) -> Result<()> {
        log::trace!("ConfigToolLogic: Reloading settings from {:?}", self.ini_path);
        self.settings = self.store.load(&self.ini_path)?;
        self.dirty = false;
        log::debug!(
            "ConfigToolLogic: Loaded {} settings across {} sections",
            self.settings.len(),
            self.sections().len()
        );
        Ok(())
    }

    /*
     * Writes the current settings (plus pending DLL overrides, which are
     * drained by the store) back to disk, then re-reads the file so the
     * in-memory state matches on-disk truth and the dirty flag resets.
     */
    pub fn save(&mut self) -> Result<()> {
        log::trace!("ConfigToolLogic: Saving settings to {:?}", self.ini_path);
        self.store
            .save(&self.ini_path, &self.settings, &mut self.dll_overrides)?;
        self.reload()
    }

    pub fn find_setting(&self, section: &str, key: &str) -> Option<&Setting> {
        self.settings
            .iter()
            .find(|s| s.section == section && s.key == key)
    }

    /*
     * Updates the display value of one setting, after validating the value
     * against the setting's editor choice set (boolean toggles, override
     * labels and preset letters are closed sets; free text accepts
     * anything). Marks the session dirty.
     */
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let setting = self
            .settings
            .iter_mut()
            .find(|s| s.section == section && s.key == key)
            .ok_or_else(|| LogicError::UnknownSetting {
                section: section.to_string(),
                key: key.to_string(),
            })?;

        if let Some(choices) = setting.editor.choices() {
            if !choices.contains(&value) {
                return Err(LogicError::InvalidChoice {
                    key: key.to_string(),
                    value: value.to_string(),
                    choices,
                });
            }
        }

        log::debug!(
            "ConfigToolLogic: [{section}] {key}: '{}' -> '{value}'",
            setting.display_value
        );
        setting.display_value = value.to_string();
        self.dirty = true;
        Ok(())
    }

    /*
     * Stages a DLL path override: the base filename (directories and
     * extension stripped) maps to the full replacement path, to be flushed
     * into the DLLPathOverrides section on the next save. Returns the
     * staged (filename, path) pair so the shell can echo it back.
     */
    pub fn stage_dll_override(&mut self, dll_path: &str) -> Result<(String, String)> {
        let filename = dll_base_name(dll_path)
            .ok_or_else(|| LogicError::InvalidDllPath(dll_path.to_string()))?;
        log::debug!("ConfigToolLogic: Staging DLL override {filename} -> {dll_path}");
        self.dll_overrides
            .insert(filename.clone(), dll_path.to_string());
        Ok((filename, dll_path.to_string()))
    }

    /// The descriptive text for a setting, or `None` when it has none.
    pub fn description_for(&self, section: &str, key: &str) -> Option<&str> {
        self.find_setting(section, key)
            .map(|s| s.comment.as_str())
            .filter(|comment| !comment.is_empty())
    }
}

/*
 * Extracts the base filename of a DLL path, without directories or
 * extension. Handles both separator styles so Windows-style paths behave
 * the same everywhere (the target file format is a Windows one).
 */
fn dll_base_name(path: &str) -> Option<String> {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    if file_name.is_empty() {
        return None;
    }
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
