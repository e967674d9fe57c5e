/*
 * This module consolidates the core, UI-agnostic logic of the application:
 * the settings data model, the fixed lookup tables for the dlsstweaks.ini
 * dialect, the INI reader/writer pair, and the `SettingsStoreOperations`
 * abstraction used by the application logic so file access can be mocked
 * in tests. Nothing in here knows about the interactive shell.
 */
pub mod ini_reader;
pub mod ini_writer;
pub mod known_keys;
pub mod models;
pub mod settings_store;

// Re-export key structures and enums
pub use models::{EditorKind, Setting, section_order};

// Re-export reader/writer entry points and their error types
pub use ini_reader::{ReadError, parse_settings};
pub use ini_writer::{WriteError, render_settings, write_settings_file};

// Re-export settings store related items
pub use settings_store::{
    CoreSettingsStore, INI_FILENAME, SettingsStoreOperations, default_ini_path,
};
