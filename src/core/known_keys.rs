/*
 * Fixed lookup tables and display transforms for the dlsstweaks.ini dialect.
 * Everything in here is plain data plus pure functions: which keys are
 * booleans, which are tri-state overrides, the display labels for the
 * override values, the choice set for the DLSSPresets section, and the
 * canned descriptive texts the reader attaches to certain entries.
 *
 * Editor kinds and display values are derived from these tables only, never
 * from the value stored in the file.
 */
use crate::core::models::EditorKind;

pub const QUALITY_LEVELS_SECTION: &str = "DLSSQualityLevels";
pub const PRESETS_SECTION: &str = "DLSSPresets";
pub const DLL_OVERRIDES_SECTION: &str = "DLLPathOverrides";

pub const ULTRA_QUALITY_KEY: &str = "UltraQuality";
pub const ENABLE_KEY: &str = "Enable";

// Keys whose stored value is a lowercase true/false token, shown capitalized.
pub const BOOLEAN_KEYS: [&str; 6] = [
    "ForceDLAA",
    "DisableDevWatermark",
    "VerboseLogging",
    "Enable",
    "DisableIniMonitoring",
    "OverrideAppId",
];

// Keys whose stored value is a tri-state integer (-1 / 0 / 1).
pub const OVERRIDE_KEYS: [&str; 2] = ["OverrideAutoExposure", "OverrideDlssHud"];

// Display labels for the override values -1, 0 and 1, in that order.
pub const OVERRIDE_LABELS: [&str; 3] = ["Force disable", "Default", "Force enable"];

// Display values offered by the boolean toggle editor.
pub const BOOLEAN_CHOICES: [&str; 2] = ["False", "True"];

// Values accepted for keys in the DLSSPresets section.
pub const PRESET_CHOICES: [&str; 6] = ["Default", "A", "B", "C", "D", "F"];

pub const ULTRA_QUALITY_TEXT: &str = "UltraQuality: allows setting the ratio for the 'UltraQuality' level.\n\nNot every game allows using this level, some may only expose it as an option once this has been set to non-zero.\nA very small number might also already show an UltraQuality level, which this setting should be able to customize.\n(the number of games that work with this is very small unfortunately)\n\nSet to 0 to leave this as DLSS default.";

pub const DLL_OVERRIDES_TEXT: &str = "DLLPathOverrides: allows overriding the path that a DLL will be loaded from based on the filename of it\n\nDelete/clear the path to remove this override.";

pub fn is_boolean_key(key: &str) -> bool {
    BOOLEAN_KEYS.contains(&key)
}

pub fn is_override_key(key: &str) -> bool {
    OVERRIDE_KEYS.contains(&key)
}

/// Picks the editor offered for a setting, from its key and section names.
pub fn editor_kind_for(section: &str, key: &str) -> EditorKind {
    if is_boolean_key(key) {
        EditorKind::BooleanToggle
    } else if is_override_key(key) {
        EditorKind::OverrideChoice
    } else if section == PRESETS_SECTION {
        EditorKind::PresetChoice
    } else {
        EditorKind::FreeText
    }
}

/// Capitalizes the first character of `input`, leaving the rest untouched.
/// An empty string stays empty.
pub fn first_char_to_upper(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/*
 * Maps a raw stored value to its UI-facing representation: boolean keys get
 * their first character capitalized, override keys map -1/0/anything-else to
 * the three labels (unexpected values like `2` deliberately normalize to
 * "Force enable"), everything else passes through unchanged.
 */
pub fn display_value_for(key: &str, raw: &str) -> String {
    if is_boolean_key(key) {
        first_char_to_upper(raw)
    } else if is_override_key(key) {
        match raw {
            "-1" => OVERRIDE_LABELS[0].to_string(),
            "0" => OVERRIDE_LABELS[1].to_string(),
            _ => OVERRIDE_LABELS[2].to_string(),
        }
    } else {
        raw.to_string()
    }
}

/*
 * Inverse of `display_value_for`: override labels map back to -1/0/1 (an
 * unrecognized label writes as 1), boolean displays lower-case back to
 * true/false, anything else is written verbatim.
 */
pub fn stored_value_for(key: &str, display: &str) -> String {
    if is_override_key(key) {
        if display == OVERRIDE_LABELS[0] {
            "-1".to_string()
        } else if display == OVERRIDE_LABELS[1] {
            "0".to_string()
        } else {
            "1".to_string()
        }
    } else if is_boolean_key(key) {
        display.to_lowercase()
    } else {
        display.to_string()
    }
}
