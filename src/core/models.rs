use crate::core::known_keys;

// Describes which editor the UI should offer for a setting's value.
// Derived purely from the key name and section name via the fixed lookup
// tables in `known_keys`, never from the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    FreeText,
    BooleanToggle,
    OverrideChoice,
    PresetChoice,
}

impl EditorKind {
    /// Returns the closed set of display values this editor accepts,
    /// or `None` when the value is free text.
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            EditorKind::FreeText => None,
            EditorKind::BooleanToggle => Some(&known_keys::BOOLEAN_CHOICES),
            EditorKind::OverrideChoice => Some(&known_keys::OVERRIDE_LABELS),
            EditorKind::PresetChoice => Some(&known_keys::PRESET_CHOICES),
        }
    }
}

// One configuration entry as presented to the user. `display_value` holds
// the UI-facing representation (e.g. `True` rather than `true`); the writer
// applies the inverse transform when serializing back to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub section: String,
    pub key: String,
    pub display_value: String,
    pub comment: String,
    pub editor: EditorKind,
}

impl Setting {
    /// Creates a Setting, deriving its `EditorKind` from the section and key.
    pub fn new(section: &str, key: &str, display_value: String, comment: String) -> Self {
        Setting {
            editor: known_keys::editor_kind_for(section, key),
            section: section.to_string(),
            key: key.to_string(),
            display_value,
            comment,
        }
    }
}

/// Returns the section names in order of first appearance.
///
/// Sections are not standalone objects; grouping is derived implicitly from
/// record order, so callers that render grouped output use this helper.
pub fn section_order(settings: &[Setting]) -> Vec<&str> {
    let mut order: Vec<&str> = Vec::new();
    for setting in settings {
        if !order.contains(&setting.section.as_str()) {
            order.push(&setting.section);
        }
    }
    order
}
