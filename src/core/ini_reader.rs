/*
 * The INI reader: turns the raw text of a dlsstweaks.ini file into an
 * ordered list of `Setting` records. This is a single line-by-line pass
 * threading a small accumulator (`ParseState`) through the fold; there is
 * no global mutable state and no lookahead.
 *
 * The parser is deliberately lenient: lines that are neither comments,
 * section headers nor key=value pairs are skipped without surfacing an
 * error. The only fatal condition is input with no non-empty content at
 * all, which callers treat as "the file is missing or empty".
 *
 * Section-specific behavior handled here:
 * - comments directly preceding a key attach to that key, with a blank
 *   separator line after the first fragment of each comment block;
 * - keys in DLSSQualityLevels (other than Enable) and in DLSSPresets reuse
 *   the section's last seen comment when they carry none of their own;
 * - every key in DLLPathOverrides gets a fixed explanatory comment;
 * - a default UltraQuality entry is synthesized at the end of the
 *   DLSSQualityLevels records when the file does not define one.
 */
use crate::core::known_keys::{
    self, DLL_OVERRIDES_SECTION, DLL_OVERRIDES_TEXT, ENABLE_KEY, PRESETS_SECTION,
    QUALITY_LEVELS_SECTION, ULTRA_QUALITY_KEY, ULTRA_QUALITY_TEXT,
};
use crate::core::models::Setting;
use std::io;

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    MissingOrEmpty,
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "Settings file I/O error: {e}"),
            ReadError::MissingOrEmpty => {
                write!(f, "Settings file is missing or has no content")
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::MissingOrEmpty => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;

// Accumulator threaded through the parsing pass.
#[derive(Debug, Default)]
struct ParseState {
    section: String,
    pending_comment: String,
    // Last explicit comment seen in each of the two backfilling sections,
    // reused by later keys in the same section that carry no comment.
    quality_levels_comment: String,
    presets_comment: String,
    ultra_quality_added: bool,
}

impl ParseState {
    /*
     * Emits the synthesized UltraQuality record if the pass is currently
     * leaving the DLSSQualityLevels section (or ending input inside it)
     * without having seen an explicit UltraQuality key. Runs at most once.
     */
    fn flush_quality_levels(&mut self, settings: &mut Vec<Setting>) {
        if self.section == QUALITY_LEVELS_SECTION && !self.ultra_quality_added {
            log::debug!("IniReader: Synthesizing default UltraQuality entry");
            settings.push(Setting::new(
                QUALITY_LEVELS_SECTION,
                ULTRA_QUALITY_KEY,
                "0".to_string(),
                ULTRA_QUALITY_TEXT.to_string(),
            ));
            self.ultra_quality_added = true;
        }
    }
}

// Strips leading/trailing spaces and tabs, the only padding the format allows.
fn trim_ws(text: &str) -> &str {
    text.trim_matches(|c: char| c == ' ' || c == '\t')
}

/*
 * Parses the full text of a settings file into an ordered list of `Setting`
 * records. Grouping into sections is implicit in record order; callers that
 * need it use `models::section_order`.
 *
 * Fails with `ReadError::MissingOrEmpty` when the text contains no non-empty
 * line, matching the fatal-startup contract for an absent or empty file.
 */
pub fn parse_settings(text: &str) -> Result<Vec<Setting>> {
    if text.lines().all(|line| trim_ws(line).is_empty()) {
        log::error!("IniReader: Input has no non-empty lines");
        return Err(ReadError::MissingOrEmpty);
    }

    let mut settings: Vec<Setting> = Vec::new();
    let mut state = ParseState::default();

    for raw_line in text.lines() {
        let line = trim_ws(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(fragment) = line.strip_prefix(';') {
            let starts_block = state.pending_comment.is_empty();
            state.pending_comment.push_str(trim_ws(fragment));
            state.pending_comment.push('\n');
            if starts_block {
                // Paragraph convention of the source format: a blank line
                // follows the opening fragment of each comment block.
                state.pending_comment.push('\n');
            }
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
            state.pending_comment.clear();
            state.flush_quality_levels(&mut settings);
            state.section = line[1..line.len() - 1].to_string();
            log::trace!("IniReader: Entering section '{}'", state.section);
            continue;
        }

        let Some(separator) = line.find('=') else {
            // Malformed line; the lenient-parser policy is to skip it.
            log::trace!("IniReader: Skipping line without separator: '{line}'");
            continue;
        };
        let key = trim_ws(&line[..separator]);
        let value = trim_ws(&line[separator + 1..]);

        if state.section == DLL_OVERRIDES_SECTION {
            state.pending_comment = DLL_OVERRIDES_TEXT.to_string();
        }

        if state.section == QUALITY_LEVELS_SECTION && key != ENABLE_KEY {
            if !state.pending_comment.is_empty() {
                state.quality_levels_comment = state.pending_comment.clone();
            } else {
                state.pending_comment = state.quality_levels_comment.clone();
            }
            if key == ULTRA_QUALITY_KEY {
                state.pending_comment = ULTRA_QUALITY_TEXT.to_string();
            }
        }

        if state.section == PRESETS_SECTION {
            if !state.pending_comment.is_empty() {
                state.presets_comment = state.pending_comment.clone();
            } else {
                state.pending_comment = state.presets_comment.clone();
            }
        }

        settings.push(Setting::new(
            &state.section,
            key,
            known_keys::display_value_for(key, value),
            state.pending_comment.trim_end().to_string(),
        ));

        if state.section == QUALITY_LEVELS_SECTION && key == ULTRA_QUALITY_KEY {
            state.ultra_quality_added = true;
        }

        state.pending_comment.clear();
    }

    // Input may end while still inside DLSSQualityLevels.
    state.flush_quality_levels(&mut settings);

    log::debug!("IniReader: Parsed {} settings", settings.len());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::EditorKind;

    fn find<'a>(settings: &'a [Setting], section: &str, key: &str) -> &'a Setting {
        settings
            .iter()
            .find(|s| s.section == section && s.key == key)
            .unwrap_or_else(|| panic!("setting [{section}] {key} not found"))
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(parse_settings(""), Err(ReadError::MissingOrEmpty)));
        assert!(matches!(
            parse_settings("\r\n\r\n \t \r\n"),
            Err(ReadError::MissingOrEmpty)
        ));
    }

    #[test]
    fn test_basic_key_value_parsing_with_padding() {
        let text = "[DLSSTweaks]\r\n  Quality \t=  0.66 \r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].section, "DLSSTweaks");
        assert_eq!(settings[0].key, "Quality");
        assert_eq!(settings[0].display_value, "0.66");
        assert_eq!(settings[0].editor, EditorKind::FreeText);
    }

    #[test]
    fn test_value_may_contain_further_separators() {
        // Only the first '=' splits; the rest belongs to the value.
        let text = "[S]\r\nFormula = a=b=c\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings[0].display_value, "a=b=c");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "[S]\r\nnot a pair\r\n[unclosed\r\nKey = 1\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].key, "Key");
        // The unclosed bracket line is not a header; section is unchanged.
        assert_eq!(settings[0].section, "S");
    }

    #[test]
    fn test_boolean_key_display_is_capitalized() {
        let text = "[DLSSTweaks]\r\nForceDLAA = true\r\nVerboseLogging = false\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(find(&settings, "DLSSTweaks", "ForceDLAA").display_value, "True");
        assert_eq!(
            find(&settings, "DLSSTweaks", "VerboseLogging").display_value,
            "False"
        );
        assert_eq!(
            find(&settings, "DLSSTweaks", "ForceDLAA").editor,
            EditorKind::BooleanToggle
        );
    }

    #[test]
    fn test_override_key_display_labels() {
        let text =
            "[DLSSTweaks]\r\nOverrideAutoExposure = -1\r\nOverrideDlssHud = 0\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(
            find(&settings, "DLSSTweaks", "OverrideAutoExposure").display_value,
            "Force disable"
        );
        assert_eq!(
            find(&settings, "DLSSTweaks", "OverrideDlssHud").display_value,
            "Default"
        );
        assert_eq!(
            find(&settings, "DLSSTweaks", "OverrideDlssHud").editor,
            EditorKind::OverrideChoice
        );
    }

    #[test]
    fn test_comment_attaches_to_next_key() {
        let text = "[S]\r\n; Sharpening value\r\nSharpening = 0.5\r\nOther = 1\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(find(&settings, "S", "Sharpening").comment, "Sharpening value");
        // Outside the backfilling sections, a key without its own comment
        // gets none.
        assert_eq!(find(&settings, "S", "Other").comment, "");
    }

    #[test]
    fn test_multi_line_comment_keeps_paragraph_break() {
        let text = "[S]\r\n; First line\r\n; second line\r\n; third line\r\nKey = 1\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(
            find(&settings, "S", "Key").comment,
            "First line\n\nsecond line\nthird line"
        );
    }

    #[test]
    fn test_quality_levels_comment_backfill() {
        let text = "[DLSSQualityLevels]\r\n; Custom comment\r\nQuality = 1\r\nBalanced = 2\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(
            find(&settings, "DLSSQualityLevels", "Quality").comment,
            "Custom comment"
        );
        assert_eq!(
            find(&settings, "DLSSQualityLevels", "Balanced").comment,
            "Custom comment"
        );
    }

    #[test]
    fn test_quality_levels_enable_key_excluded_from_backfill() {
        let text = "[DLSSQualityLevels]\r\n; Ratio comment\r\nQuality = 1\r\nEnable = true\r\n";
        let settings = parse_settings(text).unwrap();
        let enable = find(&settings, "DLSSQualityLevels", "Enable");
        assert_eq!(enable.comment, "");
        assert_eq!(enable.display_value, "True");
    }

    #[test]
    fn test_presets_comment_backfill_is_independent() {
        let text = "[DLSSQualityLevels]\r\n; Quality ratios\r\nQuality = 1\r\n\
                    [DLSSPresets]\r\n; Preset selection\r\nGlobal = Default\r\nSomeGame = A\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(
            find(&settings, "DLSSPresets", "Global").comment,
            "Preset selection"
        );
        assert_eq!(
            find(&settings, "DLSSPresets", "SomeGame").comment,
            "Preset selection"
        );
        assert_eq!(
            find(&settings, "DLSSPresets", "Global").editor,
            EditorKind::PresetChoice
        );
    }

    #[test]
    fn test_dll_overrides_fixed_comment() {
        let text = "[DLLPathOverrides]\r\n; whatever was here\r\nnvngx_dlss = C:\\mods\\nvngx_dlss.dll\r\n";
        let settings = parse_settings(text).unwrap();
        let entry = find(&settings, "DLLPathOverrides", "nvngx_dlss");
        assert_eq!(entry.comment, DLL_OVERRIDES_TEXT);
        assert_eq!(entry.display_value, "C:\\mods\\nvngx_dlss.dll");
    }

    #[test]
    fn test_ultra_quality_synthesized_on_section_change() {
        let text = "[DLSSQualityLevels]\r\nQuality = 1\r\n[DLSSPresets]\r\nGlobal = Default\r\n";
        let settings = parse_settings(text).unwrap();
        // Synthesized entry sits at the end of the section's records, before
        // the next section starts.
        assert_eq!(settings[1].section, "DLSSQualityLevels");
        assert_eq!(settings[1].key, "UltraQuality");
        assert_eq!(settings[1].display_value, "0");
        assert_eq!(settings[1].comment, ULTRA_QUALITY_TEXT);
        assert_eq!(settings[2].section, "DLSSPresets");
    }

    #[test]
    fn test_ultra_quality_synthesized_at_end_of_input() {
        let text = "[DLSSQualityLevels]\r\nQuality = 1\r\n";
        let settings = parse_settings(text).unwrap();
        let last = settings.last().unwrap();
        assert_eq!(last.key, "UltraQuality");
        assert_eq!(last.display_value, "0");
    }

    #[test]
    fn test_ultra_quality_not_synthesized_when_explicit() {
        let text = "[DLSSQualityLevels]\r\nUltraQuality = 0.77\r\n[DLSSPresets]\r\nGlobal = A\r\n";
        let settings = parse_settings(text).unwrap();
        let entries: Vec<_> = settings.iter().filter(|s| s.key == "UltraQuality").collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_value, "0.77");
        // The explicit entry still gets the fixed explanatory comment.
        assert_eq!(entries[0].comment, ULTRA_QUALITY_TEXT);
    }

    #[test]
    fn test_unknown_sections_pass_through() {
        let text = "[SomethingElse]\r\nFoo = bar\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].section, "SomethingElse");
        assert_eq!(settings[0].editor, EditorKind::FreeText);
    }

    #[test]
    fn test_repeated_keys_are_not_deduplicated() {
        let text = "[S]\r\nKey = 1\r\nKey = 2\r\n";
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0].display_value, "1");
        assert_eq!(settings[1].display_value, "2");
    }
}
