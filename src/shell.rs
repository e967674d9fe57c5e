/*
 * The interactive command-line shell. It exposes the editor operations
 * (load, save, add a DLL override, inspect and edit settings) as typed
 * commands and delegates every decision to `ConfigToolLogic`; this layer
 * is pure event plumbing.
 *
 * A fatal read (missing or empty settings file) terminates the process
 * after notifying the operator. There is no partial-UI fallback.
 */
use crate::app_logic::{ConfigToolLogic, LogicError, ui_constants};
use crate::core::ReadError;
use std::io::{self, BufRead, Write};
use std::process;

pub const MISSING_INI_TEXT: &str = "Failed to load dlsstweaks.ini, or INI file is empty.\n\nPlease extract dlsstweaks.ini from the ZIP you downloaded next to this tool first before running.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show { section: String, key: String },
    Set { section: String, key: String, value: String },
    Override { path: String },
    Load,
    Save,
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one input line into a `Command`. Values and paths may contain
/// spaces; they are taken as the remainder of the line.
pub fn parse_command(line: &str) -> Command {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&name) = tokens.first() else {
        return Command::Empty;
    };
    match name {
        "help" => Command::Help,
        "list" => Command::List,
        "show" if tokens.len() == 3 => Command::Show {
            section: tokens[1].to_string(),
            key: tokens[2].to_string(),
        },
        "set" if tokens.len() >= 4 => Command::Set {
            section: tokens[1].to_string(),
            key: tokens[2].to_string(),
            value: tokens[3..].join(" "),
        },
        "override" if tokens.len() >= 2 => Command::Override {
            path: tokens[1..].join(" "),
        },
        "load" => Command::Load,
        "save" => Command::Save,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  list                          Show all settings, grouped by section")?;
    writeln!(out, "  show <section> <key>          Show the description of a setting")?;
    writeln!(out, "  set <section> <key> <value>   Change a setting's value")?;
    writeln!(out, "  override <dll-path>           Add a DLL path override and save")?;
    writeln!(out, "  load                          {}", ui_constants::HELP_LOAD_TEXT)?;
    writeln!(out, "  save                          {}", ui_constants::HELP_SAVE_TEXT)?;
    writeln!(out, "  quit                          Exit the tool")?;
    writeln!(out)?;
    writeln!(out, "{}", ui_constants::HELP_ADD_DLL_OVERRIDE_TEXT)?;
    Ok(())
}

fn print_settings(out: &mut impl Write, logic: &ConfigToolLogic) -> io::Result<()> {
    for section in logic.sections() {
        writeln!(out, "[{section}]")?;
        for setting in logic.settings().iter().filter(|s| s.section == section) {
            writeln!(out, "  {} = {}", setting.key, setting.display_value)?;
        }
    }
    Ok(())
}

// Reload wrapper for the fatal path: a missing or empty file ends the
// session immediately, there is no partial UI state to fall back to.
fn reload_or_exit(logic: &mut ConfigToolLogic) {
    if let Err(e) = logic.reload() {
        match e {
            LogicError::Read(ReadError::MissingOrEmpty) => {
                eprintln!("{MISSING_INI_TEXT}");
            }
            other => eprintln!("Failed to load settings: {other}"),
        }
        process::exit(1);
    }
}

fn save_and_resync(out: &mut impl Write, logic: &mut ConfigToolLogic) -> io::Result<()> {
    match logic.save() {
        Ok(()) => writeln!(out, "Saved. {}", logic.title()),
        Err(LogicError::Read(ReadError::MissingOrEmpty)) => {
            // The post-save re-read failed; same fatal contract as startup.
            eprintln!("{MISSING_INI_TEXT}");
            process::exit(1);
        }
        Err(e) => writeln!(out, "Save failed: {e}"),
    }
}

/// Runs the interactive session until `quit` or end of input.
pub fn run(logic: &mut ConfigToolLogic) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    reload_or_exit(logic);
    writeln!(out, "{}", logic.title())?;
    writeln!(out)?;
    writeln!(out, "{}", ui_constants::DEFAULT_DESC_TEXT)?;
    writeln!(out)?;
    writeln!(out, "Type 'help' for the list of commands.")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Command::Help => print_help(&mut out)?,
            Command::List => print_settings(&mut out, logic)?,
            Command::Show { section, key } => match logic.description_for(&section, &key) {
                Some(description) => writeln!(out, "{description}")?,
                None => {
                    if logic.find_setting(&section, &key).is_some() {
                        writeln!(out, "No description available for '{key}'.")?;
                    } else {
                        writeln!(out, "No setting named '{key}' in section '{section}'.")?;
                    }
                }
            },
            Command::Set { section, key, value } => match logic.set_value(&section, &key, &value) {
                Ok(()) => writeln!(out, "{}", logic.title())?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Override { path } => match logic.stage_dll_override(&path) {
                Ok((filename, full_path)) => {
                    writeln!(out, "Setting DLL override\n  {filename} -> {full_path}")?;
                    save_and_resync(&mut out, logic)?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Load => {
                reload_or_exit(logic);
                writeln!(out, "Reloaded {} settings. {}", logic.settings().len(), logic.title())?;
            }
            Command::Save => save_and_resync(&mut out, logic)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(text) => {
                writeln!(out, "Unknown command '{text}'. Type 'help' for the list of commands.")?;
            }
        }
    }
    Ok(())
}
