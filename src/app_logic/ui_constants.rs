/*
 * Static user-facing texts shared between the application logic and the
 * shell: the default description shown when nothing is selected and the
 * contextual help texts for the Load / Save / Add-DLL-Override actions.
 */

pub const APP_TITLE: &str = "DLSSTweaks ConfigTool";

pub const DEFAULT_DESC_TEXT: &str = "Welcome to DLSSTweaks ConfigTool!\n\nUse 'show <section> <key>' to view a description of any setting, or 'set <section> <key> <value>' to edit it.\n\nIf you just want to force DLAA, simply set the ForceDLAA value and then save the file.";

pub const HELP_LOAD_TEXT: &str =
    "Reload the dlsstweaks.ini from the same folder as the ConfigTool.";

pub const HELP_SAVE_TEXT: &str = "Writes out the changed settings to dlsstweaks.ini.";

pub const HELP_ADD_DLL_OVERRIDE_TEXT: &str = "DLL override: allows overriding the path that a game will load a DLL from, simply pick the new DLL you wish to override with.\n\nThis can be useful if you're prevented from editing the game files for some reason.\n\neg. with Rockstar Game Launcher, you can't easily update nvngx_dlss.dll without RGL reverting it, but by using this you can make the game load DLSS from a completely different path which RGL can't override.";
