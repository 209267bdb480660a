use const_format::formatcp;
use phf::phf_set;

pub(crate) mod localization {
    pub const INVALID_COLOR_MSG: &str = "Invalid color";
    pub const TRUNCATED_COLOR_MSG: &str = "Truncated color escape";
    pub const NON_ASCII_ESCAPE_MSG: &str = "Strange escape (non-ascii)";
    pub const UNHANDLED_ESCAPE_MSG: &str = "Unhandled escape";
    pub const UNEXPECTED_AFTER_SLASH_MSG: &str =
        "Unexpected trailing text after '/'";
    pub const UNEXPECTED_AFTER_PERCENT_MSG: &str =
        "Unexpected text after '%'";
    pub const MULTIPLE_GML_MSG: &str =
        "Key contains more than one `gml` segment, source location is not used";

    pub const MISSING_CHAPTER1_KEY_MSG: &str =
        "references a key which is not present in chapter 1 English data";
    pub const SKIPPING_CHAPTER_MSG: &str = "Skipping chapter";
    pub const MISSING_KOREAN_MSG: &str =
        "Korean data not found, skipping Korean for chapter";
    pub const EMPTY_RENDER_MSG: &str =
        "Rendered data is empty. No text to output.";

    pub const EXTRACTED_CHAPTER_MSG: &str = "Extracted chapter";
    pub const RENDERED_CHAPTER_MSG: &str = "Rendered chapter";
    pub const WROTE_FILE_MSG: &str = "Wrote file";
}

/// Color letters accepted by `\c`. `W` is the neutral text color and never gets a span.
pub const PALETTE: &str = "RBYGOASVIW";
pub const NEUTRAL_COLOR: char = 'W';

pub const PICTURE_SPAN: &str = r#"<span class="picture">[IMG]</span>"#;
pub const INDENTED_OPEN: &str = r#"<div class="indented">"#;
pub const INDENTED_CLOSE: &str = "</div>";
pub const INDENTED_BOUNDARY: &str =
    formatcp!("{INDENTED_CLOSE}{INDENTED_OPEN}");

/// Characters trimmed off raw text before deciding whether an entry has any content at all.
/// That includes the `\C2`-`\C4` choice codes, which make up whole strings on their own.
pub const NOISE_CHARS: [char; 6] = [' ', '\\', 'C', '2', '3', '4'];

/// Message modifiers that don't affect static text.
pub const IGNORED_ESCAPES: [char; 11] =
    ['M', 'E', 'T', 'F', 'S', 's', 'a', 'f', 'C', 'U', 'm'];

pub const BLANK_LINE_SENTINELS: [&str; 2] = ["/*", "/＊"];

pub const RHYTHM_GAME_PREFIX: &str = "scr_rhythmgame_notechart_";
pub const STRETCH_WIDTH_PX: u32 = 8;

/// Keys that aren't a translation key, but the date of the language file.
pub const DATE_KEY: &str = "date";

pub const SLASH_SEPARATOR: &str = "_slash_";
pub const DUP_MARKER: &str = "_DUP";
pub const GML_SEGMENT: &str = "gml";

pub const MISSING_FILENAME: &str = "zzzzzz";
pub const MISSING_LINE: u32 = 9_999_999;
pub const NUMBER_WIDTH: usize = 16;
pub const EVENT_WIDTH: usize = 3;
pub const LINE_WIDTH: usize = 10;

/// GameMaker events in the order their text usually shows up in-game.
pub const EVENTS: [&str; 10] = [
    "PreCreate",
    "Create",
    "Draw",
    "Step",
    "KeyPress",
    "Mouse",
    "Other",
    "Alarm",
    "Destroy",
    "CleanUp",
];

/// Trailing key segments that never carry grouping information.
pub(crate) const GROUP_POSTFIXES: phf::Set<&str> = phf_set! {
    "gml", "Draw", "Step", "Create", "Other", "Alarm", "Destroy", "Collision", "slash",
};

/// Objects whose collision events are postfixed with UUIDs.
pub const UUID_POSTFIXED: [&str; 6] = [
    "obj_sneo_kristhrown_slash_Collision",
    "obj_ralseithrown_slash_Collision",
    "obj_werewire_kristhrown_slash_Collision",
    "obj_caradventure_object_slash_Collision",
    "obj_queen_kristhrown_slash_Collision",
    "obj_queen_ralseithrown_slash_Collision",
];

pub const VARIANT_SUFFIXES: [&str; 2] = ["b", "c"];

/// Key where `/` always ends the text, regardless of what follows.
pub const SLASH_STOP_KEY: &str =
    "obj_dw_churchb_rotatingtower_slash_Create_0_gml_90_0";

/// Keys where `/` is a literal character.
pub const SLASH_LITERAL_PREFIXES: [&str; 18] = [
    "obj_controller_city_mice2_slash_Draw_0_gml_28_0",
    "obj_fusionmenu_slash_Draw_0_gml_181_0",
    "obj_overworldc_slash_Draw_0_gml_37_0",
    "obj_overworldc_slash_Draw_0_gml_69_0",
    "scr_armorinfo_slash_scr_armorinfo_gml_433_0_b",
    "scr_armorinfo_slash_scr_armorinfo_gml_553_0",
    "scr_armorinfo_slash_scr_armorinfo_gml_791_0",
    "scr_armorinfo_slash_scr_armorinfo_gml_791_0",
    "scr_spellinfo_slash_scr_spellinfo_gml_109_0",
    "obj_overworldc_slash_Draw_0_gml_68_0",
    "obj_credits_2_slash_Step_0_gml_177_0",
    "obj_npc_room_slash_Other_10_gml_982_0",
    "obj_b1power_slash_Step_0_gml_154_0",
    "scr_armorinfo_slash_scr_armorinfo_gml_539_0",
    "scr_credit_slash_scr_credit_gml_64_0_b",
    "scr_credit_slash_scr_credit_gml_78_0",
    "scr_credit_slash_scr_credit_gml_95_0",
    "scr_text_slash_scr_text_gml_11097_0",
];

/// Keys where `&` is a literal ampersand instead of a line break.
pub const AMPERSAND_LITERAL_PREFIXES: [&str; 11] = [
    "scr_credit",
    "obj_credits",
    "scr_monstersetup",
    "scr_monstersetup_slash_scr_monstersetup_gml_1612_0",
    "scr_monstersetup_slash_scr_monstersetup_gml_1614_0",
    "obj_mike_minigame_tv",
    "obj_fusionmenu",
    "obj_b1rocks1",
    "scr_quiztext",
    "obj_b3bs_lancerget_lancer",
    "obj_shop2_slash_Create",
];

pub(crate) const AMPERSAND_BREAK_KEYS: phf::Set<&str> = phf_set! {
    "scr_monstersetup_slash_scr_monstersetup_gml_27_0",
    "obj_fusionmenu_slash_Draw_0_gml_182_0",
};

pub const AMPERSAND_BREAK_PREFIXES: [&str; 1] = ["obj_credits_ch4"];

/// Keys where `#` is a literal hash instead of a line break.
pub const HASH_LITERAL_PREFIXES: [&str; 3] = [
    "obj_readable_room1",
    "obj_npc_room_animated_slash_Other_10_gml_41_0",
    "obj_npc_room_animated_slash_Other_10_gml_57_0",
];

/// Keys where `#` is a space.
pub const HASH_SPACE_PREFIXES: [&str; 1] =
    ["obj_bloxer_enemy_slash_Step_0_gml_135_1"];

/// Description screens, where `%` is a literal percent sign.
pub const PERCENT_LITERAL_PREFIXES: [&str; 5] = [
    "scr_weaponinfo",
    "scr_armorinfo",
    "scr_iteminfo",
    "scr_itemdesc",
    "scr_monstersetup",
];

pub const PERCENT_TERMINATOR_PREFIXES: [&str; 1] = ["scr_itemdesc_oldtype"];

pub(crate) const PERCENT_LITERAL_KEYS: phf::Set<&str> = phf_set! {
    "scr_text_slash_scr_text_gml_1886_0",
    "scr_text_slash_scr_text_gml_8925_0",
    "scr_text_slash_scr_text_gml_8926_0",
    "obj_battlecontroller_slash_Draw_0_gml_171_0",
    "obj_battlecontroller_slash_Draw_0_gml_280_0",
    "obj_fusionmenu_slash_Step_0_gml_144_0",
    "obj_shop_ch2_spamton_slash_Create_0_gml_89_0",
    "obj_npc_room_slash_Other_10_gml_982_0",
};

/// Remainders after a `%` terminator that end the text silently.
pub const PERCENT_TAILS: [&str; 4] = ["", "%", "%%", "/%"];

/// The one string with a mistyped `Ñ`.
pub const ENYE_KEY: &str = "obj_dw_church_intro_guei_slash_Step_0_gml_169_0";

pub const TEXT_FUNCTIONS: [&str; 7] = [
    "stringsetloc",
    "msgsetloc",
    "msgnextloc",
    "stringsetsubloc",
    "msgsetsubloc",
    "msgnextsubloc",
    "scr_84_get_lang_string",
];

pub const GET_LANG_STRING: &str = "scr_84_get_lang_string";
pub const GET_LANG_STRING_CALL: &str = formatcp!("{GET_LANG_STRING}(");
pub const FUNCTION_DEFINITION_PREFIX: &str = "function ";

pub const CODE_ENTRIES_DIR: &str = "CodeEntries";
pub const LANG_DIR: &str = "lang";
pub const LANG_EN_FILE: &str = "lang_en.json";
pub const LANG_JA_FILE: &str = "lang_ja.json";

pub const LANG_JSON_FILE: &str = "lang.json";
pub const SOURCEMAP_JSON_FILE: &str = "sourcemap.json";
pub const RENDERED_JSON_FILE: &str = "rendered.json";
pub const RENDERED_JS_FILE: &str =
    formatcp!("{RENDERED_JSON_FILE}.js");

pub const JS_PREFIX: &str = "var rendered = JSON.parse('";
pub const JS_SUFFIX: &str = "');";

pub const BOM: char = '\u{FEFF}';

pub const CHAPTERS: [u8; 4] = [1, 2, 3, 4];

/// Chapter whose English text is the baseline that later chapters reference.
pub const BASE_CHAPTER: u8 = 1;

/// Chapter that receives [`SCRAMBLED_FRAGMENTS`].
pub const SCRAMBLED_CHAPTER: u8 = 4;

/// Scrambled bookshelf fragments. Only the Japanese translation uses a translation key for these,
/// and it has one more fragment, so the last English one is intentionally absent.
pub const SCRAMBLED_FRAGMENTS: [(&str, Option<&str>); 13] = [
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_90_0", Some("where ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_91_0", Some("the ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_92_0", Some("tail. ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_93_0", Some("pointed ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_94_0", Some("the ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_95_0", Some("children ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_96_0", Some("would ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_97_0", Some("grow,")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_98_0", Some("the ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_99_0", Some("Lost ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_100_0", Some("forest ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_101_0", Some("followed ")),
    ("obj_dw_churchb_bookshelf_slash_Step_0_gml_102_0", None),
];

/// Placeholder replaced with the chapter number in [`CHAPTER_BANNER`].
pub const CHAPTER_PLACEHOLDER: &str = "%";

/// ASCII-art banner opening every transcript.
pub const HEADER_BANNER: &str = r#"
 ▄██████████████████████████████████████████████████████▄
██▀                                                  ▀██
██   █   █ █  ▄                                ███ █ █ ███  ██
██  ███ ███ █ ███ █♥︎█ █▀█ █ ██ ████ ███     █   █   █   ██
██  ███ █▄▄ █  █  █▀█ █   ████ ██ █ █▄▄  ▄  █  █ █  █   ██
██                                                     ██
██         unofficial deltarune text dump              ██
██                                                     ██
▀██▄  https://hushbugger.github.io/deltarune/text/   ▄██▀
  ▀██▄                                           ▄██▀
    ▀██████████████████████████████████████████████▀


"#;

pub const CHAPTER_BANNER: &str = r#"

▀▀██▄▄▄▄ ● ▄▄▄▄██▀▀
    ▲ CHAPTER % ▲
          ▼

"#;
