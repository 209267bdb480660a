use std::fs;
use tempfile::tempdir;
use textdump_rs_lib::{types::*, DumperBuilder};

const LANG: &str = r#"{
"1": {
"en": {
"obj_b_slash_Step_0_gml_3_0": "* Second line&of text",
"obj_a_slash_Step_0_gml_7_0": "\\cRFirst\\c0 line/",
"obj_a_slash_Step_0_gml_8_0": " \\C2 ",
"date": "2025"
},
"ja": {
"obj_a_slash_Step_0_gml_7_0": "いち",
"obj_b_slash_Step_0_gml_3_0": "に"
}
},
"2": {
"en": {
"obj_a_slash_Step_0_gml_7_0": "\\cRFirst\\c0 line/",
"scr_rhythmgame_notechart_lyrics_slash_scr_x_gml_1_1": "Go [2:go go]"
}
}
}"#;

const SOURCEMAP: &str = r#"{
"1": {
"obj_b_slash_Step_0_gml_3_0": "gml_Object_obj_b_Step_0.gml:3",
"obj_a_slash_Step_0_gml_7_0": "gml_Object_obj_a_Step_0.gml:7"
},
"2": {}
}"#;

#[test]
fn outputs() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    fs::write(input.path().join("lang.json"), format!("\u{FEFF}{LANG}")).unwrap();
    fs::write(input.path().join("sourcemap.json"), SOURCEMAP).unwrap();
    fs::write(input.path().join("2.json"), r#"{"obj_a_slash_Step_0_gml_7_0": "하나"}"#).unwrap();
    fs::write(input.path().join("3.json"), "not json").unwrap();
    fs::write(input.path().join("5.json"), r#"{"obj_e_slash_Step_0_gml_2_0": "다섯"}"#).unwrap();

    let rendered = DumperBuilder::new()
        .lang_path(input.path().join("lang.json"))
        .sourcemap_path(input.path().join("sourcemap.json"))
        .korean_path(input.path())
        .output_path(output.path())
        .chapters([1, 2, 3, 5])
        .logging(true)
        .build()
        .dump()
        .unwrap();

    let chapter1 = &rendered[&1];
    let groups: Vec<&str> = chapter1.keys().map(String::as_str).collect();
    assert_eq!(groups, ["obj_a", "obj_b"]);
    assert_eq!(chapter1["obj_a"].len(), 1);
    assert_eq!(
        chapter1["obj_a"]["obj_a_slash_Step_0_gml_7_0"].en.as_deref(),
        Some(r#"<span class="R">First</span> line"#)
    );
    assert_eq!(
        chapter1["obj_b"]["obj_b_slash_Step_0_gml_3_0"].en.as_deref(),
        Some(r#"<div class="indented">* Second line</div><div class="indented">  of text</div>"#)
    );

    let chapter2 = &rendered[&2];
    assert_eq!(
        chapter2["obj_a"]["obj_a_slash_Step_0_gml_7_0"].ko.as_deref(),
        Some("하나")
    );

    // Korean tables of chapters missing from `lang.json` add the chapter.
    let chapters: Vec<u8> = rendered.keys().copied().collect();
    assert_eq!(chapters, [1, 2, 5]);
    let entry = &rendered[&5]["obj_e"]["obj_e_slash_Step_0_gml_2_0"];
    assert_eq!(entry.ko.as_deref(), Some("다섯"));
    assert_eq!(entry.en, None);

    let lyrics = chapter2["scr_rhythmgame_notechart_lyrics_slash_scr_x"]
        ["scr_rhythmgame_notechart_lyrics_slash_scr_x_gml_1_1"]
        .en
        .as_deref()
        .unwrap();
    assert!(lyrics.starts_with(r#"<span class="B">"#));
    assert!(lyrics.contains("scaleX(calc(2/5))"));

    let json = fs::read_to_string(output.path().join("rendered.json")).unwrap();
    let written: Rendered = serde_json::from_str(&json).unwrap();
    assert_eq!(written, rendered);

    let js = fs::read_to_string(output.path().join("rendered.json.js")).unwrap();
    assert!(js.starts_with("var rendered = JSON.parse('{\"1\":{\"obj_a\":"));
    assert!(js.ends_with("');"));

    let transcript = fs::read_to_string(output.path().join("DELTARUNE.txt")).unwrap();
    assert!(transcript.starts_with('\u{FEFF}'));
    assert!(transcript.contains("\r\n=====\r\nobj_a\r\n=====\r\n\r\nFirst line\r\n"));
    assert!(transcript.contains("* Second line\r\n  of text\r\n"));
    // Chapter 2 repeats the line, and the transcript doesn't.
    assert_eq!(transcript.matches("First line").count(), 1);
    assert!(!transcript.contains("2025"));

    let korean = fs::read_to_string(output.path().join("DELTARUNE_ko.txt")).unwrap();
    assert!(korean.contains("하나"));
    assert!(korean.contains("CHAPTER 5"));
    assert!(korean.contains("다섯"));
    assert!(!korean.contains("obj_b"));

    let japanese = fs::read_to_string(output.path().join("DELTARUNE_ja.txt")).unwrap();
    assert!(japanese.contains("いち\r\n"));
}

#[test]
fn missing_input() {
    let output = tempdir().unwrap();

    let result = DumperBuilder::new()
        .lang_path(output.path().join("missing.json"))
        .output_path(output.path())
        .build()
        .dump();

    assert!(matches!(result, Err(Error::Io(..))));
}

#[test]
fn out_of_range_parameter_aborts() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    fs::write(input.path().join("lang.json"), r#"{"1": {"en": {"k": "Got ~8"}}}"#).unwrap();
    fs::write(input.path().join("sourcemap.json"), r#"{"1": {}}"#).unwrap();

    let result = DumperBuilder::new()
        .lang_path(input.path().join("lang.json"))
        .sourcemap_path(input.path().join("sourcemap.json"))
        .korean_path(input.path())
        .output_path(output.path())
        .build()
        .dump();

    assert!(matches!(result, Err(Error::ParameterOutOfRange { digit: '8', .. })));
    assert!(!output.path().join("rendered.json").exists());
}
