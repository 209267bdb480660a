use std::{env::var, fs, path::Path, path::PathBuf};
use tempfile::tempdir;
use textdump_rs_lib::{types::*, ExtractorBuilder};

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn game(root: &Path) {
    write(
        &root.join("1/lang/lang_en.json"),
        r#"{"obj_shared_slash_Step_0_gml_4_0": "Shared text", "obj_a_slash_Step_0_gml_2_0": "* Hello"}"#,
    );
    write(
        &root.join("1/lang/lang_ja.json"),
        "\u{FEFF}{\"obj_a_slash_Step_0_gml_2_0\": \"* こんにちは\"}",
    );
    write(
        &root.join("1/CodeEntries/gml_Object_obj_a_Step_0.gml"),
        "x = 1\nmsg = scr_84_get_lang_string(\"obj_a_slash_Step_0_gml_2_0\")\n",
    );
    write(
        &root.join("1/CodeEntries/gml_Object_obj_b_Step_0.gml"),
        "scr_84_get_lang_string(\"obj_a_slash_Step_0_gml_2_0\")\nscr_84_get_lang_string(\"obj_shared_slash_Step_0_gml_4_0\")\n",
    );

    write(&root.join("2/lang/lang_ja.json"), r#"{"obj_c_slash_Step_0_gml_1_0": "やあ"}"#);
    write(
        &root.join("2/CodeEntries/gml_Object_obj_c_Step_0.gml"),
        concat!(
            "function helper(a) { return stringsetloc(a, \"x\"); }\n",
            "msgsetloc(0, \"Hey!/\", \"obj_c_slash_Step_0_gml_1_0\")\n",
            "msgsetloc(0, \"\\\\C2\")\n",
            "t = scr_84_get_lang_string(\"obj_shared_slash_Step_0_gml_4_0\")\n",
            "msgnextloc(\"Other text\", \"obj_c_slash_Step_0_gml_1_0\")\n",
        ),
    );

    // Chapter 3 has no translation files and is skipped.
    write(&root.join("3/CodeEntries/gml_Object_obj_d_Step_0.gml"), "");

    write(&root.join("4/lang/lang_ja.json"), "{}");
    fs::create_dir_all(root.join("4/CodeEntries")).unwrap();
}

#[test]
fn chapters() {
    let source = tempdir().unwrap();
    let output = tempdir().unwrap();
    game(source.path());

    let extracted = ExtractorBuilder::new()
        .output_path(output.path())
        .logging(true)
        .build()
        .extract(source.path())
        .unwrap();

    let chapter1 = &extracted.lang[&1];
    assert_eq!(chapter1[&Language::En].len(), 2);
    assert_eq!(
        extracted.sourcemap[&1]["obj_a_slash_Step_0_gml_2_0"].to_string(),
        "gml_Object_obj_a_Step_0.gml:2"
    );
    assert_eq!(
        extracted.sourcemap[&1]["obj_shared_slash_Step_0_gml_4_0"].to_string(),
        "gml_Object_obj_b_Step_0.gml:2"
    );

    let en2 = &extracted.lang[&2][&Language::En];
    assert_eq!(en2["obj_c_slash_Step_0_gml_1_0"].as_deref(), Some("Hey!/"));
    assert_eq!(en2["obj_c_slash_Step_0_gml_1_0_DUP"].as_deref(), Some("Other text"));
    assert_eq!(en2["obj_shared_slash_Step_0_gml_4_0"].as_deref(), Some("Shared text"));
    assert_eq!(extracted.sourcemap[&2]["obj_c_slash_Step_0_gml_1_0_DUP"].line, 5);

    assert!(extracted.lang[&3].is_empty());
    assert!(extracted.sourcemap[&3].is_empty());

    let en4 = &extracted.lang[&4][&Language::En];
    assert_eq!(en4["obj_dw_churchb_bookshelf_slash_Step_0_gml_102_0"], None);
    assert_eq!(
        en4["obj_dw_churchb_bookshelf_slash_Step_0_gml_99_0"].as_deref(),
        Some("Lost ")
    );

    let lang_json = fs::read_to_string(output.path().join("lang.json")).unwrap();
    assert!(lang_json.starts_with("{\n\"1\": {\n\"en\": {\n\"obj_a_slash_Step_0_gml_2_0\": \"* Hello\",\n"));
    assert!(lang_json.contains("\"3\": {}"));

    let written: LangData = serde_json::from_str(&lang_json).unwrap();
    assert_eq!(written, extracted.lang);

    let sourcemap_json = fs::read_to_string(output.path().join("sourcemap.json")).unwrap();
    let written: SourceMap = serde_json::from_str(&sourcemap_json).unwrap();
    assert_eq!(written, extracted.sourcemap);
}

#[test]
fn unexpected_call_aborts() {
    let source = tempdir().unwrap();
    let output = tempdir().unwrap();

    write(&source.path().join("2/lang/lang_ja.json"), "{}");
    write(
        &source.path().join("2/CodeEntries/gml_Object_obj_e_Create_0.gml"),
        "msgnextloc(\"only text\")\n",
    );

    let result = ExtractorBuilder::new()
        .chapters([2])
        .output_path(output.path())
        .build()
        .extract(source.path());

    assert!(matches!(result, Err(Error::UnexpectedCall { .. })));
    assert!(!output.path().join("lang.json").exists());
}

#[test]
#[ignore = "needs the decompiled game, set DELTARUNE_PATH"]
fn game_data() {
    let source_path = PathBuf::from(var("DELTARUNE_PATH").unwrap());
    let output = tempdir().unwrap();

    let extracted = ExtractorBuilder::new()
        .output_path(output.path())
        .build()
        .extract(&source_path)
        .unwrap();

    assert_eq!(extracted.lang.len(), 4);
}
