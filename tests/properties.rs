use proptest::prelude::*;
use textdump_rs_lib::{constants::DUP_MARKER, groupify, render, sort_key, sort_keys, Language};

fn language() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::En), Just(Language::Ja), Just(Language::Ko)]
}

fn markup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("\\cR".to_owned()),
            Just("\\cY".to_owned()),
            Just("\\c0".to_owned()),
            Just("\\cW".to_owned()),
            Just("\\cQ".to_owned()),
            Just("\\c".to_owned()),
            Just("\\O".to_owned()),
            Just("~1".to_owned()),
            Just("&".to_owned()),
            Just("/".to_owned()),
            Just("%".to_owned()),
            Just("* ".to_owned()),
            "[a-z ]{1,6}",
        ],
        0..16,
    )
    .prop_map(|tokens| tokens.concat())
}

#[test]
fn documented_examples() {
    assert_eq!(
        render(Some("\\cRHi\\c0 there"), "k", Language::En).unwrap().as_deref(),
        Some(r#"<span class="R">Hi</span> there"#)
    );
    assert_eq!(groupify("foo_slash_Draw_0_gml_42_0"), "foo");
    assert_eq!(groupify("obj_npc_b_slash_Step_0_gml_5_0"), "obj_npc_b");
    assert!(sort_key("A_gml_5_0", None) < sort_key("A_gml_100_0", None));
}

proptest! {
    #[test]
    fn prop_unknown_escapes_never_fail(
        text in "[^~]{0,64}",
        key in "[a-z_0-9]{0,32}",
        language in language(),
    ) {
        prop_assert!(render(Some(&text), &key, language).is_ok());
    }

    #[test]
    fn prop_spans_are_balanced(text in markup(), key in "[a-z_]{1,16}", language in language()) {
        let rendered = render(Some(&text), &key, language).unwrap().unwrap_or_default();
        prop_assert_eq!(rendered.matches("<span").count(), rendered.matches("</span>").count());
    }

    #[test]
    fn prop_grouping_is_idempotent(key in "[a-zA-Z0-9_]{0,48}") {
        prop_assume!(!key.contains(DUP_MARKER));
        let group = groupify(&key);
        prop_assert_eq!(groupify(&group), group);
    }

    #[test]
    fn prop_sorting_is_deterministic(
        keys in prop::collection::vec("(obj|scr)_[a-c]{1,2}_(Step|Draw|Create|Alarm)_[0-9]{1,3}(_gml_[0-9]{1,4}_0)?", 0..24)
    ) {
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let sorted = sort_keys(keys.iter().copied(), None);

        prop_assert!(sorted.windows(2).all(|pair| sort_key(pair[0], None) <= sort_key(pair[1], None)));
        prop_assert_eq!(sort_keys(sorted.iter().copied(), None), sorted.clone());

        let reversed = sort_keys(keys.iter().rev().copied(), None);
        let order = |keys: &[&str]| keys.iter().map(|key| sort_key(key, None)).collect::<Vec<_>>();
        prop_assert_eq!(order(&reversed), order(&sorted));
    }
}
