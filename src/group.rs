use crate::constants::{
    DUP_MARKER, GROUP_POSTFIXES, SLASH_SEPARATOR, UUID_POSTFIXED,
    VARIANT_SUFFIXES,
};

fn is_number(segment: &str) -> bool {
    segment.bytes().all(|b| b.is_ascii_digit())
}

/// `_b`/`_c` right after a number marks a variant of the same line, e.g. `..._gml_433_0_b`.
fn is_variant(rest: &str, end: &str) -> bool {
    VARIANT_SUFFIXES.contains(&end)
        && rest
            .rsplit('_')
            .next()
            .is_some_and(|number| !number.is_empty() && is_number(number))
}

/// Derives the display group of a translation key, usually the name of the object the text belongs to.
///
/// Instance numbers, line numbers, event names and duplicate markers are stripped, so e.g.
/// `obj_foo_slash_Draw_0_gml_42_0` becomes `obj_foo`, and `scr_bar_slash_scr_bar` becomes `scr_bar`.
/// A `_b`/`_c` variant suffix is only stripped right after a number, names like `obj_npc_b` are kept.
#[must_use]
pub fn groupify(key: &str) -> String {
    let mut ident = key.replace(DUP_MARKER, "");

    if let Some(name) = UUID_POSTFIXED.iter().find(|name| ident.starts_with(*name))
    {
        ident = (*name).to_owned();
    }

    while let Some((rest, end)) = ident.rsplit_once('_') {
        let strip = end.is_empty()
            || is_number(end)
            || GROUP_POSTFIXES.contains(end)
            || is_variant(rest, end);

        if !strip {
            break;
        }

        let len = rest.len();
        ident.truncate(len);
    }

    let mut halves = ident.split(SLASH_SEPARATOR);

    if ident.contains(SLASH_SEPARATOR) {
        // SAFETY: split always yields at least one item
        let first = unsafe { halves.next().unwrap_unchecked() };

        if halves.all(|half| half == first) {
            return first.to_owned();
        }
    }

    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_events_and_numbers() {
        assert_eq!(groupify("foo_slash_Draw_0_gml_42_0"), "foo");
        assert_eq!(
            groupify("obj_npc_room_slash_Other_10_gml_982_0"),
            "obj_npc_room"
        );
    }

    #[test]
    fn collapses_repeated_halves() {
        assert_eq!(
            groupify("scr_armorinfo_slash_scr_armorinfo_gml_433_0_b"),
            "scr_armorinfo"
        );
        assert_eq!(
            groupify("scr_text_slash_scr_text_gml_11097_0"),
            "scr_text"
        );
    }

    #[test]
    fn dup_and_variants() {
        assert_eq!(groupify("obj_a_slash_Step_0_gml_5_0_DUP_DUP"), "obj_a");
        assert_eq!(groupify("obj_a_slash_Step_0_gml_5_0_c"), "obj_a");
    }

    #[test]
    fn object_names_ending_in_variant_letters() {
        assert_eq!(groupify("obj_npc_b_slash_Step_0_gml_5_0"), "obj_npc_b");
        assert_eq!(groupify("scr_b_slash_scr_b_gml_1_0"), "scr_b");
        assert_eq!(groupify("obj_npc_b"), "obj_npc_b");
        assert_eq!(groupify("obj_x_0_b_gml_1"), "obj_x");
    }

    #[test]
    fn uuid_postfixed() {
        assert_eq!(
            groupify("obj_ralseithrown_slash_Collision_2b9f3e0c_gml_12_0"),
            "obj_ralseithrown"
        );
    }

    #[test]
    fn stops_at_meaningful_segment() {
        assert_eq!(groupify("DEVICE_MENU_slash_Create_0_gml_107_0"), "DEVICE_MENU");
        assert_eq!(groupify("plain"), "plain");
        assert_eq!(groupify("_0"), "");
    }
}
