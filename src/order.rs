use crate::{
    constants::{localization::MULTIPLE_GML_MSG, *},
    types::ChapterSourceMap,
};
use log::warn;
use smallvec::SmallVec;

/// Sort key that approximates the order in which text appears in the game.
///
/// Compared segment by segment. Numbers are zero-padded so they sort naturally, GameMaker event names are replaced
/// with their position in [`EVENTS`], and keys pointing into `gml` code are further ordered by the file and line the
/// text was found at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(SmallVec<[String; 12]>);

impl SortKey {
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

/// Builds the [`SortKey`] of `key`, using the source locations of its chapter, if any are known.
///
/// Keys without known location sort after every located key with the same prefix.
#[must_use]
pub fn sort_key(key: &str, locations: Option<&ChapterSourceMap>) -> SortKey {
    let mut segments: SmallVec<[String; 12]> = key
        .split('_')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
            {
                format!("{segment:0>NUMBER_WIDTH$}")
            } else if let Some(index) =
                EVENTS.iter().position(|event| *event == segment)
            {
                format!("{index:0>EVENT_WIDTH$}")
            } else {
                segment.to_owned()
            }
        })
        .collect();

    let mut gml_positions = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| *segment == GML_SEGMENT)
        .map(|(i, _)| i);

    match (gml_positions.next(), gml_positions.next()) {
        (Some(gml), None) => {
            let (filename, line) = match locations.and_then(|map| map.get(key)) {
                Some(location) => (location.filename.clone(), location.line),
                None => (MISSING_FILENAME.to_owned(), MISSING_LINE),
            };

            segments.insert(gml + 1, format!("{line:0>LINE_WIDTH$}"));
            // Keys with similar line numbers may point into different files, so the filename comes first.
            segments.insert(gml + 1, filename);
        }
        (Some(_), Some(_)) => warn!("{MULTIPLE_GML_MSG}: {key}"),
        _ => {}
    }

    SortKey(segments)
}

/// Sorts `keys` by their [`SortKey`]. The sort is stable.
pub fn sort_keys<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    locations: Option<&ChapterSourceMap>,
) -> Vec<&'a str> {
    let mut keys: Vec<&'a str> = keys.into_iter().collect();
    keys.sort_by_cached_key(|key| sort_key(key, locations));
    keys
}
