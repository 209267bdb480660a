use crate::{
    constants::{localization::EMPTY_RENDER_MSG, *},
    functions::to_json_string,
    group::groupify,
    order::sort_keys,
    render::render,
    statics::regexes::HTML_TAG_RE,
    stretch::stretch,
    types::{
        ChapterSourceMap, ChapterText, Error, LangData, Language, Rendered,
        RenderedChapter, RenderedEntry, SourceMap,
    },
};
use indexmap::IndexSet;
use log::warn;
use std::collections::HashMap;

/// Whether raw text has anything besides spaces and `\C` choice codes.
#[inline]
fn has_raw_content(text: Option<&str>) -> bool {
    text.is_some_and(|text| !text.trim_matches(NOISE_CHARS).is_empty())
}

#[inline]
fn raw_text<'a>(
    text: &'a ChapterText,
    language: Language,
    key: &str,
) -> Option<&'a str> {
    text.get(&language)
        .and_then(|table| table.get(key))
        .and_then(Option::as_deref)
}

/// Renders a single key in every language.
///
/// Returns `None` if the entry has no content in any language and must be dropped.
///
/// # Errors
///
/// Propagates contract violations from [`render`] and [`stretch`].
pub fn render_entry(
    text: &ChapterText,
    key: &str,
) -> Result<Option<RenderedEntry>, Error> {
    let raw = Language::ALL.map(|language| raw_text(text, language, key));

    if !raw.into_iter().any(has_raw_content) {
        return Ok(None);
    }

    let mut entry = RenderedEntry::default();

    for (language, raw) in Language::ALL.into_iter().zip(raw) {
        let mut rendered = render(raw, key, language)?;

        // TODO: Japanese lyrics need their own bracket syntax and glyph widths before they can be stretched
        if language.is_en() && key.starts_with(RHYTHM_GAME_PREFIX) {
            if let Some(html) = rendered.as_deref().filter(|html| !html.is_empty())
            {
                rendered = Some(stretch(html, key)?);
            }
        }

        entry.set(language, rendered);
    }

    Ok(entry.has_content().then_some(entry))
}

/// Renders every key of a chapter, grouped by [`groupify`] and ordered by [`crate::order::sort_key`].
///
/// # Errors
///
/// Propagates contract violations from [`render_entry`].
pub fn assemble_chapter(
    text: &ChapterText,
    locations: Option<&ChapterSourceMap>,
) -> Result<RenderedChapter, Error> {
    let keys: IndexSet<&str> = Language::ALL
        .iter()
        .filter_map(|language| text.get(language))
        .flat_map(|table| table.keys().map(String::as_str))
        .collect();

    let mut chapter = RenderedChapter::default();

    for key in sort_keys(keys, locations) {
        if key == DATE_KEY {
            continue;
        }

        if let Some(entry) = render_entry(text, key)? {
            chapter
                .entry(groupify(key))
                .or_default()
                .insert(key.to_owned(), entry);
        }
    }

    Ok(chapter)
}

/// Renders all chapters of `data`. Chapters keep their order, even those with nothing to render.
///
/// # Errors
///
/// Propagates contract violations from [`render_entry`]. Nothing is returned on failure.
pub fn assemble(data: &LangData, sources: &SourceMap) -> Result<Rendered, Error> {
    let mut rendered = Rendered::with_capacity(data.len());

    for (&chapter, text) in data {
        rendered.insert(chapter, assemble_chapter(text, sources.get(&chapter))?);
    }

    Ok(rendered)
}

/// Serializes rendered data as JSON with one item per line and no indentation.
///
/// # Errors
///
/// [`Error::JsonParse`] if serialization fails.
pub fn to_json(rendered: &Rendered) -> Result<String, Error> {
    to_json_string(rendered)
}

/// Serializes rendered data as a script defining `rendered`.
///
/// JSON parsed from a string literal loads faster than an equivalent object literal.
///
/// # Errors
///
/// [`Error::JsonParse`] if serialization fails.
pub fn to_js(rendered: &Rendered) -> Result<String, Error> {
    let json = serde_json::to_string(rendered)?;
    let escaped = json.replace('\\', r"\\").replace('\'', r"\'");

    Ok(format!("{JS_PREFIX}{escaped}{JS_SUFFIX}"))
}

/// Resolves entities one by one, leaving anything that isn't a known entity as is.
fn unescape_lenient(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        output.push_str(&rest[..start]);
        rest = &rest[start..];

        let entity = rest.find(';').map(|end| &rest[..=end]);

        match entity.map(quick_xml::escape::unescape) {
            Some(Ok(resolved)) => {
                output.push_str(&resolved);
                rest = &rest[entity.map_or(1, str::len)..];
            }
            _ => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Converts rendered HTML back to plain text.
#[must_use]
pub fn plainify(html: &str) -> String {
    let text = html.replace(INDENTED_BOUNDARY, "\n");
    let text = HTML_TAG_RE.replace_all(&text, "");

    match quick_xml::escape::unescape(&text) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => unescape_lenient(&text),
    }
}

fn push_title(output: &mut String, title: &str) {
    let underline = "=".repeat(title.chars().count());

    output.push('\n');
    output.push_str(&underline);
    output.push('\n');
    output.push_str(title);
    output.push('\n');
    output.push_str(&underline);
    output.push_str("\n\n");
}

/// Flattens rendered data of `language` into a plain text transcript.
///
/// Group titles are only written if the group has some text left in `language`. Text that was already written for
/// the same key earlier in the transcript is skipped, which removes most of the text chapters share.
#[must_use]
pub fn render_plain(rendered: &Rendered, language: Language) -> String {
    if rendered.is_empty() {
        warn!("{EMPTY_RENDER_MSG}");
        return String::new();
    }

    let mut output = String::from(HEADER_BANNER);
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for (chapter, groups) in rendered {
        output.push_str(
            &CHAPTER_BANNER.replace(CHAPTER_PLACEHOLDER, &chapter.to_string()),
        );

        for (title, group) in groups {
            let mut pending_title = Some(title.replace(SLASH_SEPARATOR, "/"));

            for (key, entry) in group {
                let Some(content) =
                    entry.get(language).filter(|content| !content.is_empty())
                else {
                    continue;
                };

                if seen.insert(key.as_str(), content) == Some(content) {
                    continue;
                }

                if let Some(title) = pending_title.take() {
                    push_title(&mut output, &title);
                }

                output.push_str(&plainify(content));
                output.push_str("\n\n");
            }
        }
    }

    let mut output = output.trim_matches('\n').to_owned();
    output.push('\n');
    output
}

/// Converts a plain text transcript to its file form: Byte Order Mark, and CRLF line endings.
#[must_use]
pub fn to_transcript(plain: &str) -> String {
    format!("{BOM}{}", plain.replace('\n', "\r\n"))
}
