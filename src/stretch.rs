use crate::{
    constants::STRETCH_WIDTH_PX, statics::regexes::STRETCH_SPAN_RE,
    types::Error,
};

fn malformed(key: &str, piece: &str, reason: &'static str) -> Error {
    Error::MalformedStretch {
        key: key.to_owned(),
        piece: piece.to_owned(),
        reason,
    }
}

fn push_plain(output: &mut String, piece: &str, key: &str) -> Result<(), Error> {
    if piece.contains('[') {
        return Err(malformed(key, piece, "missing closing bracket"));
    }

    output.push_str(r#"<span style="display: inline-block;">"#);
    output.push_str(piece);
    output.push_str("</span>");
    Ok(())
}

/// `[<width>:<content>]`, where width is a single digit in 8px units.
fn push_stretched(
    output: &mut String,
    piece: &str,
    key: &str,
) -> Result<(), Error> {
    let inner = &piece[1..piece.len() - 1];
    let mut chars = inner.chars();

    let width = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| malformed(key, piece, "width is not a digit"))?;

    if chars.next() != Some(':') {
        return Err(malformed(key, piece, "expected `:` after width"));
    }

    let content = chars.as_str().replace(' ', "\u{A0}");
    let glyphs = content.chars().count();

    output.push_str(&format!(
        r#"<span style="transform: scaleX(calc({width}/{glyphs})); width: {px}px; overflow-wrap: normal; transform-origin: top left; display: inline-block;">{content}</span>"#,
        px = width * STRETCH_WIDTH_PX,
    ));
    Ok(())
}

/// Lays out rhythm game lyrics, where bracketed runs are squeezed into a fixed width, e.g. `[4:LONG TEXT]`.
///
/// The markup is authored by the game, any deviation from it is a data bug.
///
/// # Errors
///
/// - [`Error::MalformedStretch`] on an unclosed bracket, or a bracket without `<digit>:` prefix.
pub fn stretch(rendered: &str, key: &str) -> Result<String, Error> {
    let text = rendered.replace('-', "");
    let mut output = String::with_capacity(text.len() * 4);
    let mut last = 0;

    for span in STRETCH_SPAN_RE.find_iter(&text) {
        push_plain(&mut output, &text[last..span.start()], key)?;
        push_stretched(&mut output, span.as_str(), key)?;
        last = span.end();
    }

    push_plain(&mut output, &text[last..], key)?;

    if key.ends_with("_1") {
        output = format!(r#"<span class="B">{output}</span>"#);
    }

    Ok(output)
}
