//! Interpreter for the inline escape codes of the game's text boxes.
//!
//! Text is scanned character by character. Every case reports how many characters it consumed, or that the rest of
//! the text must be dropped. Malformed codes are logged and rendered as close as possible to what they were meant to
//! be. Only codes that can't be explained by the known grammar are errors.

use crate::{
    constants::{localization::*, *},
    statics::regexes::CONTINUATION_LINE_RE,
    types::{Error, Language},
};
use log::warn;

enum Step {
    Advance(usize),
    Stop,
}

#[inline]
pub(crate) fn starts_with_any(key: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| key.starts_with(prefix))
}

/// ASCII or full-width decimal digit.
#[inline]
fn is_digit(char: char) -> bool {
    char.is_ascii_digit() || ('０'..='９').contains(&char)
}

struct Scanner<'a> {
    chars: Vec<char>,
    text: &'a str,
    key: &'a str,
    language: Language,
    color: char,
    output: String,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, key: &'a str, language: Language) -> Self {
        Self {
            chars: text.chars().collect(),
            text,
            key,
            language,
            color: NEUTRAL_COLOR,
            output: String::with_capacity(text.len() * 2),
        }
    }

    fn rest(&self, i: usize) -> String {
        self.chars[i + 1..].iter().collect()
    }

    fn emit(&mut self, str: &str) -> Step {
        self.output.push_str(str);
        Step::Advance(1)
    }

    fn emit_char(&mut self, char: char) -> Step {
        self.output.push(char);
        Step::Advance(1)
    }

    fn ampersand_is_literal(&self) -> bool {
        starts_with_any(self.key, &AMPERSAND_LITERAL_PREFIXES)
            && !AMPERSAND_BREAK_KEYS.contains(self.key)
            && !starts_with_any(self.key, &AMPERSAND_BREAK_PREFIXES)
    }

    fn percent_is_literal(&self) -> bool {
        (starts_with_any(self.key, &PERCENT_LITERAL_PREFIXES)
            && !starts_with_any(self.key, &PERCENT_TERMINATOR_PREFIXES))
            || PERCENT_LITERAL_KEYS.contains(self.key)
    }

    fn step(&mut self, i: usize) -> Result<Step, Error> {
        let next = self.chars.get(i + 1).copied();

        let step = match (self.chars[i], next) {
            ('\\', Some(escape)) => self.escape(i, escape),
            ('\\', None) => Step::Stop,
            ('/', _) => self.slash(i),
            ('&', _) if self.ampersand_is_literal() => self.emit("&amp;"),
            ('#', _) if starts_with_any(self.key, &HASH_LITERAL_PREFIXES) => {
                self.emit_char('#')
            }
            ('#', _) if starts_with_any(self.key, &HASH_SPACE_PREFIXES) => {
                self.emit_char(' ')
            }
            ('&' | '#', _) => self.emit_char('\n'),
            ('\t', _) => self.emit_char(' '),
            ('^', Some(digit)) if is_digit(digit) => Step::Advance(2),
            ('^', _) => Step::Advance(1),
            ('%', _) if self.percent_is_literal() => self.emit_char('%'),
            ('%', _) => self.percent(i),
            ('>', _) => self.emit("&gt;"),
            ('<', _) => self.emit("&lt;"),
            ('`', Some('&')) => {
                self.output.push_str("&amp;");
                Step::Advance(2)
            }
            ('`', Some(char)) => {
                self.output.push(char);
                Step::Advance(2)
            }
            ('`', None) => Step::Advance(1),
            ('~', Some(digit)) if is_digit(digit) => {
                if !matches!(digit, '1'..='5') {
                    return Err(Error::ParameterOutOfRange {
                        key: self.key.to_owned(),
                        digit,
                    });
                }

                self.output
                    .push_str(&format!(r#"<span class="param">~{digit}</span>"#));
                Step::Advance(2)
            }
            ('N', _) if self.key == ENYE_KEY => self.emit_char('Ñ'),
            (char, _) => self.emit_char(char),
        };

        Ok(step)
    }

    fn escape(&mut self, i: usize, escape: char) -> Step {
        match escape {
            'c' => self.color(i),
            'O' | 'I' => {
                self.output.push_str(PICTURE_SPAN);

                let mut j = i + 2;

                while matches!(self.chars.get(j), Some(' ' | '\u{3000}')) {
                    j += 1;
                }

                Step::Advance(j - i)
            }
            escape if IGNORED_ESCAPES.contains(&escape) => Step::Advance(2),
            '\\' | ' ' => {
                self.output.push(escape);
                Step::Advance(2)
            }
            escape => {
                let msg = if escape.is_ascii() {
                    UNHANDLED_ESCAPE_MSG
                } else {
                    NON_ASCII_ESCAPE_MSG
                };

                warn!(
                    "{msg} '\\{escape}' in {}:{} -> {}",
                    self.language, self.key, self.text
                );

                self.output.push(escape);
                Step::Advance(2)
            }
        }
    }

    fn color(&mut self, i: usize) -> Step {
        let Some(&letter) = self.chars.get(i + 2) else {
            warn!(
                "{TRUNCATED_COLOR_MSG} in {}:{} -> {}",
                self.language, self.key, self.text
            );
            return Step::Advance(2);
        };

        let mut color = if letter == '0' { NEUTRAL_COLOR } else { letter };

        if !PALETTE.contains(color) {
            warn!(
                "{INVALID_COLOR_MSG} '{color}' in {}:{} -> {}",
                self.language, self.key, self.text
            );
            color = NEUTRAL_COLOR;
        }

        if color != self.color {
            if self.color != NEUTRAL_COLOR {
                self.output.push_str("</span>");
            }

            if color != NEUTRAL_COLOR {
                self.output
                    .push_str(&format!(r#"<span class="{color}">"#));
            }

            self.color = color;
        }

        Step::Advance(3)
    }

    fn slash(&mut self, i: usize) -> Step {
        if self.key == SLASH_STOP_KEY {
            return Step::Stop;
        }

        if starts_with_any(self.key, &SLASH_LITERAL_PREFIXES) {
            return self.emit_char('/');
        }

        let rest = self.rest(i);

        if !rest.chars().all(|c| {
            matches!(c, '%' | '/' | '~' | '1') || c.is_whitespace()
        }) {
            warn!(
                "{UNEXPECTED_AFTER_SLASH_MSG} in {}:{} -> {:?}",
                self.language, self.key, self.text
            );
        }

        Step::Stop
    }

    fn percent(&mut self, i: usize) -> Step {
        let rest = self.rest(i);

        if PERCENT_TAILS.contains(&rest.as_str()) {
            return Step::Stop;
        }

        warn!(
            "{UNEXPECTED_AFTER_PERCENT_MSG} in {}:{} -> {:?}",
            self.language, self.key, self.text
        );
        self.emit_char('%')
    }

    fn run(mut self) -> Result<String, Error> {
        let mut i = 0;

        while i < self.chars.len() {
            match self.step(i)? {
                Step::Advance(consumed) => i += consumed,
                Step::Stop => break,
            }
        }

        if self.color != NEUTRAL_COLOR {
            self.output.push_str("</span>");
        }

        Ok(self.output)
    }
}

/// English dialogue boxes start with `* `. Continuation lines get indented under the asterisk, and each line is
/// wrapped into its own block, so the indentation survives in HTML.
fn indent_dialogue(rendered: String, text: &str) -> String {
    if !rendered.starts_with("* ") {
        return rendered;
    }

    // `\C` choice boxes are laid out by the game itself.
    let rendered = if rendered.contains('\n') && !text.contains(r"\C") {
        CONTINUATION_LINE_RE
            .replace_all(&rendered, "\n  ${1}")
            .into_owned()
    } else {
        rendered
    };

    format!(
        "{INDENTED_OPEN}{}{INDENTED_CLOSE}",
        rendered.replace('\n', INDENTED_BOUNDARY)
    )
}

/// Renders the raw text of `key` into an HTML fragment.
///
/// Returns `Ok(None)` for absent or empty text, and an empty string for lines that are blank on purpose.
///
/// # Errors
///
/// - [`Error::ParameterOutOfRange`] if text contains a `~` parameter placeholder other than `~1`-`~5`.
pub fn render(
    text: Option<&str>,
    key: &str,
    language: Language,
) -> Result<Option<String>, Error> {
    let Some(text) = text.filter(|text| !text.is_empty()) else {
        return Ok(None);
    };

    if BLANK_LINE_SENTINELS.contains(&text) && key.contains("shop") {
        return Ok(Some(String::new()));
    }

    let rendered = Scanner::new(text, key, language).run()?;

    Ok(Some(if language.is_en() {
        indent_dialogue(rendered, text)
    } else {
        rendered
    }))
}
