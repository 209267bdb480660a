use crate::{
    constants::{
        localization::{
            EXTRACTED_CHAPTER_MSG, MISSING_CHAPTER1_KEY_MSG, SKIPPING_CHAPTER_MSG,
            WROTE_FILE_MSG,
        },
        *,
    },
    functions::{collect_files, read_json, to_json_string, write_file},
    statics::regexes::{TEXT_CALL_LINE_RE, TEXT_FUNCTION_RE},
    types::{
        ChapterId, ChapterSourceMap, ChapterText, Error, LangData, LangTable,
        Language, SourceLocation, SourceMap,
    },
};
use log::{info, warn};
use std::{
    fs::read,
    iter::Peekable,
    path::{Path, PathBuf},
    str::Chars,
};

/// Arguments of a function call. Anything that isn't a string literal is `None`.
pub type Args = Vec<Option<String>>;

fn parse_string(chars: &mut Peekable<Chars>, text: &str) -> Result<String, Error> {
    let unterminated = || Error::UnterminatedString(text.to_owned());
    let mut arg = String::new();

    loop {
        match chars.next().ok_or_else(unterminated)? {
            '"' => return Ok(arg),
            '\\' => {
                let unescaped = match chars.next().ok_or_else(unterminated)? {
                    '\\' => '\\',
                    '"' => '"',
                    'n' => '\n',
                    't' => '\t',
                    'f' => '\u{C}',
                    escape => {
                        return Err(Error::InvalidArgumentEscape {
                            escape,
                            text: text.to_owned(),
                        })
                    }
                };

                arg.push(unescaped);
            }
            ch => arg.push(ch),
        }
    }
}

/// Skips an expression argument up to the next top-level `,` or the closing `)`.
fn skip_expression(chars: &mut Peekable<Chars>) {
    let mut depth: usize = 0;

    while let Some(&ch) = chars.peek() {
        match ch {
            '(' => depth += 1,
            ')' | ',' if depth == 0 => return,
            ')' => depth -= 1,
            _ => {}
        }

        chars.next();
    }
}

/// Parses the arguments of a call from `text`, which starts right after the opening parenthesis.
///
/// String literals support `\\`, `\"`, `\n`, `\t` and `\f` escapes.
///
/// # Errors
///
/// - [`Error::InvalidArgumentEscape`] on any other escape.
/// - [`Error::UnterminatedString`] if a string literal isn't closed.
pub fn parse_args(text: &str) -> Result<Args, Error> {
    let mut args: Args = Vec::new();
    let mut chars: Peekable<Chars> = text.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ',' | ' ' => {
                chars.next();
            }
            '"' => {
                chars.next();
                args.push(Some(parse_string(&mut chars, text)?));
            }
            ')' => break,
            _ => {
                args.push(None);
                skip_expression(&mut chars);
            }
        }
    }

    Ok(args)
}

/// What a text function call means for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEntry<'a> {
    /// Known call without extractable text.
    Ignored,
    /// Reference to a key defined by chapter 1 English data.
    KeyReference(&'a str),
    /// English text with its translation key.
    Text { text: &'a str, key: &'a str },
}

/// Call of one of the game's text functions, found in decompiled code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub function: String,
    pub args: Args,
}

impl Call {
    /// Classifies the call by its function and argument shape. Returns `None` for unexpected calls.
    #[must_use]
    pub fn text_entry(&self) -> Option<TextEntry<'_>> {
        Some(match (self.function.as_str(), self.args.as_slice()) {
            (GET_LANG_STRING, [None]) => TextEntry::Ignored,
            (GET_LANG_STRING, [Some(key)]) => TextEntry::KeyReference(key),
            ("msgsetloc", [None, Some(code)]) if code == r"\C2" => TextEntry::Ignored,
            ("msgsetsubloc", [None, Some(code), None])
                if code == r"\TX \F0 \E~1 \Fb \T0 %" =>
            {
                TextEntry::Ignored
            }
            ("stringsetloc" | "msgnextloc", [Some(text), Some(key)])
            | ("msgsetsubloc", [_, Some(text), .., Some(key)])
            | ("msgnextsubloc" | "stringsetsubloc", [Some(text), .., Some(key)])
            | ("msgsetloc", [_, Some(text), Some(key)]) => TextEntry::Text { text, key },
            _ => return None,
        })
    }

    fn unexpected(&self, line: &str) -> Error {
        Error::UnexpectedCall {
            function: self.function.clone(),
            args: self.args.clone(),
            line: line.trim_end().to_owned(),
        }
    }
}

/// Finds and parses every text function call in a single line of code.
///
/// Function definitions are skipped.
///
/// # Errors
///
/// Propagates argument errors from [`parse_args`].
pub fn parse_line(line: &str) -> Result<Vec<Call>, Error> {
    if line.starts_with(FUNCTION_DEFINITION_PREFIX) {
        return Ok(Vec::new());
    }

    TEXT_FUNCTION_RE
        .captures_iter(line)
        .map(|captures| {
            // SAFETY: whole match and group 1 always exist
            let (call, function) = unsafe {
                (
                    captures.get(0).unwrap_unchecked(),
                    captures.get(1).unwrap_unchecked(),
                )
            };

            Ok(Call {
                function: function.as_str().to_owned(),
                args: parse_args(&line[call.end()..])?,
            })
        })
        .collect()
}

/// A line of decompiled code, numbered from 1.
#[derive(Debug, Clone, Copy)]
pub struct SourceLine<'a> {
    pub filename: &'a str,
    pub number: u32,
    pub text: &'a str,
}

impl SourceLine<'_> {
    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.filename, self.number)
    }
}

/// English text and source locations scraped from one chapter's code.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractedChapter {
    pub en: LangTable,
    pub locations: ChapterSourceMap,
}

/// Records where chapter 1 code first references each key.
///
/// Chapter 1 English comes from its own translation file, so only locations are collected.
///
/// # Errors
///
/// - [`Error::UnexpectedCall`] if a line calls anything but `scr_84_get_lang_string` with a single string.
/// - Argument errors from [`parse_line`].
pub fn base_locations<'a>(
    lines: impl IntoIterator<Item = SourceLine<'a>>,
) -> Result<ChapterSourceMap, Error> {
    let mut locations = ChapterSourceMap::default();

    for line in lines {
        if !line.text.contains(GET_LANG_STRING_CALL) {
            continue;
        }

        for call in parse_line(line.text)? {
            match call.text_entry() {
                Some(TextEntry::KeyReference(key)) => {
                    // First location wins, so keys are ordered and located by the same occurrence.
                    locations
                        .entry(key.to_owned())
                        .or_insert_with(|| line.location());
                }
                _ => return Err(call.unexpected(line.text)),
            }
        }
    }

    Ok(locations)
}

/// Scrapes English text of a later chapter from its code.
///
/// References to chapter 1 keys copy the text from `base`. A key that's already taken by a different text gets
/// `_DUP` appended until it's free.
///
/// # Errors
///
/// - [`Error::KeyContainsSpace`] if a key contains a space.
/// - [`Error::UnexpectedCall`] if a call has an unknown shape.
/// - Argument errors from [`parse_line`].
pub fn extract_chapter<'a>(
    chapter: ChapterId,
    lines: impl IntoIterator<Item = SourceLine<'a>>,
    base: Option<&LangTable>,
) -> Result<ExtractedChapter, Error> {
    let mut extracted = ExtractedChapter::default();

    for line in lines {
        if !TEXT_CALL_LINE_RE.is_match(line.text) {
            continue;
        }

        for call in parse_line(line.text)? {
            let entry = call.text_entry().ok_or_else(|| call.unexpected(line.text))?;

            match entry {
                TextEntry::Ignored => {}
                TextEntry::KeyReference(key) => {
                    match base.and_then(|base| base.get(key)) {
                        Some(text) => {
                            extracted.en.insert(key.to_owned(), text.clone());
                            extracted
                                .locations
                                .entry(key.to_owned())
                                .or_insert_with(|| line.location());
                        }
                        None => warn!("{chapter}: {key} {MISSING_CHAPTER1_KEY_MSG}"),
                    }
                }
                TextEntry::Text { text, key } => {
                    if key.contains(' ') {
                        return Err(Error::KeyContainsSpace(key.to_owned()));
                    }

                    let mut key: String = key.to_owned();

                    while extracted
                        .en
                        .get(&key)
                        .is_some_and(|existing| existing.as_deref() != Some(text))
                    {
                        key.push_str(DUP_MARKER);
                    }

                    extracted
                        .locations
                        .entry(key.clone())
                        .or_insert_with(|| line.location());
                    extracted.en.insert(key, Some(text.to_owned()));
                }
            }
        }
    }

    Ok(extracted)
}

/// Sets English text of the scrambled bookshelf fragments, which the game never passes through a text function.
pub fn apply_overrides(en: &mut LangTable) {
    for (key, text) in SCRAMBLED_FRAGMENTS {
        en.insert(key.to_owned(), text.map(str::to_owned));
    }
}

/// Text and source locations of every extracted chapter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extracted {
    pub lang: LangData,
    pub sourcemap: SourceMap,
}

/// A struct that scrapes English text, and collects Japanese text, from decompiled game data.
///
/// Expects the following layout, as exported by UndertaleModTool:
///
/// ```text
/// <source>/<chapter>/CodeEntries/*.gml
/// <source>/<chapter>/lang/lang_en.json (chapter 1 only)
/// <source>/<chapter>/lang/lang_ja.json
/// ```
///
/// # Fields
/// - `chapters`: Chapters to extract. Use [`Extractor::set_chapters`] to set them.
/// - `output_path`: Directory where `lang.json` and `sourcemap.json` are written. Use [`Extractor::set_output_path`] to set it.
/// - `logging`: If enabled, logs progress. Use [`Extractor::set_logging`] to set it. As this crate uses `log` for logging, you should [set up logging in your program](https://docs.rs/log/latest/log/#available-logging-implementations).
///
/// # Example
/// ```no_run
/// use textdump_rs_lib::Extractor;
///
/// let mut extractor = Extractor::new();
/// extractor.set_logging(true);
/// extractor.extract("path/to/deltarune").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    chapters: Vec<ChapterId>,
    output_path: PathBuf,
    logging: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            chapters: CHAPTERS.to_vec(),
            output_path: PathBuf::from("."),
            logging: false,
        }
    }
}

impl Extractor {
    /// Creates a new [`Extractor`] instance with default values.
    ///
    /// By default, chapters 1 to 4 are extracted into the current directory, and logging is disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chapters to extract. Chapter 1 must be included for later chapters to resolve its keys.
    pub fn set_chapters(&mut self, chapters: impl Into<Vec<ChapterId>>) {
        self.chapters = chapters.into();
    }

    /// Sets the directory where output files are written.
    pub fn set_output_path<P: AsRef<Path>>(&mut self, path: P) {
        self.output_path = path.as_ref().to_path_buf();
    }

    /// Sets whether to output logs.
    ///
    /// # Example
    /// ```compile_fail
    /// extractor.set_logging(true);
    /// ```
    pub fn set_logging(&mut self, enabled: bool) {
        self.logging = enabled;
    }

    fn read_code(&self, code_path: &Path) -> Result<Vec<(String, String)>, Error> {
        collect_files(code_path)?
            .into_iter()
            .map(|path| {
                let content: Vec<u8> =
                    read(&path).map_err(|err| Error::Io(path.clone(), err))?;
                let filename: String = path
                    .strip_prefix(code_path)
                    .unwrap_or(path.as_path())
                    .to_string_lossy()
                    .into_owned();

                Ok((filename, String::from_utf8_lossy(&content).into_owned()))
            })
            .collect()
    }

    fn extract_one(
        &self,
        chapter: ChapterId,
        chapter_path: &Path,
        base: Option<&LangTable>,
        text: &mut ChapterText,
    ) -> Result<Option<ChapterSourceMap>, Error> {
        let lang_path: PathBuf = chapter_path.join(LANG_DIR);

        let ja: LangTable = match read_json(&lang_path.join(LANG_JA_FILE)) {
            Ok(ja) => ja,
            Err(Error::Io(path, err)) => {
                warn!("{SKIPPING_CHAPTER_MSG} {chapter}: {path:?}: {err}");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        text.insert(Language::Ja, ja);

        let code: Vec<(String, String)> =
            self.read_code(&chapter_path.join(CODE_ENTRIES_DIR))?;
        let lines = code.iter().flat_map(|(filename, content)| {
            content.lines().zip(1..).map(move |(text, number)| SourceLine {
                filename,
                number,
                text,
            })
        });

        if chapter == BASE_CHAPTER {
            let en: LangTable = match read_json(&lang_path.join(LANG_EN_FILE)) {
                Ok(en) => en,
                Err(Error::Io(path, err)) => {
                    warn!("{SKIPPING_CHAPTER_MSG} {chapter}: {path:?}: {err}");
                    return Ok(None);
                }
                Err(err) => return Err(err),
            };

            text.insert(Language::En, en);
            return base_locations(lines).map(Some);
        }

        let mut extracted: ExtractedChapter = extract_chapter(chapter, lines, base)?;

        if chapter == SCRAMBLED_CHAPTER {
            apply_overrides(&mut extracted.en);
        }

        text.insert(Language::En, extracted.en);
        Ok(Some(extracted.locations))
    }

    /// Extracts text of all configured chapters from `source_path`, and writes `lang.json` and `sourcemap.json`
    /// into the output directory.
    ///
    /// A chapter whose translation files can't be read is skipped with a warning, and stays empty in the output.
    ///
    /// # Errors
    ///
    /// Any [`Error`] from reading the code or parsing the calls. Nothing is written on failure.
    pub fn extract<P: AsRef<Path>>(&self, source_path: P) -> Result<Extracted, Error> {
        let source_path: &Path = source_path.as_ref();
        let mut extracted = Extracted::default();

        for &chapter in &self.chapters {
            let mut text = ChapterText::default();
            let base: Option<&LangTable> = extracted
                .lang
                .get(&BASE_CHAPTER)
                .and_then(|text| text.get(&Language::En));

            let locations = self.extract_one(
                chapter,
                &source_path.join(chapter.to_string()),
                base,
                &mut text,
            )?;

            if self.logging && locations.is_some() {
                info!("{EXTRACTED_CHAPTER_MSG} {chapter}");
            }

            extracted.lang.insert(chapter, text);
            extracted.sourcemap.insert(chapter, locations.unwrap_or_default());
        }

        sort_recursively(&mut extracted);

        for (filename, content) in [
            (LANG_JSON_FILE, to_json_string(&extracted.lang)?),
            (SOURCEMAP_JSON_FILE, to_json_string(&extracted.sourcemap)?),
        ] {
            let path: PathBuf = self.output_path.join(filename);
            write_file(&path, &content)?;

            if self.logging {
                info!("{WROTE_FILE_MSG} {}", path.display());
            }
        }

        Ok(extracted)
    }
}

fn sort_recursively(extracted: &mut Extracted) {
    extracted.lang.sort_keys();

    for text in extracted.lang.values_mut() {
        text.sort_keys();
        text.values_mut().for_each(LangTable::sort_keys);
    }

    extracted.sourcemap.sort_keys();
    extracted
        .sourcemap
        .values_mut()
        .for_each(ChapterSourceMap::sort_keys);
}

/// A builder struct for [`Extractor`].
///
/// # Example
/// ```no_run
/// use textdump_rs_lib::ExtractorBuilder;
///
/// let extractor = ExtractorBuilder::new().chapters([1, 2]).logging(true).build();
/// extractor.extract("path/to/deltarune").unwrap();
/// ```
#[derive(Default)]
pub struct ExtractorBuilder {
    extractor: Extractor,
}

impl ExtractorBuilder {
    /// Creates a new [`ExtractorBuilder`] instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chapters to extract.
    ///
    /// # Example
    /// ```compile_fail
    /// let extractor = ExtractorBuilder::new().chapters([1, 2, 3]).build();
    /// ```
    pub fn chapters(mut self, chapters: impl Into<Vec<ChapterId>>) -> Self {
        self.extractor.set_chapters(chapters);
        self
    }

    /// Sets the directory where `lang.json` and `sourcemap.json` are written.
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.extractor.set_output_path(path);
        self
    }

    /// Sets whether to output logs.
    ///
    /// As this crate uses `log` for logging, you should [set up logging in your program](https://docs.rs/log/latest/log/#available-logging-implementations).
    pub fn logging(mut self, enabled: bool) -> Self {
        self.extractor.set_logging(enabled);
        self
    }

    /// Builds and returns the [`Extractor`].
    pub fn build(self) -> Extractor {
        self.extractor
    }
}
