use crate::{
    assemble::{assemble, render_plain, to_js, to_json, to_transcript},
    constants::{
        localization::{MISSING_KOREAN_MSG, RENDERED_CHAPTER_MSG, WROTE_FILE_MSG},
        CHAPTERS, LANG_JSON_FILE, RENDERED_JSON_FILE, RENDERED_JS_FILE,
        SOURCEMAP_JSON_FILE,
    },
    functions::{read_json, write_file},
    types::{ChapterId, Error, LangData, LangTable, Language, Rendered, SourceMap},
};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// A struct that renders extracted text into the web textdump and plain text transcripts.
///
/// # Fields
/// - `lang_path`: Path to `lang.json`, as written by [`crate::Extractor`]. Use [`Dumper::set_lang_path`] to set it.
/// - `sourcemap_path`: Path to `sourcemap.json`. Use [`Dumper::set_sourcemap_path`] to set it.
/// - `korean_path`: Directory with Korean `<chapter>.json` tables. Use [`Dumper::set_korean_path`] to set it.
/// - `output_path`: Directory where outputs are written. Use [`Dumper::set_output_path`] to set it.
/// - `chapters`: Chapters to look Korean tables up for. Use [`Dumper::set_chapters`] to set them.
/// - `logging`: If enabled, logs progress. Use [`Dumper::set_logging`] to set it. As this crate uses `log` for logging, you should [set up logging in your program](https://docs.rs/log/latest/log/#available-logging-implementations).
///
/// # Example
/// ```no_run
/// use textdump_rs_lib::Dumper;
///
/// let mut dumper = Dumper::new();
/// dumper.set_output_path("site");
/// dumper.dump().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Dumper {
    lang_path: PathBuf,
    sourcemap_path: PathBuf,
    korean_path: PathBuf,
    output_path: PathBuf,
    chapters: Vec<ChapterId>,
    logging: bool,
}

impl Default for Dumper {
    fn default() -> Self {
        Self {
            lang_path: PathBuf::from(LANG_JSON_FILE),
            sourcemap_path: PathBuf::from(SOURCEMAP_JSON_FILE),
            korean_path: PathBuf::from("."),
            output_path: PathBuf::from("."),
            chapters: CHAPTERS.to_vec(),
            logging: false,
        }
    }
}

impl Dumper {
    /// Creates a new [`Dumper`] instance with default values.
    ///
    /// By default, everything is read from and written to the current directory, Korean tables are looked up for
    /// chapters 1 to 4, and logging is disabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_lang_path<P: AsRef<Path>>(&mut self, path: P) {
        self.lang_path = path.as_ref().to_path_buf();
    }

    pub fn set_sourcemap_path<P: AsRef<Path>>(&mut self, path: P) {
        self.sourcemap_path = path.as_ref().to_path_buf();
    }

    /// Sets the directory with Korean tables. Each chapter's table is named after the chapter, e.g. `2.json`.
    pub fn set_korean_path<P: AsRef<Path>>(&mut self, path: P) {
        self.korean_path = path.as_ref().to_path_buf();
    }

    pub fn set_output_path<P: AsRef<Path>>(&mut self, path: P) {
        self.output_path = path.as_ref().to_path_buf();
    }

    pub fn set_chapters(&mut self, chapters: impl Into<Vec<ChapterId>>) {
        self.chapters = chapters.into();
    }

    /// Sets whether to output logs.
    ///
    /// # Example
    /// ```compile_fail
    /// dumper.set_logging(true);
    /// ```
    pub fn set_logging(&mut self, enabled: bool) {
        self.logging = enabled;
    }

    /// Adds Korean tables to `lang`. Chapters without a readable table are skipped with a warning.
    fn merge_korean(&self, lang: &mut LangData) {
        for &chapter in &self.chapters {
            let path: PathBuf = self.korean_path.join(format!("{chapter}.json"));

            match read_json::<LangTable>(&path) {
                Ok(ko) => {
                    lang.entry(chapter).or_default().insert(Language::Ko, ko);
                }
                Err(err) => warn!("{MISSING_KOREAN_MSG} {chapter}: {err}"),
            }
        }
    }

    /// Loads `lang.json`, `sourcemap.json` and Korean tables, and writes `rendered.json`, `rendered.json.js`, and a
    /// transcript per language into the output directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if inputs can't be read or outputs can't be written.
    /// - [`Error::JsonParse`] if `lang.json` or `sourcemap.json` is malformed.
    /// - Any contract violation found while rendering. Nothing is written in that case.
    pub fn dump(&self) -> Result<Rendered, Error> {
        let mut lang: LangData = read_json(&self.lang_path)?;
        let sourcemap: SourceMap = read_json(&self.sourcemap_path)?;

        self.merge_korean(&mut lang);

        let rendered: Rendered = assemble(&lang, &sourcemap)?;

        if self.logging {
            for (chapter, groups) in &rendered {
                info!("{RENDERED_CHAPTER_MSG} {chapter}: {} groups", groups.len());
            }
        }

        let mut outputs: Vec<(PathBuf, String)> = vec![
            (self.output_path.join(RENDERED_JSON_FILE), to_json(&rendered)?),
            (self.output_path.join(RENDERED_JS_FILE), to_js(&rendered)?),
        ];

        outputs.extend(Language::ALL.map(|language| {
            (
                self.output_path.join(language.transcript_filename()),
                to_transcript(&render_plain(&rendered, language)),
            )
        }));

        for (path, content) in outputs {
            write_file(&path, &content)?;

            if self.logging {
                info!("{WROTE_FILE_MSG} {}", path.display());
            }
        }

        Ok(rendered)
    }
}

/// A builder struct for [`Dumper`].
///
/// # Example
/// ```no_run
/// use textdump_rs_lib::DumperBuilder;
///
/// let dumper = DumperBuilder::new()
///     .lang_path("data/lang.json")
///     .sourcemap_path("data/sourcemap.json")
///     .korean_path("data/ko")
///     .output_path("site")
///     .logging(true)
///     .build();
/// dumper.dump().unwrap();
/// ```
#[derive(Default)]
pub struct DumperBuilder {
    dumper: Dumper,
}

impl DumperBuilder {
    /// Creates a new [`DumperBuilder`] instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path to `lang.json`.
    pub fn lang_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dumper.set_lang_path(path);
        self
    }

    /// Sets the path to `sourcemap.json`.
    pub fn sourcemap_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dumper.set_sourcemap_path(path);
        self
    }

    /// Sets the directory with Korean `<chapter>.json` tables.
    pub fn korean_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dumper.set_korean_path(path);
        self
    }

    /// Sets the directory where outputs are written.
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dumper.set_output_path(path);
        self
    }

    /// Sets the chapters to look Korean tables up for.
    ///
    /// # Example
    /// ```compile_fail
    /// let dumper = DumperBuilder::new().chapters([1, 2]).build();
    /// ```
    pub fn chapters(mut self, chapters: impl Into<Vec<ChapterId>>) -> Self {
        self.dumper.set_chapters(chapters);
        self
    }

    /// Sets whether to output logs.
    ///
    /// As this crate uses `log` for logging, you should [set up logging in your program](https://docs.rs/log/latest/log/#available-logging-implementations).
    pub fn logging(mut self, enabled: bool) -> Self {
        self.dumper.set_logging(enabled);
        self
    }

    /// Builds and returns the [`Dumper`].
    pub fn build(self) -> Dumper {
        self.dumper
    }
}
