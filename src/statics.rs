pub mod regexes {
    use crate::constants::TEXT_FUNCTIONS;
    use regex::Regex;
    use std::sync::LazyLock;

    /// Continuation line of an English `* ` dialogue box, which isn't another `*` line.
    pub static CONTINUATION_LINE_RE: LazyLock<Regex> =
        LazyLock::new(|| unsafe { Regex::new(r"\n *([^*])").unwrap_unchecked() });

    /// Bracketed stretch span, e.g. `[4:GO!]`.
    pub static STRETCH_SPAN_RE: LazyLock<Regex> =
        LazyLock::new(|| unsafe { Regex::new(r"\[[^\]]*\]").unwrap_unchecked() });

    pub static HTML_TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| unsafe { Regex::new(r"<[^>]+>").unwrap_unchecked() });

    /// Any of the text functions followed by an opening parenthesis.
    pub static TEXT_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| unsafe {
        Regex::new(&format!(r"({})\(", TEXT_FUNCTIONS.join("|"))).unwrap_unchecked()
    });

    /// Line holding at least one text function call with arguments.
    pub static TEXT_CALL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| unsafe {
        Regex::new(&format!(r"({})\([^)]", TEXT_FUNCTIONS.join("|"))).unwrap_unchecked()
    });
}
