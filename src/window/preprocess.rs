//! Line cleanup before windowing.
//!
//! [`LinePreprocessor`] drops operational noise (health and readiness probes)
//! and blank lines, and strips line terminators. [`split_large_lines`] breaks
//! lines that are too large to ever fit a window into word-aligned pieces,
//! since the builder never splits a line itself.

use super::counter::TokenCounter;

/// Substrings that mark a line as probe noise when no filters are supplied.
pub const DEFAULT_FILTERS: &[&str] = &["healthz", "readinessprobe", "livenessprobe"];

/// Default per-line ceiling for [`split_large_lines`].
pub const DEFAULT_MAX_LINE_TOKENS: usize = 1000;

/// Noise filter and terminator stripper for raw log lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePreprocessor {
    /// Lowercased substrings; a line containing any of them is dropped
    filters: Vec<String>,
}

impl Default for LinePreprocessor {
    fn default() -> Self {
        Self {
            filters: DEFAULT_FILTERS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl LinePreprocessor {
    /// Preprocessor with an explicit filter set. Matching is case-insensitive.
    ///
    /// A set with no non-empty entries falls back to [`DEFAULT_FILTERS`];
    /// use [`LinePreprocessor::unfiltered`] to keep every non-blank line.
    pub fn with_filters<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filters: Vec<String> = filters
            .into_iter()
            .map(|f| f.as_ref().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        if filters.is_empty() {
            return Self::default();
        }
        Self { filters }
    }

    /// Preprocessor that drops no lines as noise. Terminators and blank
    /// lines are still removed.
    pub fn unfiltered() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Returns `true` if the line contains one of the noise substrings.
    pub fn is_noise(&self, line: &str) -> bool {
        if self.filters.is_empty() {
            return false;
        }
        let lower = line.to_lowercase();
        self.filters.iter().any(|f| lower.contains(f.as_str()))
    }

    /// Clean raw lines (terminators may still be attached).
    ///
    /// Noise lines are dropped, trailing `\n`/`\r` stripped, and lines that
    /// are empty or whitespace-only afterwards removed. Order is preserved.
    pub fn preprocess<S: AsRef<str>>(&self, raw_lines: &[S]) -> Vec<String> {
        raw_lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| !self.is_noise(line))
            .map(strip_terminators)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Remove every trailing `\n` and `\r`.
pub fn strip_terminators(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Break lines whose token count exceeds `max_line_tokens`.
///
/// An oversized line is split on whitespace and its words are packed
/// greedily, each word costed as `count(word + " ")`, starting a new piece
/// whenever the next word would overflow the ceiling. Pieces are rejoined
/// with single spaces. A single word larger than the ceiling becomes a piece
/// of its own. Lines within the ceiling pass through untouched.
pub fn split_large_lines<S: AsRef<str>>(
    lines: &[S],
    max_line_tokens: usize,
    counter: &dyn TokenCounter,
) -> Vec<String> {
    let mut split = Vec::with_capacity(lines.len());

    for line in lines.iter().map(|line| line.as_ref()) {
        if counter.count(line) <= max_line_tokens {
            split.push(line.to_string());
            continue;
        }

        let mut piece: Vec<&str> = Vec::new();
        let mut piece_tokens = 0;

        for word in line.split_whitespace() {
            let word_tokens = counter.count(&format!("{} ", word));
            if piece_tokens + word_tokens <= max_line_tokens {
                piece.push(word);
                piece_tokens += word_tokens;
            } else {
                if !piece.is_empty() {
                    split.push(piece.join(" "));
                }
                piece = vec![word];
                piece_tokens = word_tokens;
            }
        }

        if !piece.is_empty() {
            split.push(piece.join(" "));
        }
    }

    split
}
