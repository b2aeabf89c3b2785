use indexmap::IndexMap;
use log::trace;

use crate::error::SyntaxError;
use crate::section::Section;

/// The kind of a single trimmed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Pair(&'a str, &'a str),
}

impl<'a> Line<'a> {
    /// Returns `None` for a line that fits none of the known forms.
    fn classify(line: &'a str) -> Option<Self> {
        if line.is_empty() {
            return Some(Self::Blank);
        }

        if line.starts_with(['#', ';']) {
            return Some(Self::Comment);
        }

        if let Some(name) = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            return Some(Self::Header(name));
        }

        // Only the first '=' separates; the value keeps any others verbatim.
        line.split_once('=')
            .map(|(key, value)| Self::Pair(key.trim(), value.trim()))
    }
}

/// Sections keyed by name, in the order their name first appeared.
pub(crate) type Sections = IndexMap<String, Section>;

/// Represents an on-going parse.
///
/// Lines are fed one at a time; the parser remembers which section is open and how many
/// lines it has seen so errors can point back at the input.
#[derive(Debug, Default)]
pub(crate) struct Parser {
    sections: Sections,
    // Index into `sections`; `None` until a header or a default-section pair is seen.
    current: Option<usize>,
    line: usize,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `raw` (one line without its terminator) and apply it to the document.
    pub fn parse_line(&mut self, raw: &str) -> Result<(), SyntaxError> {
        self.line += 1;

        match Line::classify(raw.trim()) {
            Some(Line::Blank | Line::Comment) => {}
            Some(Line::Header(name)) => self.open_section(name),
            Some(Line::Pair(key, value)) => {
                let section = self.current_section();
                section.insert(key.to_owned(), value.to_owned());
            }
            None => return Err(SyntaxError::new(self.line, raw.to_owned())),
        }

        Ok(())
    }

    pub fn into_sections(self) -> Sections {
        self.sections
    }

    /// Repeated headers reopen the existing section rather than replacing it.
    fn open_section(&mut self, name: &str) {
        let index = if let Some(i) = self.sections.get_index_of(name) {
            i
        } else {
            trace!("line {}: new section [{name}]", self.line);
            let section = Section::new(name.to_owned());
            self.sections.insert_full(name.to_owned(), section).0
        };

        self.current = Some(index);
    }

    /// The open section, creating the default section on first use.
    fn current_section(&mut self) -> &mut Section {
        let index = match self.current {
            Some(i) => i,
            None => {
                let entry = self.sections.entry(String::new());
                let i = entry.index();
                entry.or_insert_with(|| Section::new(String::new()));
                self.current = Some(i);
                i
            }
        };

        &mut self.sections[index]
    }
}

/// Drive a [`Parser`] over `lines`, stopping at the first error of either kind.
pub(crate) fn parse_lines<I, L, E>(lines: I) -> Result<Sections, E>
where
    I: IntoIterator<Item = Result<L, E>>,
    L: AsRef<str>,
    E: From<SyntaxError>,
{
    let mut parser = Parser::new();

    for line in lines {
        parser.parse_line(line?.as_ref())?;
    }

    Ok(parser.into_sections())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Sections, SyntaxError> {
        parse_lines(text.lines().map(Ok))
    }

    #[test]
    fn classify_lines() {
        assert_eq!(Line::classify(""), Some(Line::Blank));
        assert_eq!(Line::classify("# note"), Some(Line::Comment));
        assert_eq!(Line::classify("; note = 1"), Some(Line::Comment));
        assert_eq!(Line::classify("[ foo ]"), Some(Line::Header("foo")));
        assert_eq!(Line::classify("a=b"), Some(Line::Pair("a", "b")));
        assert_eq!(Line::classify("k = a = b"), Some(Line::Pair("k", "a = b")));
        assert_eq!(Line::classify("k =  v   "), Some(Line::Pair("k", "v")));
        assert_eq!(
            Line::classify("whitespace should   =   not matter"),
            Some(Line::Pair("whitespace should", "not matter"))
        );
        assert_eq!(Line::classify("wut?"), None);
    }

    #[test]
    fn empty_brackets_are_not_a_header() {
        assert_eq!(Line::classify("[]"), None);
        assert_eq!(Line::classify("[   ]"), None);
        assert_eq!(Line::classify("[]=x"), Some(Line::Pair("[]", "x")));
    }

    #[test]
    fn header_wins_over_equals() {
        assert_eq!(Line::classify("[a=b]"), Some(Line::Header("a=b")));
    }

    #[test]
    fn empty_key_is_kept() {
        assert_eq!(Line::classify("= value"), Some(Line::Pair("", "value")));
    }

    #[test]
    fn default_section_is_created_lazily() {
        let sections = parse("# only a comment\n\n[a]\nx = 1").expect("valid input");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name(), "a");
        assert!(!sections.contains_key(""));
    }

    #[test]
    fn repeated_header_merges() {
        let sections = parse("[a]\nx = 1\n[b]\n[a]\ny = 2\nx = 3").expect("valid input");

        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].iter().collect::<Vec<_>>(),
            vec![("x", "3"), ("y", "2")]
        );
        assert!(sections[1].is_empty());
    }

    #[test]
    fn many_keys_in_one_section() {
        let text = (0..50_000)
            .map(|i| format!("k{i} = v{i}"))
            .fold(String::from("[s]"), |mut acc, line| {
                acc.push('\n');
                acc.push_str(&line);
                acc
            });

        let sections = parse(&text).expect("valid input");
        let section = &sections["s"];

        assert_eq!(section.len(), 50_000);
        assert_eq!(section.get("k0"), Some("v0"));
        assert_eq!(section.get("k49999"), Some("v49999"));
        assert_eq!(section.keys().nth(1234), Some("k1234"));
    }

    #[test]
    fn error_counts_skipped_lines() {
        let err = parse("\n# two\n[s]\n  oops  \nk = v").expect_err("line 4 is malformed");

        assert_eq!(err.line(), 4);
        assert_eq!(err.text(), "  oops  ");
    }
}
