#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! A parser for flat INI files.
//!
//! The accepted format is line-oriented:
//!
//! ```text
//! # full-line comment
//! ; alternate comment marker
//! key = value
//! [section]
//! key2=value2
//! key3 = a = b = c
//! ```
//!
//! Pairs before the first header belong to the default section `""`. Only the first `=`
//! separates key from value, so `key3` above holds `a = b = c`. Comments take a whole line;
//! a `#` or `;` after a value is part of the value.
//!
//! Leading and trailing whitespace is trimmed from every line, and again from each key and
//! value. Any other non-empty line is a [`SyntaxError`].

mod error;
mod parser;
mod section;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::debug;

pub use crate::error::{LoadError, SyntaxError};
pub use crate::section::Section;

/// A parsed INI document: every section, in the order it first appeared.
///
/// The default section (`""`) only exists when it received at least one pair. Explicit
/// sections exist as soon as their header is seen, even if they stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    sections: parser::Sections,
}

impl Ini {
    /// Parse INI text held in memory.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let sections = parser::parse_lines(text.lines().map(Ok::<_, SyntaxError>))?;
        debug!("parsed {} section(s)", sections.len());
        Ok(Self { sections })
    }

    /// Parse a buffered stream line by line until it is exhausted.
    ///
    /// Read failures, including invalid UTF-8, are reported as [`LoadError::Read`].
    pub fn from_buf_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let lines = reader.lines().map(|line| line.map_err(LoadError::from));
        let sections = parser::parse_lines(lines)?;
        debug!("parsed {} section(s)", sections.len());
        Ok(Self { sections })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Self::from_buf_reader(BufReader::new(reader))
    }

    /// Open and parse the file at `path`.
    ///
    /// The file is closed before this returns, whether or not parsing succeeded.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("loading {}", path.display());

        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file)
    }

    /// Look up `key` in `section`.
    ///
    /// Returns `None` if the section does not exist or does not contain the key.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Names of every section, each exactly once.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromStr for Ini {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Ini {
    type Item = &'a Section;
    type IntoIter = indexmap::map::Values<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.values()
    }
}
