#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! A forgiving reader for INI-style configuration files.
//!
//! Nothing is thrown away: inline comments stay in the raw values, comment lines and blank
//! lines are kept as options, and duplicate section names each get their own [`Section`]. Use
//! [`Section::value_without_comments`] for the cleaned-up value.

mod error;
mod parser;
mod section;
mod value;

use std::io::BufRead;
use std::iter;
use std::str::FromStr;
use std::sync::Arc;

pub use crate::error::{Location, ParseError};
pub use crate::parser::{Line, Parser, ParserOptions, classify_line};
pub use crate::section::Section;
pub use crate::value::strip_comments;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    source: Option<String>,
    /// Options appearing before the first header. Always present, always named `""`.
    global: Section,
    sections: Vec<Section>,
    comment_markers: Arc<[char]>,
}

impl Configuration {
    pub(crate) fn new(source: Option<String>, comment_markers: Arc<[char]>) -> Self {
        Self {
            source,
            global: Section::new(String::new(), Arc::clone(&comment_markers)),
            sections: Vec::new(),
            comment_markers,
        }
    }

    pub(crate) fn push_section(&mut self, name: String) {
        self.sections
            .push(Section::new(name, Arc::clone(&self.comment_markers)));
    }

    /// Parse with the default [`ParserOptions`].
    pub fn read<R>(reader: R, source: &str) -> Result<Self, ParseError>
    where
        R: BufRead,
    {
        Parser::default().parse(reader, Some(source))
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn global(&self) -> &Section {
        &self.global
    }

    /// Sections in the order their headers appear. Never includes the global section.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The global section followed by every other section.
    pub fn all_sections(&self) -> impl Iterator<Item = &Section> {
        iter::once(&self.global).chain(&self.sections)
    }

    /// First section called `name`; `""` finds the global section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.all_sections().find(|section| section.name() == name)
    }

    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.all_sections()
            .filter(move |section| section.name() == name)
    }
}

impl FromStr for Configuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::default().parse_str(s, None)
    }
}
