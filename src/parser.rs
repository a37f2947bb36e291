use std::char;
use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::Configuration;
use crate::error::{Location, ParseError};

const SECTION_OPEN: char = '[';
const SECTION_CLOSE: char = ']';
const SEPARATOR: char = '=';
const EXTENDED_SEPARATOR: char = ':';

/// A UTF-8 encoded byte order mark decodes to this character; it never belongs to the first line.
const BOM: char = '\u{FEFF}';

/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_LE: &[u8] = &[0xFF, 0xFE];

/// What a single physical line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    SectionHeader(&'a str),
    /// Blank lines and comment lines land here too, keyed by their trimmed text.
    OptionEntry { key: &'a str, value: &'a str },
}

/// Knobs that differ between the dialects found in the wild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    comment_markers: Arc<[char]>,
    extended_separators: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            comment_markers: Arc::from(['#']),
            extended_separators: false,
        }
    }
}

impl ParserOptions {
    #[must_use]
    pub fn with_comment_markers<I>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.comment_markers = markers.into_iter().collect();
        self
    }

    /// Also split options on `:`.
    #[must_use]
    pub fn with_extended_separators(mut self, enabled: bool) -> Self {
        self.extended_separators = enabled;
        self
    }

    #[must_use]
    pub fn comment_markers(&self) -> &[char] {
        &self.comment_markers
    }

    #[must_use]
    pub fn extended_separators(&self) -> bool {
        self.extended_separators
    }

    fn is_separator(&self, c: char) -> bool {
        c == SEPARATOR || (self.extended_separators && c == EXTENDED_SEPARATOR)
    }
}

/// Classify one line with its terminator already removed.
///
/// Header parsing stops at the first `]`, and a run of opening brackets counts as one, so
/// `[[[foo[][]` names a section `foo[`. Anything that isn't a header is an option, even blank
/// lines and comments. The only rejected shape is a bracket pair trailing some text with no
/// separator on the line, like `foo[]`.
pub fn classify_line<'a>(line: &'a str, options: &ParserOptions) -> Result<Line<'a>, ParseError> {
    let raw = line;
    let line = line.trim_start();

    if let Some(rest) = line.strip_prefix(SECTION_OPEN) {
        let rest = rest.trim_start_matches(SECTION_OPEN);
        let name = rest
            .split_once(SECTION_CLOSE)
            .map_or(rest, |(name, _discarded)| name);

        return Ok(Line::SectionHeader(name));
    }

    if let Some((i, separator)) = line.char_indices().find(|&(_, c)| options.is_separator(c)) {
        return Ok(Line::OptionEntry {
            key: line[..i].trim(),
            value: line[i + separator.len_utf8()..].trim_start(),
        });
    }

    if is_broken_header(line, options.comment_markers()) {
        return Err(ParseError::Format {
            line: raw.to_owned(),
            location: Location::default(),
        });
    }

    Ok(Line::OptionEntry {
        key: line.trim(),
        value: "",
    })
}

/// `line` is left-trimmed, doesn't start with `[` and has no separator.
fn is_broken_header(line: &str, comment_markers: &[char]) -> bool {
    let Some(open) = line.find(SECTION_OPEN) else {
        return false;
    };

    // Brackets inside a comment are just text.
    if line[..open].contains(comment_markers) {
        return false;
    }

    line[open..].contains(SECTION_CLOSE)
}

/// The section that options are currently written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Global,
    Named(usize),
}

fn apply(
    configuration: &mut Configuration,
    cursor: Cursor,
    line: Line<'_>,
    number: usize,
) -> Cursor {
    match line {
        Line::SectionHeader(name) => {
            debug!(section = name, line = number, "entering section");
            configuration.push_section(name.to_owned());
            Cursor::Named(configuration.sections.len() - 1)
        }
        Line::OptionEntry { key, value } => {
            trace!(key, line = number, "option");
            let section = match cursor {
                Cursor::Global => &mut configuration.global,
                Cursor::Named(i) => &mut configuration.sections[i],
            };
            section.insert(key.to_owned(), value.to_owned());
            cursor
        }
    }
}

/// Turns text into a [`Configuration`] in a single pass.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Read `reader` to the end, or up to the first malformed line.
    ///
    /// `source` only shows up in errors and logs. Bytes that aren't valid UTF-8 are replaced,
    /// never rejected.
    pub fn parse<R>(
        &self,
        mut reader: R,
        source: Option<&str>,
    ) -> Result<Configuration, ParseError>
    where
        R: BufRead,
    {
        debug!(source = source.unwrap_or_default(), "parsing configuration");

        let mut configuration = Configuration::new(
            source.map(str::to_owned),
            Arc::clone(&self.options.comment_markers),
        );
        let mut cursor = Cursor::Global;

        let mut buffer = Vec::<u8>::with_capacity(256);
        let mut number = 0;

        loop {
            buffer.clear();
            let read = reader.read_until(b'\n', &mut buffer).map_err(|error| {
                ParseError::Read {
                    source: error,
                    location: Location::default(),
                }
                .at(source, number + 1)
            })?;

            if read == 0 {
                break;
            }

            number += 1;
            let line = String::from_utf8_lossy(strip_terminator(&buffer));
            let text: &str = if number == 1 {
                line.strip_prefix(BOM).unwrap_or(&line)
            } else {
                &line
            };

            let classified = classify_line(text, &self.options).map_err(|error| {
                warn!(source = source.unwrap_or_default(), line = number, "malformed line");
                error.at(source, number)
            })?;

            cursor = apply(&mut configuration, cursor, classified, number);
        }

        debug!(
            source = source.unwrap_or_default(),
            sections = configuration.sections.len(),
            "parsed configuration"
        );

        Ok(configuration)
    }

    pub fn parse_str(&self, text: &str, source: Option<&str>) -> Result<Configuration, ParseError> {
        self.parse(text.as_bytes(), source)
    }

    /// Like [`Parser::parse_str`], but also accepts UTF-16 LE input marked with a BOM.
    pub fn parse_bytes(
        &self,
        data: &[u8],
        source: Option<&str>,
    ) -> Result<Configuration, ParseError> {
        self.parse_str(&decode_data(data), source)
    }
}

/// Drops `\n` or `\r\n`; a lone `\r` stays part of the line.
fn strip_terminator(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}

fn decode_data(data: &[u8]) -> String {
    if data.starts_with(BOM_LE) {
        // Likely UTF-16 LE
        let utf16 = data[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    } else {
        String::from_utf8_lossy(data).into_owned()
    }
}
