use super::error::ConvertError;
use super::reader::Reader;
use crate::hand::HandAccumulator;
use crate::hand::Validity;
use encoding_rs::WINDOWS_1252;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("hand split pattern"));

/// Splits a transcript into hands and runs each through a [`Reader`].
///
/// Hands share nothing, so [`Converter::convert`] may be called from any
/// number of threads at once.
#[derive(Debug, Clone, Default)]
pub struct Converter<R: Reader> {
    reader: R,
}

impl<R: Reader> Converter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Transcripts are UTF-8 or, as the room writes them, cp1252.
    pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
        match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => {
                log::debug!("transcript is not UTF-8, decoding as cp1252");
                WINDOWS_1252.decode_without_bom_handling(bytes).0
            }
        }
    }

    /// One entry per hand. Line endings are normalized and blank runs
    /// between hands are dropped.
    pub fn split(text: &str) -> Vec<String> {
        let text = text.trim_start_matches('\u{feff}').replace("\r\n", "\n");
        SPLIT
            .split(&text)
            .map(str::trim)
            .filter(|hand| !hand.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn convert(&self, text: &str) -> Result<HandAccumulator, ConvertError> {
        self.reader.read(text).inspect_err(|e| {
            log::warn!("{} hand skipped: {}", self.reader.site(), e);
        })
    }

    /// Sequential convenience over [`Converter::split`] and [`Converter::convert`].
    pub fn convert_all(&self, text: &str) -> Vec<Result<HandAccumulator, ConvertError>> {
        Self::split(text)
            .iter()
            .map(|hand| self.convert(hand))
            .collect()
    }
}

/// Running count of how a batch went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub clean: usize,
    pub partial: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record(&mut self, result: &Result<HandAccumulator, ConvertError>) {
        match result.as_ref().map(HandAccumulator::validity) {
            Ok(Validity::Clean) => self.clean += 1,
            Ok(Validity::Partial) => self.partial += 1,
            Err(_) => self.failed += 1,
        }
    }
    pub fn total(&self) -> usize {
        self.clean + self.partial + self.failed
    }
}

impl<'a> FromIterator<&'a Result<HandAccumulator, ConvertError>> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a Result<HandAccumulator, ConvertError>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut tally, result| {
            tally.record(result);
            tally
        })
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} hands: {} clean, {} partial, {} failed",
            self.total(),
            self.clean,
            self.partial,
            self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Everleaf;

    #[test]
    fn splits_on_blank_lines() {
        let text = "\u{feff}hand one\r\nline two\r\n\r\n\r\nhand two\n  \n\nhand three\n\n";
        assert_eq!(
            Converter::<Everleaf>::split(text),
            vec!["hand one\nline two", "hand two", "hand three"]
        );
        assert!(Converter::<Everleaf>::split("\n\n \n").is_empty());
    }

    #[test]
    fn decodes_cp1252_euro() {
        let text = Converter::<Everleaf>::decode(b"Blinds \x800.50/\x801 NL");
        assert_eq!(text, "Blinds \u{20ac}0.50/\u{20ac}1 NL");
        assert!(matches!(Converter::<Everleaf>::decode("\u{20ac}1".as_bytes()), Cow::Borrowed("\u{20ac}1")));
    }

    #[test]
    fn failures_are_counted_not_raised() {
        let converter = Converter::new(Everleaf);
        let results = converter.convert_all("garbage\n\nmore garbage");
        let tally = results.iter().collect::<Tally>();
        assert_eq!(
            tally,
            Tally {
                clean: 0,
                partial: 0,
                failed: 2
            }
        );
        assert_eq!(tally.to_string(), "2 hands: 0 clean, 0 partial, 2 failed");
    }
}
