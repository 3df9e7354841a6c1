//! Color escape codes and the glyph strip encoding of result history.
//!
//! Each ping result becomes a single glyph: `'.'` for a lost probe, `'!'` for
//! a reply, colored by outcome. Color escapes are emitted only when the color
//! changes from the previous glyph, which keeps long same-colored runs down to
//! one escape. The suppression is purely an output-size optimization; decoded
//! output is identical either way.

use crate::host::PingResult;

/// Logical colors used by the glyph strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Yellow,
    Reset,
}

impl Color {
    /// The ANSI escape sequence for this color.
    pub fn code(self) -> &'static str {
        match self {
            Color::Green => "\x1b[32m",
            Color::Red => "\x1b[31m",
            Color::Yellow => "\x1b[33m",
            Color::Reset => "\x1b[39m",
        }
    }

    /// The escape sequence for this color, or `""` when it matches the
    /// previously emitted color.
    pub fn encode(self, last: Option<Color>) -> &'static str {
        if last == Some(self) {
            ""
        } else {
            self.code()
        }
    }
}

/// Logical color of a single result.
fn result_color(result: &PingResult) -> Color {
    if result.is_loss() {
        Color::Red
    } else if result.error {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Encode a result history as a color-coded glyph strip.
///
/// Color transition state is local to the strip, starting at "no color", and
/// every strip ends with exactly one reset code so the terminal default is
/// restored even when the history is empty.
pub fn glyph_strip(results: &[PingResult]) -> String {
    let mut strip = String::new();
    let mut last: Option<Color> = None;

    for result in results {
        let color = result_color(result);
        strip.push_str(color.encode(last));
        strip.push(if result.is_loss() { '.' } else { '!' });
        last = Some(color);
    }

    strip.push_str(Color::Reset.code());
    strip
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn color_codes_are_exact() {
        assert_eq!(Color::Green.code(), "\u{1b}[32m");
        assert_eq!(Color::Red.code(), "\u{1b}[31m");
        assert_eq!(Color::Yellow.code(), "\u{1b}[33m");
        assert_eq!(Color::Reset.code(), "\u{1b}[39m");
    }

    #[test]
    fn encode_suppresses_repeated_color() {
        assert_eq!(Color::Green.encode(None), "\u{1b}[32m");
        assert_eq!(Color::Green.encode(Some(Color::Green)), "");
        assert_eq!(Color::Red.encode(Some(Color::Green)), "\u{1b}[31m");
    }

    #[test]
    fn empty_strip_is_just_a_reset() {
        assert_eq!(glyph_strip(&[]), "\u{1b}[39m");
    }

    #[test]
    fn strip_encodes_outcomes_and_transitions() {
        let results = [
            PingResult::reply(1.0),
            PingResult::reply(2.0),
            PingResult::loss(),
            PingResult::degraded(3.0),
        ];
        assert_eq!(
            glyph_strip(&results),
            "\u{1b}[32m!!\u{1b}[31m.\u{1b}[33m!\u{1b}[39m"
        );
    }

    /// Split a strip into (escape-prefix, glyph) pairs for law checking.
    fn parse_strip(strip: &str) -> (Vec<(String, char)>, usize) {
        let reset_count = strip.matches(Color::Reset.code()).count();
        let body = strip.strip_suffix(Color::Reset.code()).expect("reset tail");

        let mut glyphs = Vec::new();
        let mut escape = String::new();
        let mut chars = body.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                escape.push(c);
                for e in chars.by_ref() {
                    escape.push(e);
                    if e == 'm' {
                        break;
                    }
                }
            } else {
                glyphs.push((std::mem::take(&mut escape), c));
            }
        }
        (glyphs, reset_count)
    }

    fn arbitrary_result() -> impl Strategy<Value = PingResult> {
        prop_oneof![
            Just(PingResult::loss()),
            (0.1f64..500.0).prop_map(PingResult::reply),
            (0.1f64..500.0).prop_map(PingResult::degraded),
        ]
    }

    proptest! {
        #[test]
        fn color_transition_law(results in prop::collection::vec(arbitrary_result(), 0..64)) {
            let strip = glyph_strip(&results);
            let (glyphs, reset_count) = parse_strip(&strip);

            // One glyph per result, exactly one reset per strip
            prop_assert_eq!(glyphs.len(), results.len());
            prop_assert_eq!(reset_count, 1);

            let mut last: Option<Color> = None;
            for (result, (escape, glyph)) in results.iter().zip(&glyphs) {
                let color = if result.is_loss() {
                    Color::Red
                } else if result.error {
                    Color::Yellow
                } else {
                    Color::Green
                };
                prop_assert_eq!(*glyph, if result.is_loss() { '.' } else { '!' });
                if last == Some(color) {
                    // Equal consecutive colors carry no escape between them
                    prop_assert!(escape.is_empty());
                } else {
                    // Transitions carry exactly the one correct escape
                    prop_assert_eq!(escape.as_str(), color.code());
                }
                last = Some(color);
            }
        }
    }
}
