//! TeX identifier sanitizing.
//!
//! TeX command names may only contain letters, so labels such as
//! `"constant 2"` have to be squashed into something like `constanttwo`
//! before they can be used in `\newcommand{\...}`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

const DIGIT_LABELS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// How digits inside an identifier are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigitMode {
    /// Digits are dropped.
    #[default]
    Off,
    /// Digits are spelled out (`1` -> `one`).
    Spell,
    /// Digits are spelled out and capitalized (`1` -> `One`).
    SpellCapitalized,
}

impl DigitMode {
    /// Returns the mode identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigitMode::Off => "off",
            DigitMode::Spell => "spell",
            DigitMode::SpellCapitalized => "spell-capitalized",
        }
    }
}

impl fmt::Display for DigitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(DigitMode::Off),
            "spell" => Ok(DigitMode::Spell),
            "spell-capitalized" | "capitalized" => Ok(DigitMode::SpellCapitalized),
            _ => Err(format!(
                "unknown digit mode '{}', expected 'off', 'spell' or 'spell-capitalized'",
                s
            )),
        }
    }
}

/// Convert an arbitrary string into a valid TeX command name.
///
/// The input is split into runs of ASCII letters and digits; everything else
/// acts as a separator and is dropped. With `capitalize_words` the first
/// character of every run is uppercased. Digits are then removed or spelled
/// out according to `digits`.
///
/// # Example
///
/// ```
/// use texkit_core::{DigitMode, make_tex_identifier};
///
/// assert_eq!(make_tex_identifier("String With Spaces", DigitMode::Off, false), "StringWithSpaces");
/// assert_eq!(make_tex_identifier("const1", DigitMode::SpellCapitalized, false), "constOne");
/// ```
pub fn make_tex_identifier(raw: &str, digits: DigitMode, capitalize_words: bool) -> String {
    let joined: String = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            if capitalize_words {
                capitalize(part)
            } else {
                part.to_string()
            }
        })
        .collect();

    let mut result = String::with_capacity(joined.len());
    for c in joined.chars() {
        match c.to_digit(10) {
            None => result.push(c),
            Some(d) => match digits {
                DigitMode::Off => {}
                DigitMode::Spell => result.push_str(DIGIT_LABELS[d as usize]),
                DigitMode::SpellCapitalized => {
                    result.push_str(&capitalize(DIGIT_LABELS[d as usize]))
                }
            },
        }
    }
    result
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}
