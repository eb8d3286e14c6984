use crate::foundation::core::Rgb8;
use crate::foundation::error::{CountdownError, CountdownResult};
use serde::{Deserialize, Serialize};

impl Rgb8 {
    /// Parse `#RRGGBB` or `#RGB` (case-insensitive, leading `#` optional).
    pub fn from_hex(s: &str) -> CountdownResult<Self> {
        parse_hex(s).map_err(CountdownError::validation)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb8 {
    type Err = CountdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match digits.len() {
        6 => Ok(Rgb8::new(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        3 => {
            // #abc is shorthand for #aabbcc.
            let nibble = |i: usize| hex_byte(&digits[i..=i]).map(|v| v * 17);
            Ok(Rgb8::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => Err(format!(
            "hex color must be #RRGGBB or #RGB (case-insensitive), got \"{s}\""
        )),
    }
}
