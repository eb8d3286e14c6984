use crate::foundation::core::Rgb8;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::request::color::parse_hex;
use crate::request::model::{
    DEFAULT_BACKGROUND, DEFAULT_FONT_SIZE, DEFAULT_FOREGROUND, DEFAULT_WIDTH_PX, FONT_SIZE_RANGE,
    Labels, RenderRequest, WIDTH_RANGE_PX,
};
use serde::{Deserialize, Serialize};

/// Offset applied to the render instant when no target is given.
pub const DEFAULT_TARGET_OFFSET_MS: i64 = 86_400_000;

/// Loosely typed countdown parameters as they arrive from a request body or query string.
///
/// Numbers may be JSON numbers or strings (`"400"`, `"36px"`); a value that does not start with
/// an integer, or parses to zero, falls back to the default. Width and font size are clamped into
/// their documented ranges here, and only here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownParams {
    /// RFC 3339 timestamp, naive `YYYY-MM-DDTHH:MM[:SS]` (UTC) or epoch milliseconds.
    pub end_date: Option<InstantDef>,
    /// Background color, `#RRGGBB`.
    pub bg_color: Option<String>,
    /// Foreground color, `#RRGGBB`.
    pub text_color: Option<String>,
    /// Digit font size.
    pub font_size: Option<NumberDef>,
    /// Canvas width in pixels.
    pub width: Option<NumberDef>,
    /// Unit captions; missing fields keep their French defaults.
    pub labels: Option<Labels>,
}

/// A target instant as text or as epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstantDef {
    /// Epoch milliseconds.
    Millis(i64),
    /// Textual timestamp.
    Text(String),
}

/// A number that may arrive as a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberDef {
    /// Integer value.
    Int(i64),
    /// Fractional value, truncated toward zero.
    Float(f64),
    /// Text whose leading integer is used.
    Text(String),
}

impl NumberDef {
    fn leading_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => leading_int(s),
        }
    }
}

impl CountdownParams {
    /// Parse a JSON document.
    pub fn from_json_str(s: &str) -> CountdownResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CountdownError::validation(format!("invalid countdown params: {e}")))
    }

    /// Resolve into a [`RenderRequest`], relative to the render instant `now_ms`.
    pub fn into_request(self, now_ms: i64) -> CountdownResult<RenderRequest> {
        let target_ms = match &self.end_date {
            None => now_ms.saturating_add(DEFAULT_TARGET_OFFSET_MS),
            Some(InstantDef::Millis(ms)) => *ms,
            Some(InstantDef::Text(s)) => parse_instant_ms(s)?,
        };

        let background = color_or(self.bg_color.as_deref(), DEFAULT_BACKGROUND, "bgColor")?;
        let foreground = color_or(self.text_color.as_deref(), DEFAULT_FOREGROUND, "textColor")?;
        let font_size = clamped_or(self.font_size.as_ref(), DEFAULT_FONT_SIZE, FONT_SIZE_RANGE);
        let width_px = clamped_or(self.width.as_ref(), DEFAULT_WIDTH_PX, WIDTH_RANGE_PX);

        let req = RenderRequest {
            target_ms,
            background,
            foreground,
            font_size,
            width_px,
            labels: self.labels.unwrap_or_default(),
        };
        req.validate()?;
        Ok(req)
    }
}

/// Parse a target instant into epoch milliseconds.
///
/// Accepts integer milliseconds, RFC 3339 (`2026-03-15T23:59:00+01:00`), naive date-times
/// (`2026-03-15T23:59:00`, `2026-03-15 23:59`), read as UTC, and bare dates (UTC midnight).
pub fn parse_instant_ms(s: &str) -> CountdownResult<i64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CountdownError::validation("endDate is empty"));
    }
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(dt) = d.and_hms_opt(0, 0, 0)
    {
        return Ok(dt.and_utc().timestamp_millis());
    }
    Err(CountdownError::validation(format!(
        "endDate \"{s}\" is not a valid timestamp"
    )))
}

fn color_or(raw: Option<&str>, default: Rgb8, field: &str) -> CountdownResult<Rgb8> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => parse_hex(s).map_err(|e| CountdownError::validation(format!("{field}: {e}"))),
    }
}

fn clamped_or(raw: Option<&NumberDef>, default: u32, (lo, hi): (u32, u32)) -> u32 {
    match raw.and_then(NumberDef::leading_int) {
        None | Some(0) => default,
        Some(v) => v.clamp(i64::from(lo), i64::from(hi)) as u32,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (neg, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let v = rest[..end].parse::<i64>().ok()?;
    Some(if neg { -v } else { v })
}

#[cfg(test)]
#[path = "../../tests/unit/request/params.rs"]
mod tests;
