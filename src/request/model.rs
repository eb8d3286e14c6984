use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};
use serde::{Deserialize, Serialize};

/// Inclusive width range in pixels.
pub const WIDTH_RANGE_PX: (u32, u32) = (200, 800);
/// Inclusive font size range.
pub const FONT_SIZE_RANGE: (u32, u32) = (16, 60);

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH_PX: u32 = 400;
/// Default font size.
pub const DEFAULT_FONT_SIZE: u32 = 36;
/// Default background color (`#ffffff`).
pub const DEFAULT_BACKGROUND: Rgb8 = Rgb8::new(0xff, 0xff, 0xff);
/// Default foreground color (`#2563eb`).
pub const DEFAULT_FOREGROUND: Rgb8 = Rgb8::new(0x25, 0x63, 0xeb);

/// Longest accepted label, in characters.
pub const MAX_LABEL_CHARS: usize = 24;

/// Unit captions and the expired message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Caption under the days tile.
    pub days: String,
    /// Caption under the hours tile.
    pub hours: String,
    /// Caption under the minutes tile.
    pub minutes: String,
    /// Caption under the seconds tile.
    pub seconds: String,
    /// Message painted once the target instant has passed.
    pub expired: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::french()
    }
}

impl Labels {
    /// French captions (the default).
    pub fn french() -> Self {
        Self {
            days: "JOURS".to_owned(),
            hours: "HEURES".to_owned(),
            minutes: "MIN".to_owned(),
            seconds: "SEC".to_owned(),
            expired: "Offre terminee".to_owned(),
        }
    }

    /// English captions.
    pub fn english() -> Self {
        Self {
            days: "DAYS".to_owned(),
            hours: "HOURS".to_owned(),
            minutes: "MIN".to_owned(),
            seconds: "SEC".to_owned(),
            expired: "Offer ended".to_owned(),
        }
    }

    /// Unit captions in tile order: days, hours, minutes, seconds.
    pub fn units(&self) -> [&str; 4] {
        [&self.days, &self.hours, &self.minutes, &self.seconds]
    }

    fn validate(&self) -> CountdownResult<()> {
        let named = [
            ("days", &self.days),
            ("hours", &self.hours),
            ("minutes", &self.minutes),
            ("seconds", &self.seconds),
            ("expired", &self.expired),
        ];
        for (name, text) in named {
            let n = text.chars().count();
            if n > MAX_LABEL_CHARS {
                return Err(CountdownError::validation(format!(
                    "label '{name}' has {n} characters, at most {MAX_LABEL_CHARS} are allowed"
                )));
            }
            if let Some(ch) = text.chars().find(|c| c.is_control()) {
                return Err(CountdownError::validation(format!(
                    "label '{name}' contains control character {ch:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Fully resolved style and target for one countdown render.
///
/// Build one with [`RenderRequest::new`] and the `with_*` methods, or from loosely typed input
/// through [`CountdownParams`](crate::CountdownParams). Every render entry point validates the
/// request once; out-of-range values are rejected, never clamped, at that point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Target instant in epoch milliseconds.
    pub target_ms: i64,
    /// Canvas background.
    pub background: Rgb8,
    /// Digits, captions and separators.
    pub foreground: Rgb8,
    /// Nominal font size of the digits, in pixels.
    pub font_size: u32,
    /// Canvas width in pixels; the height is derived.
    pub width_px: u32,
    /// Unit captions and expired message.
    #[serde(default)]
    pub labels: Labels,
}

impl RenderRequest {
    /// Request with default style counting down to `target_ms`.
    pub fn new(target_ms: i64) -> Self {
        Self {
            target_ms,
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
            font_size: DEFAULT_FONT_SIZE,
            width_px: DEFAULT_WIDTH_PX,
            labels: Labels::default(),
        }
    }

    /// Return the request with a different background color.
    pub fn with_background(mut self, color: Rgb8) -> Self {
        self.background = color;
        self
    }

    /// Return the request with a different foreground color.
    pub fn with_foreground(mut self, color: Rgb8) -> Self {
        self.foreground = color;
        self
    }

    /// Return the request with a different font size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Return the request with a different width.
    pub fn with_width(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    /// Return the request with different captions.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Derived canvas height: `round(width * 0.28)`.
    pub fn height_px(&self) -> u32 {
        self.canvas().height
    }

    /// Output canvas of this request.
    pub fn canvas(&self) -> Canvas {
        Canvas::for_width(self.width_px)
    }

    /// Reject out-of-range dimensions and overlong or multi-line captions.
    pub fn validate(&self) -> CountdownResult<()> {
        let (wmin, wmax) = WIDTH_RANGE_PX;
        if !(wmin..=wmax).contains(&self.width_px) {
            return Err(CountdownError::validation(format!(
                "width must be within [{wmin}, {wmax}] px, got {}",
                self.width_px
            )));
        }
        let (fmin, fmax) = FONT_SIZE_RANGE;
        if !(fmin..=fmax).contains(&self.font_size) {
            return Err(CountdownError::validation(format!(
                "font size must be within [{fmin}, {fmax}], got {}",
                self.font_size
            )));
        }
        self.labels.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/model.rs"]
mod tests;
