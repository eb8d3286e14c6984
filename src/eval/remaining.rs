use crate::foundation::core::FrameIndex;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

/// Time left until a target instant, decomposed into display units.
///
/// When `expired` is set every numeric field is zero. Otherwise `hours < 24`,
/// `minutes < 60` and `seconds < 60`; `days` is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RemainingDuration {
    /// Whole days.
    pub days: u64,
    /// Whole hours within the day.
    pub hours: u32,
    /// Whole minutes within the hour.
    pub minutes: u32,
    /// Whole seconds within the minute.
    pub seconds: u32,
    /// The target instant is not in the future.
    pub expired: bool,
}

impl RemainingDuration {
    /// The terminal "countdown over" value.
    pub const EXPIRED: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        expired: true,
    };

    /// Values in tile order: days, hours, minutes, seconds.
    pub fn units(&self) -> [u64; 4] {
        [
            self.days,
            u64::from(self.hours),
            u64::from(self.minutes),
            u64::from(self.seconds),
        ]
    }
}

/// Time left from `now_ms` until `target_ms`, both in epoch milliseconds.
///
/// Every unit is truncated, so a unit is never shown as elapsed before its full duration has
/// passed. A target at or before `now_ms` is [`RemainingDuration::EXPIRED`].
pub fn remaining_at(target_ms: i64, now_ms: i64) -> RemainingDuration {
    let diff = target_ms.saturating_sub(now_ms);
    if diff <= 0 {
        return RemainingDuration::EXPIRED;
    }
    RemainingDuration {
        days: (diff / MS_PER_DAY) as u64,
        hours: ((diff % MS_PER_DAY) / MS_PER_HOUR) as u32,
        minutes: ((diff % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
        seconds: ((diff % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        expired: false,
    }
}

/// Instant sampled for frame `idx` of a loop rendered at `now_ms`.
///
/// Frame 0 is `now_ms` and each later frame is one second further along, so the remaining time
/// shrinks by one second per frame and the loop ticks forward.
pub fn frame_instant_ms(now_ms: i64, idx: FrameIndex) -> i64 {
    let offset = i64::try_from(idx.0)
        .unwrap_or(i64::MAX)
        .saturating_mul(MS_PER_SECOND);
    now_ms.saturating_add(offset)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/remaining.rs"]
mod tests;
