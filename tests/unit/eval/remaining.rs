use super::*;

const NOW: i64 = 1_767_225_600_000;

#[test]
fn past_and_present_targets_are_expired() {
    for target in [NOW, NOW - 1, NOW - MS_PER_DAY, i64::MIN] {
        let r = remaining_at(target, NOW);
        assert_eq!(r, RemainingDuration::EXPIRED, "{target}");
        assert_eq!(r.units(), [0, 0, 0, 0]);
    }
}

#[test]
fn one_of_each_unit() {
    let target = NOW + MS_PER_DAY + MS_PER_HOUR + MS_PER_MINUTE + MS_PER_SECOND;
    assert_eq!(
        remaining_at(target, NOW),
        RemainingDuration {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1,
            expired: false,
        }
    );
}

#[test]
fn units_truncate_instead_of_rounding() {
    let r = remaining_at(NOW + 1_999, NOW);
    assert_eq!((r.seconds, r.expired), (1, false));

    // Less than a second left still counts as running.
    let r = remaining_at(NOW + 1, NOW);
    assert_eq!(r.units(), [0, 0, 0, 0]);
    assert!(!r.expired);

    let r = remaining_at(NOW + MS_PER_DAY - 1, NOW);
    assert_eq!(r.units(), [0, 23, 59, 59]);
}

#[test]
fn seconds_tick_down_by_one_without_rollover() {
    let target = NOW + 5 * MS_PER_MINUTE + 30 * MS_PER_SECOND;
    let a = remaining_at(target, NOW);
    let b = remaining_at(target, NOW + MS_PER_SECOND);
    assert_eq!(a.seconds, b.seconds + 1);
    assert_eq!((a.days, a.hours, a.minutes), (b.days, b.hours, b.minutes));
}

#[test]
fn carries_propagate_at_minute_hour_and_day_rollover() {
    let target = NOW + 2 * MS_PER_DAY;
    // Exactly two days left: 2d 00:00:00, then 1d 23:59:59.
    let a = remaining_at(target, NOW);
    let b = remaining_at(target, NOW + MS_PER_SECOND);
    assert_eq!(a.units(), [2, 0, 0, 0]);
    assert_eq!(b.units(), [1, 23, 59, 59]);

    let target = NOW + 3 * MS_PER_MINUTE;
    let a = remaining_at(target, NOW);
    let b = remaining_at(target, NOW + MS_PER_SECOND);
    assert_eq!((a.minutes, a.seconds), (3, 0));
    assert_eq!((b.minutes, b.seconds), (2, 59));
}

#[test]
fn field_invariants_hold_over_a_sweep() {
    let target = NOW + 400 * MS_PER_DAY + 17;
    let mut now = NOW;
    while now < target + 10 * MS_PER_SECOND {
        let r = remaining_at(target, now);
        if r.expired {
            assert_eq!(r.units(), [0, 0, 0, 0]);
        } else {
            assert!(r.hours < 24 && r.minutes < 60 && r.seconds < 60);
        }
        now += 7_777_777;
    }
}

#[test]
fn days_are_unbounded() {
    let r = remaining_at(NOW + 1_000 * MS_PER_DAY, NOW);
    assert_eq!(r.days, 1_000);
}

#[test]
fn frame_instants_step_one_second_forward() {
    assert_eq!(frame_instant_ms(NOW, FrameIndex(0)), NOW);
    assert_eq!(frame_instant_ms(NOW, FrameIndex(9)), NOW + 9_000);
    assert_eq!(frame_instant_ms(i64::MAX - 5, FrameIndex(3)), i64::MAX);
}

#[test]
fn consecutive_frames_count_down() {
    let target = NOW + 90_061_000;
    let secs: Vec<u32> = (0..4)
        .map(|i| remaining_at(target, frame_instant_ms(NOW, FrameIndex(i))).seconds)
        .collect();
    assert_eq!(secs, vec![1, 0, 59, 58]);
}
