use super::*;
use crate::render::cpu::rasterize;

const NOW: i64 = 1_767_225_600_000;

fn request() -> RenderRequest {
    RenderRequest::new(NOW + 90_061_000)
}

#[test]
fn options_are_validated() {
    for frame_count in [0, MAX_FRAME_COUNT + 1] {
        let opts = RenderOptions {
            frame_count,
            ..RenderOptions::default()
        };
        let err = CountdownSession::new(request(), opts).err().unwrap();
        assert!(err.is_validation(), "{frame_count}");
    }
    let bad = request().with_width(100);
    assert!(
        CountdownSession::new(bad, RenderOptions::default())
            .err()
            .unwrap()
            .is_validation()
    );
}

#[test]
fn render_frame_matches_one_shot_rasterize() {
    let mut session = CountdownSession::new(request(), RenderOptions::default()).unwrap();
    let frame = session.render_frame(NOW, FrameIndex(3)).unwrap();
    let expected = rasterize(&remaining_at(NOW + 90_061_000, NOW + 3_000), &request()).unwrap();
    assert_eq!(frame, expected);
    assert_eq!((frame.width(), frame.height()), (400, 112));
}

#[test]
fn render_frame_rejects_index_past_end() {
    let mut session = CountdownSession::new(request(), RenderOptions::default()).unwrap();
    let err = session.render_frame(NOW, FrameIndex(10)).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn render_frames_returns_every_frame_in_order() {
    let session = CountdownSession::new(request(), RenderOptions::default()).unwrap();
    let (frames, stats) = session.render_frames(NOW).unwrap();

    assert_eq!(stats.frames_total, 10);
    assert_eq!(stats.frames_rendered, 10);
    assert_eq!(frames.len(), 10);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!((frame.width(), frame.height()), (400, 112));
        let expected = rasterize(
            &remaining_at(NOW + 90_061_000, NOW + 1_000 * i as i64),
            &request(),
        )
        .unwrap();
        assert_eq!(*frame, expected, "frame {i}");
    }
}

#[test]
fn frame_cap_allows_two_minutes() {
    let opts = RenderOptions {
        frame_count: MAX_FRAME_COUNT,
        ..RenderOptions::default()
    };
    opts.validate().unwrap();
    assert_eq!(MAX_FRAME_COUNT, 120);
}

#[test]
fn expired_countdown_elides_all_but_one_frame() {
    let session =
        CountdownSession::new(RenderRequest::new(NOW - 1), RenderOptions::default()).unwrap();
    let (frames, stats) = session.render_frames(NOW).unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(stats.frames_rendered, 1);
    assert_eq!(stats.frames_elided, 9);
    assert!(frames.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn render_countdown_gif_uses_defaults() {
    let anim = render_countdown_gif(&request(), NOW).unwrap();
    assert_eq!(anim.frame_count(), 10);
    assert_eq!((anim.width(), anim.height()), (400, 112));
    assert_eq!(&anim.bytes()[..6], b"GIF89a");
}

#[test]
fn output_is_deterministic_for_fixed_now() {
    let a = render_countdown_gif(&request(), NOW).unwrap();
    let b = render_countdown_gif(&request(), NOW).unwrap();
    assert_eq!(a.bytes(), b.bytes());
}
