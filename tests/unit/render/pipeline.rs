use super::*;
use crate::eval::remaining::MS_PER_SECOND;

const NOW: i64 = 1_767_225_600_000;

#[test]
fn frames_count_down_in_order() {
    let req = RenderRequest::new(NOW + 90_061_000);
    let (frames, stats) = render_frames(&req, NOW, 10, &RenderThreading::default()).unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 10,
            frames_rendered: 10,
            frames_elided: 0,
        }
    );
    for pair in frames.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn expired_frames_are_rasterized_once() {
    let req = RenderRequest::new(NOW - 5 * MS_PER_SECOND);
    let (frames, stats) = render_frames(&req, NOW, 10, &RenderThreading::default()).unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(stats.frames_rendered, 1);
    assert_eq!(stats.frames_elided, 9);
    assert!(frames.iter().all(|f| f == &frames[0]));
}

#[test]
fn countdown_reaching_zero_mid_loop_switches_to_expired() {
    // Three seconds left: 3, 2, 1, then expired for the rest of the loop.
    let req = RenderRequest::new(NOW + 3 * MS_PER_SECOND);
    let (frames, stats) = render_frames(&req, NOW, 10, &RenderThreading::default()).unwrap();
    assert_eq!(stats.frames_rendered, 4);
    assert!(frames[3..].iter().all(|f| f == &frames[3]));
    assert_ne!(frames[2], frames[3]);
}

#[test]
fn elision_off_renders_every_frame() {
    let req = RenderRequest::new(NOW - 1);
    let threading = RenderThreading {
        static_frame_elision: false,
        ..RenderThreading::default()
    };
    let (frames, stats) = render_frames(&req, NOW, 4, &threading).unwrap();
    assert_eq!(stats.frames_rendered, 4);
    assert_eq!(stats.frames_elided, 0);
    assert!(frames.iter().all(|f| f == &frames[0]));
}

#[test]
fn parallel_matches_sequential() {
    let req = RenderRequest::new(NOW + 61 * MS_PER_SECOND + 500).with_width(300);
    let seq = render_frames(&req, NOW, 6, &RenderThreading::default()).unwrap();
    let par = render_frames(
        &req,
        NOW,
        6,
        &RenderThreading {
            parallel: true,
            threads: Some(3),
            static_frame_elision: true,
        },
    )
    .unwrap();
    assert_eq!(seq.0, par.0);
    assert_eq!(seq.1, par.1);
}

#[test]
fn zero_threads_is_rejected() {
    let req = RenderRequest::new(NOW);
    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
        static_frame_elision: false,
    };
    let err = render_frames(&req, NOW, 2, &threading).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn zero_frames_yield_nothing() {
    let req = RenderRequest::new(NOW + 10_000);
    let (frames, stats) = render_frames(&req, NOW, 0, &RenderThreading::default()).unwrap();
    assert!(frames.is_empty());
    assert_eq!(stats, RenderStats::default());
}
