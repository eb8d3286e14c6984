use super::*;

#[test]
fn defaults_match_the_documented_style() {
    let req = RenderRequest::new(0);
    assert_eq!(req.background.to_hex(), "#ffffff");
    assert_eq!(req.foreground.to_hex(), "#2563eb");
    assert_eq!(req.font_size, 36);
    assert_eq!(req.width_px, 400);
    assert_eq!(req.height_px(), 112);
    assert_eq!(req.labels.units(), ["JOURS", "HEURES", "MIN", "SEC"]);
    req.validate().unwrap();
}

#[test]
fn validate_rejects_out_of_range_instead_of_clamping() {
    for width in [0, 199, 801, 4000] {
        let err = RenderRequest::new(0).with_width(width).validate().unwrap_err();
        assert!(err.is_validation(), "{width}");
        assert!(err.to_string().contains("width"));
    }
    for size in [0, 15, 61] {
        let err = RenderRequest::new(0)
            .with_font_size(size)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("font size"), "{size}");
    }
    RenderRequest::new(0).with_width(200).with_font_size(16).validate().unwrap();
    RenderRequest::new(0).with_width(800).with_font_size(60).validate().unwrap();
}

#[test]
fn labels_accept_any_printable_text_up_to_the_limit() {
    let mut labels = Labels::default();
    labels.days = "Tage".to_owned();
    labels.expired = "Offre terminée !".to_owned();
    RenderRequest::new(0).with_labels(labels).validate().unwrap();

    let mut labels = Labels::english();
    labels.days = "DAYS\nLEFT".to_owned();
    let err = RenderRequest::new(0).with_labels(labels).validate().unwrap_err();
    assert!(err.to_string().contains("control character"));

    let mut labels = Labels::default();
    labels.expired = "é".repeat(MAX_LABEL_CHARS + 1);
    let err = RenderRequest::new(0).with_labels(labels).validate().unwrap_err();
    assert!(err.to_string().contains("at most"));

    let mut labels = Labels::default();
    labels.expired = "é".repeat(MAX_LABEL_CHARS);
    RenderRequest::new(0).with_labels(labels).validate().unwrap();
}

#[test]
fn request_round_trips_through_json_with_default_labels() {
    let json = serde_json::json!({
        "target_ms": 1_000,
        "background": "#000000",
        "foreground": "#ffcc00",
        "font_size": 40,
        "width_px": 600
    });
    let req: RenderRequest = serde_json::from_value(json).unwrap();
    assert_eq!(req.labels, Labels::french());
    assert_eq!(req.height_px(), 168);
}
