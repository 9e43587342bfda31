use super::*;

fn sample_rule() -> AuthRule {
    AuthRule {
        id: 7,
        app: "editor".to_owned(),
        version_rule: ">=1.2".to_owned(),
        ip_rule: "10.0.0.0/8".to_owned(),
        detail_info: "seat=5".to_owned(),
        created_at: NaiveDateTime::parse_from_str("2024-03-01 12:00:00", "%Y-%m-%d %H:%M:%S").expect("timestamp"),
    }
}

#[test]
fn envelope_ok_sets_code_200() {
    let json = serde_json::to_value(Envelope::ok(LoginResponse { token: "t".to_owned() })).expect("serialize");
    assert_eq!(json, serde_json::json!({"code": 200, "data": {"token": "t"}}));
}

#[test]
fn ack_serializes_code_only() {
    let json = serde_json::to_value(Ack::ok()).expect("serialize");
    assert_eq!(json, serde_json::json!({"code": 200}));
}

#[test]
fn error_body_detail_text_for_string_detail() {
    let body = ErrorBody::message("nope");
    assert_eq!(body.detail_text(), Some("nope"));
}

#[test]
fn error_body_detail_text_none_for_object_detail() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"detail":{"code":403,"message":"denied"}}"#).expect("deserialize");
    assert_eq!(body.detail_text(), None);
}

#[test]
fn rule_timestamp_serializes_without_offset() {
    let json = serde_json::to_value(sample_rule()).expect("serialize");
    assert_eq!(json["created_at"], "2024-03-01T12:00:00");
}

#[test]
fn form_without_id_becomes_create() {
    let form = AuthRuleForm { app: "editor".to_owned(), ..AuthRuleForm::default() };
    assert!(matches!(form.into_request(), RuleRequest::Create(rule) if rule.app == "editor"));
}

#[test]
fn form_with_id_becomes_update() {
    let form = AuthRuleForm::from(&sample_rule());
    match form.into_request() {
        RuleRequest::Update(update) => {
            assert_eq!(update.id, 7);
            assert_eq!(update.ip_rule, "10.0.0.0/8");
        }
        RuleRequest::Create(_) => panic!("expected update"),
    }
}

#[test]
fn event_kind_parses_known_values() {
    assert_eq!("start".parse::<EventKind>(), Ok(EventKind::Start));
    assert_eq!("stop".parse::<EventKind>(), Ok(EventKind::Stop));
}

#[test]
fn event_kind_rejects_unknown_value() {
    assert_eq!("pause".parse::<EventKind>(), Err(UnknownEventKind("pause".to_owned())));
}

#[test]
fn event_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_value(EventKind::Stop).expect("serialize"), "stop");
}

#[test]
fn event_filter_normalized_drops_blank_fields() {
    let filter = EventFilter { app: Some("  ".to_owned()), event_type: Some("start".to_owned()) }.normalized();
    assert_eq!(filter.app, None);
    assert_eq!(filter.event_type.as_deref(), Some("start"));
}

#[test]
fn event_filter_skips_absent_fields_when_serialized() {
    let json = serde_json::to_value(EventFilter::default()).expect("serialize");
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn stats_filter_normalized_drops_empty_dates() {
    let filter = StatsFilter { start_date: Some(String::new()), end_date: Some("2024-01-31".to_owned()) }.normalized();
    assert_eq!(filter.start_date, None);
    assert_eq!(filter.end_date.as_deref(), Some("2024-01-31"));
}
