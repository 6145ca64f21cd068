use chrono::{DateTime, TimeZone, Utc};
use formbind::{bind, BindError, FormBind, FormRequest};

#[derive(Default, FormBind)]
struct TestStruct {
    #[param("name")]
    name: String,
    #[param("is_cool")]
    is_cool: bool,
    #[param("counter")]
    counter: i64,
    #[param("start")]
    start: DateTime<Utc>,
}

fn get(uri: &str) -> FormRequest<Vec<u8>> {
    let request = http::Request::builder()
        .uri(uri)
        .body(Vec::new())
        .expect("failed to build request");
    FormRequest::new(request)
}

#[test]
fn test_full_bind() {
    let mut source = get("http://example.com/p?name=Joe&is_cool=true&counter=1&start=2023-01-02T15:04:05Z");
    let mut target = TestStruct::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.name, "Joe");
    assert!(target.is_cool);
    assert_eq!(target.counter, 1);
    assert_eq!(
        target.start,
        Utc.with_ymd_and_hms(2023, 1, 2, 15, 4, 5).unwrap()
    );
}

#[test]
fn test_percent_encoded_value_decoded() {
    let mut source = get("http://example.com/p?name=Joe%20Smith");
    let mut target = TestStruct::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.name, "Joe Smith");
}

#[test]
fn test_numeric_parse_failure_swallowed() {
    let mut source = get("http://example.com/p?counter=notanumber");
    let mut target = TestStruct::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.counter, 0);
}

#[test]
fn test_bool_parse_failure_swallowed() {
    let mut source = get("http://example.com/p?is_cool=maybe&name=Joe");
    let mut target = TestStruct::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert!(!target.is_cool);
    assert_eq!(target.name, "Joe");
}

#[test]
fn test_unparseable_time_is_error() {
    let mut source = get("http://example.com/p?start=not-a-date");
    let mut target = TestStruct::default();
    let err = bind(&mut source, &mut target).expect_err("expected error");
    match &err {
        BindError::InvalidTimeFormat { field } => assert_eq!(*field, "start"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("start"));
}

#[test]
fn test_missing_and_empty_values_leave_fields() {
    let mut source = get("http://example.com/p?name=&counter=");
    let mut target = TestStruct {
        name: "initial".to_string(),
        is_cool: true,
        counter: 42,
        start: DateTime::<Utc>::default(),
    };
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.name, "initial");
    assert!(target.is_cool);
    assert_eq!(target.counter, 42);
}

#[test]
fn test_form_body_bound_and_query_wins() {
    let request = http::Request::builder()
        .method("POST")
        .uri("http://example.com/p?counter=7")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(b"name=Form+Name&counter=5".to_vec())
        .expect("failed to build request");
    let mut source = FormRequest::new(request);
    let mut target = TestStruct::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.name, "Form Name");
    assert_eq!(target.counter, 7);
}

#[test]
fn test_bind_from_convenience() {
    let mut source = get("http://example.com/p?name=Joe");
    let mut target = TestStruct::default();
    target.bind_from(&mut source).expect("bind failed");
    assert_eq!(target.name, "Joe");
}

#[derive(Default, FormBind)]
struct Widths {
    #[param("tiny")]
    tiny: i8,
    #[param("small")]
    small: i16,
    #[param("medium")]
    medium: i32,
    #[param("size")]
    size: isize,
    #[param("ratio")]
    ratio: f32,
    #[param("precise")]
    precise: f64,
}

#[test]
fn test_integer_and_float_widths() {
    let mut source =
        get("http://example.com/p?tiny=-3&small=300&medium=70000&size=12&ratio=1.5&precise=2.25");
    let mut target = Widths::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.tiny, -3);
    assert_eq!(target.small, 300);
    assert_eq!(target.medium, 70_000);
    assert_eq!(target.size, 12);
    assert_eq!(target.ratio, 1.5);
    assert_eq!(target.precise, 2.25);
}

#[test]
fn test_out_of_range_integer_swallowed() {
    // 300 does not fit in i8; the parse failure leaves the field alone.
    let mut source = get("http://example.com/p?tiny=300");
    let mut target = Widths::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.tiny, 0);
}

#[derive(Default, FormBind)]
struct WithUnsupported {
    #[param("name")]
    name: String,
    #[param("tags")]
    tags: Vec<String>,
}

#[test]
fn test_unsupported_type_is_error() {
    let mut source = get("http://example.com/p?tags=a");
    let mut target = WithUnsupported::default();
    let err = bind(&mut source, &mut target).expect_err("expected error");
    match err {
        BindError::UnsupportedType { field, .. } => assert_eq!(field, "tags"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsupported_type_skipped_when_absent() {
    let mut source = get("http://example.com/p?name=Joe");
    let mut target = WithUnsupported::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.name, "Joe");
    assert!(target.tags.is_empty());
}

#[derive(Default, FormBind)]
struct PartiallyAnnotated {
    #[param("name")]
    name: String,
    unannotated: String,
}

#[test]
fn test_unannotated_field_left_alone() {
    let mut source = get("http://example.com/p?name=Joe&unannotated=nope");
    let mut target = PartiallyAnnotated::default();
    bind(&mut source, &mut target).expect("bind failed");
    assert_eq!(target.name, "Joe");
    assert_eq!(target.unannotated, "");
}

#[test]
fn test_time_formats_end_to_end() {
    let literals = [
        "Mon,%2002%20Jan%202006%2015:04:05%20GMT",
        "2006-01-02T15:04:05Z",
        "2006-01-02",
    ];
    for literal in literals {
        let mut source = get(&format!("http://example.com/p?start={literal}"));
        let mut target = TestStruct::default();
        bind(&mut source, &mut target).expect("bind failed");
        assert_eq!(target.start.date_naive().to_string(), "2006-01-02");
    }
}
