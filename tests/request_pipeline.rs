//! Behavior-driven tests for the request pipeline
//!
//! These tests drive the client end to end through a scripted transport and
//! check the URLs, headers, and output shapes a caller observes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use econfeed_core::{
    append_date_range, encode_list, encode_value, ApiErrorKind, Client, ClientConfig, Credential,
    HttpClient, HttpError, HttpRequest, HttpResponse, OutputShape, Param, RequestDescriptor,
    RequestPath,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct ScriptedHttpClient {
    response: HttpResponse,
    calls: AtomicUsize,
    last_request: Mutex<Option<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn returning(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: HttpResponse::new(status, body),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> HttpRequest {
        self.last_request
            .lock()
            .expect("lock")
            .clone()
            .expect("a request was sent")
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("lock") = Some(request);
        Ok(self.response.clone())
    }
}

const CALENDAR_BODY: &str = r#"[
    {"CalendarId": "1", "Date": "2016-01-01T00:00:00", "Country": "United States", "Event": "GDP"},
    {"CalendarId": "2", "Date": "2016-01-02T00:00:00", "Country": "China", "Actual": "6.9%"}
]"#;

fn client_for(transport: Arc<ScriptedHttpClient>) -> Client {
    let config = ClientConfig::default()
        .with_credential(Credential::parse("key:secret").expect("valid credential"));
    Client::with_http_client(config, transport)
}

// =============================================================================
// URL construction
// =============================================================================

#[test]
fn when_calendar_range_is_requested_dates_become_d1_and_d2() {
    // Given: A bare calendar path
    let path = "/calendar";

    // When: A full date range is appended
    let composed = append_date_range(path, Some("2016-01-01"), Some("2016-01-03"))
        .expect("valid range");

    // Then: Both boundaries are added with correct separators
    assert_eq!(composed, "/calendar?d1=2016-01-01&d2=2016-01-03");
}

#[test]
fn when_country_is_scalar_or_list_segment_is_encoded_accordingly() {
    assert_eq!(Param::from("united states").encode(), "united%20states");
    assert_eq!(
        Param::from(vec!["united states", "china"]).encode(),
        "united%20states,china"
    );
    assert_eq!(
        encode_list(&["aapl:us", "indu:ind"]),
        format!("{},{}", encode_value("aapl:us"), encode_value("indu:ind"))
    );
}

#[test]
fn when_only_end_date_is_supplied_user_gets_date_error() {
    for end in ["2016-01-03", "2016-01-03 10:00", "garbage"] {
        let err = append_date_range("/calendar", None, Some(end)).expect_err("must fail");
        assert_eq!(
            econfeed_core::ApiError::from(err).kind(),
            ApiErrorKind::Date
        );
    }
}

#[test]
fn when_start_date_is_malformed_user_gets_date_error_before_sending() {
    for end in [None, Some("2016-01-03")] {
        let err = RequestPath::new("calendar")
            .date_range(Some("2016/01/01"), end)
            .expect_err("must fail");
        assert_eq!(
            econfeed_core::ApiError::from(err).kind(),
            ApiErrorKind::Date
        );
    }
}

#[test]
fn when_builder_composes_many_params_query_has_one_question_mark() {
    let path = RequestPath::new("calendar")
        .segment("country")
        .segment(["united states", "china"])
        .param("importance", "3")
        .optional_param("values", Some("true"))
        .date_range(Some("2016-01-01 08:00"), Some("2016-01-03"))
        .expect("valid range")
        .render();

    assert_eq!(
        path,
        "/calendar/country/united%20states,china?importance=3&values=true&d1=2016-01-01%2008:00&d2=2016-01-03"
    );
    assert_eq!(path.matches('?').count(), 1);
}

// =============================================================================
// Execution
// =============================================================================

#[test]
fn when_relative_path_is_fetched_base_origin_and_header_are_applied() {
    // Given: A client with a credential and a scripted transport
    let transport = ScriptedHttpClient::returning(200, CALENDAR_BODY);
    let client = client_for(transport.clone());

    // When: A relative path is fetched
    client
        .fetch(&RequestDescriptor::new("/calendar/country/china"))
        .expect("fetch succeeds");

    // Then: Exactly one request hit the configured origin with the credential
    assert_eq!(transport.calls(), 1);
    let request = transport.last_request();
    assert_eq!(
        request.url,
        "https://api.tradingeconomics.com/calendar/country/china"
    );
    assert_eq!(request.header("Authorization"), Some("key:secret"));
}

#[test]
fn when_base_url_is_overridden_relative_paths_follow_it() {
    let transport = ScriptedHttpClient::returning(200, CALENDAR_BODY);
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:8080/")
        .expect("valid url");
    let client = Client::with_http_client(config, transport.clone());

    client.execute(&"markets/index".into()).expect("ok");

    assert_eq!(transport.last_request().url, "http://127.0.0.1:8080/markets/index");
}

#[test]
fn when_output_shape_is_bogus_no_request_is_sent() {
    // Given: A client whose transport counts calls
    let transport = ScriptedHttpClient::returning(200, CALENDAR_BODY);
    let client = client_for(transport.clone());

    // When: An unknown output selector is requested
    let err = client
        .fetch_with("/calendar", Some("bogus"))
        .expect_err("bogus shape must fail");

    // Then: A parameter error is raised and the transport was never called
    assert_eq!(err.kind(), ApiErrorKind::Parameters);
    assert!(err.message().contains("bogus"));
    assert_eq!(transport.calls(), 0);
}

// =============================================================================
// Output shapes
// =============================================================================

#[test]
fn when_no_shape_is_given_records_are_returned() {
    let client = client_for(ScriptedHttpClient::returning(200, CALENDAR_BODY));

    let records = client
        .fetch_with("/calendar", None)
        .expect("ok")
        .into_records()
        .expect("records shape");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Country"], "United States");
    let keys: Vec<&str> = records[0]
        .as_object()
        .expect("object record")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["CalendarId", "Date", "Country", "Event"]);
}

#[test]
fn when_frame_is_requested_columns_are_key_union() {
    let client = client_for(ScriptedHttpClient::returning(200, CALENDAR_BODY));

    let frame = client
        .fetch_with("/calendar", Some("df"))
        .expect("ok")
        .into_frame()
        .expect("frame shape");

    assert_eq!(
        frame.columns(),
        ["CalendarId", "Date", "Country", "Event", "Actual"]
    );
    assert_eq!(frame.cell(0, "Actual"), Some(&Value::Null));
    assert_eq!(frame.cell(1, "Actual"), Some(&json!("6.9%")));
}

#[test]
fn when_raw_is_requested_payload_is_structure_identical() {
    let client = client_for(ScriptedHttpClient::returning(200, CALENDAR_BODY));
    let expected: Value = serde_json::from_str(CALENDAR_BODY).expect("valid json");

    let raw = client
        .fetch(&RequestDescriptor::new("/calendar").with_shape(OutputShape::Raw))
        .expect("ok")
        .into_raw()
        .expect("raw shape");

    assert_eq!(raw, expected);
}

#[test]
fn when_body_is_a_list_of_strings_records_keep_them() {
    let transport = ScriptedHttpClient::returning(200, r#"["GDP","CPI"]"#);
    let client = client_for(transport.clone());

    let records = client
        .fetch_with("/search/categories", None)
        .expect("a list of strings is valid data")
        .into_records()
        .expect("records shape");
    assert_eq!(records, vec![json!("GDP"), json!("CPI")]);

    let frame = client
        .fetch_with("/search/categories", Some("df"))
        .expect("ok")
        .into_frame()
        .expect("frame shape");
    assert_eq!(frame.columns(), [econfeed_core::SCALAR_COLUMN]);
    assert_eq!(frame.height(), 2);
    assert_eq!(transport.calls(), 2);
}
