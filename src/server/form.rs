//! Turning an inbound request into a submission record.

use std::borrow::Cow;

use super::http::HttpRequest;
use crate::sheets::error::SubmitError;
use crate::sheets::record::{record_from_json, record_from_pairs, Record, Value};

/// How a POST body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Form,
    Json,
}

/// `None` for media types the webhook does not accept.
pub fn body_kind(request: &HttpRequest) -> Option<BodyKind> {
    match request.media_type().as_deref() {
        None | Some("application/x-www-form-urlencoded") => Some(BodyKind::Form),
        Some("application/json") => Some(BodyKind::Json),
        Some(_) => None,
    }
}

/// Decode `a=1&b=two+words` into pairs, keeping their order.
pub fn parse_form_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
        }
    }
}

/// Build the record for a POST.
///
/// Form bodies: query parameters first, then body parameters; the first
/// occurrence of a key wins. JSON bodies must be an object; query parameters
/// fill in keys the body does not carry.
pub fn record_from_request(request: &HttpRequest, kind: BodyKind) -> Result<Record, SubmitError> {
    let query_pairs = request
        .query
        .as_deref()
        .map(parse_form_pairs)
        .unwrap_or_default();

    match kind {
        BodyKind::Form => {
            let body = std::str::from_utf8(&request.body).map_err(|e| {
                SubmitError::MalformedPayload(format!("form body is not UTF-8: {}", e))
            })?;
            Ok(record_from_pairs(
                query_pairs.into_iter().chain(parse_form_pairs(body)),
            ))
        }
        BodyKind::Json => {
            let mut record = record_from_json(&request.body)?;
            for (key, value) in query_pairs {
                record.entry(key).or_insert(Value::String(value));
            }
            Ok(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Option<&str>, content_type: Option<&str>, body: &str) -> HttpRequest {
        HttpRequest {
            method: "POST".into(),
            path: "/".into(),
            query: query.map(String::from),
            headers: content_type
                .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
                .unwrap_or_default(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_parse_form_pairs_decodes() {
        let pairs = parse_form_pairs(
            "name=Ada+Lovelace&email=ada%40example.com&flag&=x&&e_gs_order=b%2Ca",
        );
        assert_eq!(
            pairs,
            vec![
                ("name".to_string(), "Ada Lovelace".to_string()),
                ("email".to_string(), "ada@example.com".to_string()),
                ("flag".to_string(), String::new()),
                (String::new(), "x".to_string()),
                ("e_gs_order".to_string(), "b,a".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_escape_is_replaced() {
        let pairs = parse_form_pairs("k=%FF");
        assert_eq!(pairs[0].1, "\u{FFFD}");
    }

    #[test]
    fn test_body_kind() {
        assert_eq!(body_kind(&request(None, None, "")), Some(BodyKind::Form));
        assert_eq!(
            body_kind(&request(None, Some("application/x-www-form-urlencoded"), "")),
            Some(BodyKind::Form)
        );
        assert_eq!(
            body_kind(&request(None, Some("Application/JSON"), "")),
            Some(BodyKind::Json)
        );
        assert_eq!(body_kind(&request(None, Some("multipart/form-data; boundary=x"), "")), None);
    }

    #[test]
    fn test_form_record_query_first_and_first_wins() {
        let req = request(Some("sheet=q&a=1"), None, "a=2&b=3");
        let record = record_from_request(&req, BodyKind::Form).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["sheet", "a", "b"]);
        assert_eq!(record["a"], Value::from("1"));
    }

    #[test]
    fn test_json_record_with_query_fallback() {
        let req = request(
            Some("e_gs_SheetName=Orders&id=9"),
            Some("application/json"),
            r#"{"id": 1, "items": [{"sku": "x"}]}"#,
        );
        let record = record_from_request(&req, BodyKind::Json).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "items", "e_gs_SheetName"]);
        assert!(matches!(record["id"], Value::Number(_)));
    }

    #[test]
    fn test_json_array_is_malformed() {
        let req = request(None, Some("application/json"), "[1]");
        let err = record_from_request(&req, BodyKind::Json).unwrap_err();
        assert!(err.is_client_error());
    }
}
