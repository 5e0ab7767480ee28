use super::dto::ReportResponse;
use super::model::UpdateReport;
use crate::claude::model::Reply;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

const RAW_TEXT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no JSON located in the reply")]
    NoStructuredDataFound,
    #[error("malformed JSON in the reply: {0}")]
    MalformedStructuredData(#[source] serde_json::Error),
}

/// Turns the model's reply into a report.
/// Only text segments are read; the JSON may be wrapped in prose.
#[instrument(skip_all, fields(segments = reply.segments.len()))]
pub fn extract_report(reply: &Reply) -> Result<UpdateReport, ExtractionError> {
    let raw_text = reply.text();

    debug!("Reply has {} characters of text", raw_text.len());

    let report = parse_first_object(&raw_text)
        .and_then(|value| {
            serde_json::from_value::<ReportResponse>(value)
                .map_err(ExtractionError::MalformedStructuredData)
        })
        .map(|response| response.to_model());

    match &report {
        Ok(report) => info!(
            "Data received: live={}, fc={}, release={}, goods={}",
            report.events.len(),
            report.memberships.len(),
            report.releases.len(),
            report.merchandise.len()
        ),
        Err(err) => {
            let preview: String = raw_text.chars().take(RAW_TEXT_PREVIEW_CHARS).collect();
            error!("Extraction failed: {err}. Reply started with: {preview}");
        }
    }

    report
}

/// Finds the first top-level `{...}` span that parses as JSON.
///
/// Spans are found by counting braces outside string literals, so braces in
/// values or in trailing commentary don't move the boundaries. Once an
/// opening brace never closes, everything after it belongs to it and the
/// text is considered malformed (usually a truncated reply).
fn parse_first_object(text: &str) -> Result<Value, ExtractionError> {
    let mut first_error = None;
    let mut position = 0;

    while let Some(offset) = text[position..].find('{') {
        let start = position + offset;

        let Some(length) = balanced_object_length(&text[start..]) else {
            let unterminated = serde_json::from_str::<Value>(&text[start..]);

            return match (first_error, unterminated) {
                (Some(err), _) => Err(ExtractionError::MalformedStructuredData(err)),
                (None, Err(err)) => Err(ExtractionError::MalformedStructuredData(err)),
                (None, Ok(value)) => Ok(value),
            };
        };

        match serde_json::from_str::<Value>(&text[start..start + length]) {
            Ok(value) => return Ok(value),
            Err(err) => {
                debug!("Span at {} is not valid JSON: {}", start, err);
                first_error.get_or_insert(err);
            }
        }

        position = start + length;
    }

    match first_error {
        Some(err) => Err(ExtractionError::MalformedStructuredData(err)),
        None => Err(ExtractionError::NoStructuredDataFound),
    }
}

/// Byte length of the object opening at the start of `text`, if it closes
fn balanced_object_length(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude::model::Segment;

    fn reply_with(text: &str) -> Reply {
        Reply::from_text(text.to_string())
    }

    #[test_log::test]
    fn should_extract_a_report_wrapped_in_prose() {
        let reply = reply_with(
            r#"here is the data: {"updated":"2025-01-01","urgent":[],"live":[],"fc":[],"release":[],"goods":[]}  -- end"#,
        );

        let report = extract_report(&reply).unwrap();

        assert_eq!(
            report,
            UpdateReport {
                updated_date: Some("2025-01-01".to_string()),
                ..Default::default()
            }
        );
    }

    #[test_log::test]
    fn when_there_is_no_brace_should_fail_with_no_structured_data() {
        let result = extract_report(&reply_with("Sorry, I couldn't find anything today."));

        assert!(
            matches!(result, Err(ExtractionError::NoStructuredDataFound)),
            "{:?}",
            result
        );
    }

    #[test_log::test]
    fn when_the_object_is_unterminated_should_fail_as_malformed() {
        let result = extract_report(&reply_with(r#"{"a": 1"#));

        assert!(
            matches!(result, Err(ExtractionError::MalformedStructuredData(_))),
            "{:?}",
            result
        );
    }

    #[test_log::test]
    fn when_a_truncated_reply_has_complete_inner_objects_should_still_fail() {
        let result = extract_report(&reply_with(
            r#"{"live": [{"title": "one"}, {"title": "two"}], "fc": [{"artist": "HA"#,
        ));

        assert!(matches!(
            result,
            Err(ExtractionError::MalformedStructuredData(_))
        ));
    }

    #[test_log::test]
    fn when_the_only_span_is_invalid_json_should_fail_as_malformed() {
        let result = extract_report(&reply_with("The result is {not json at all}."));

        assert!(matches!(
            result,
            Err(ExtractionError::MalformedStructuredData(_))
        ));
    }

    #[test_log::test]
    fn braces_inside_strings_and_trailing_commentary_should_not_break_extraction() {
        let reply = reply_with(
            r#"Result: {"updated": "2025-02-02", "urgent": ["use code {VIP} \"now\" }"]}
            Note: some sites list dates as {TBD}."#,
        );

        let report = extract_report(&reply).unwrap();

        assert_eq!(report.updated_date.as_deref(), Some("2025-02-02"));
        assert_eq!(report.urgent_notices, vec![r#"use code {VIP} "now" }"#.to_string()]);
    }

    #[test_log::test]
    fn the_first_valid_object_should_win_over_later_ones() {
        let reply = reply_with(
            r#"Draft {oops} then {"updated": "first"} and {"updated": "second"}"#,
        );

        let report = extract_report(&reply).unwrap();

        assert_eq!(report.updated_date.as_deref(), Some("first"));
    }

    #[test_log::test]
    fn only_text_segments_should_be_concatenated() {
        let reply = Reply {
            segments: vec![
                Segment::NonText,
                Segment::Text(r#"{"updated": "2025-"#.to_string()),
                Segment::NonText,
                Segment::Text(r#"04-01", "live": [{"title": "x"}]}"#.to_string()),
            ],
            ..Default::default()
        };

        let report = extract_report(&reply).unwrap();

        assert_eq!(report.updated_date.as_deref(), Some("2025-04-01"));
        assert_eq!(report.events.len(), 1);
    }
}
