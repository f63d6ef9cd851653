//! Fuzz target for inbound frame classification
//!
//! The classifier is the trust boundary for server payloads; arbitrary
//! bytes must never reach the message log unvalidated.
//!
//! # Strategy
//!
//! - Raw bytes: invalid UTF-8, truncated JSON, deeply nested values
//! - Structured near-misses: wrong envelope key, wrong message shape,
//!   history entries with extra fields
//!
//! # Invariants
//!
//! - `classify` never panics, for any input
//! - Output is always one of Message / History / Malformed (total)
//! - A classified History preserves entry count

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tableside_proto::InboundFrame;

#[derive(Debug, Arbitrary)]
enum Input {
    Raw(Vec<u8>),
    Envelope { key: String, value: EnvelopeValue },
}

#[derive(Debug, Arbitrary)]
enum EnvelopeValue {
    Text(String),
    Number(i64),
    Entries(Vec<(String, String, bool)>),
}

fn render(input: &Input) -> String {
    match input {
        Input::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Input::Envelope { key, value } => {
            let value = match value {
                EnvelopeValue::Text(text) => serde_json::to_string(text).unwrap_or_default(),
                EnvelopeValue::Number(n) => n.to_string(),
                EnvelopeValue::Entries(entries) => {
                    let rendered: Vec<String> = entries
                        .iter()
                        .map(|(role, content, extra)| {
                            let mut obj = format!(
                                "{{\"role\":{},\"content\":{}",
                                serde_json::to_string(role).unwrap_or_default(),
                                serde_json::to_string(content).unwrap_or_default(),
                            );
                            if *extra {
                                obj.push_str(",\"id\":7");
                            }
                            obj.push('}');
                            obj
                        })
                        .collect();
                    format!("[{}]", rendered.join(","))
                },
            };
            format!("{{{}:{}}}", serde_json::to_string(key).unwrap_or_default(), value)
        },
    }
}

fuzz_target!(|input: Input| {
    let raw = render(&input);
    match InboundFrame::classify(&raw) {
        InboundFrame::Message(_) | InboundFrame::Malformed(_) => {},
        InboundFrame::History(entries) => {
            if let Input::Envelope { key, value: EnvelopeValue::Entries(expected) } = &input {
                if key == "message" {
                    assert_eq!(entries.len(), expected.len());
                }
            }
        },
    }
});
