//! Fuzz target for message log merge semantics
//!
//! Exercises arbitrary interleavings of welcome seeding, inbound single
//! and history merges, server-sent welcome duplicates, local appends,
//! and resets.
//!
//! # Invariants
//!
//! - No operation sequence panics
//! - At most one message carries the reserved welcome id
//! - When present, the welcome message sits at index 0 with the system
//!   role
//! - An inbound single merge grows the log by exactly one

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tableside_core::{ChatMessage, LogUpdate, MessageLog, WELCOME_MESSAGE_ID};
use tableside_proto::Role;

#[derive(Debug, Arbitrary)]
enum Op {
    EnsureWelcome,
    InboundMessage(String),
    InboundHistory(Vec<(bool, String)>),
    InboundWelcome(String),
    AddUser(String),
    Reset,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut log = MessageLog::new();

    for op in ops {
        match op {
            Op::EnsureWelcome => {
                log.ensure_welcome();
            },
            Op::InboundMessage(content) => {
                let before = log.len();
                let update = log.import_message(content);
                assert!(log.merge(update));
                assert_eq!(log.len(), before + 1);
            },
            Op::InboundHistory(entries) => {
                let update = log.import_history(entries.into_iter().map(|(system, content)| {
                    (if system { Role::System } else { Role::User }, content)
                }));
                log.merge(update);
            },
            Op::InboundWelcome(content) => {
                let welcome =
                    ChatMessage::new(WELCOME_MESSAGE_ID.to_string(), Role::System, content);
                log.merge(LogUpdate::Single(welcome));
            },
            Op::AddUser(content) => {
                log.add_user_message(&content);
            },
            Op::Reset => log.reset(),
        }

        let welcome_count =
            log.messages().iter().filter(|m| m.id == WELCOME_MESSAGE_ID).count();
        assert!(welcome_count <= 1);
        if welcome_count == 1 {
            assert!(log.messages()[0].is_welcome());
        }
    }
});
