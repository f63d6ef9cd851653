//! Property tests for the message log invariant.
//!
//! For any merge sequence after welcome seeding: exactly one entry carries
//! the sentinel welcome id, and it sits at index 0.

use proptest::prelude::*;
use tableside_core::{ChatMessage, LogUpdate, MessageLog, WELCOME_MESSAGE_ID};
use tableside_proto::Role;

/// One step a session can take against its log.
#[derive(Debug, Clone)]
enum Op {
    ReceiveSingle { welcome: bool, content: String },
    ReceiveHistory { with_welcome: bool, contents: Vec<String> },
    AddUser { content: String },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), "[a-z ]{0,16}")
            .prop_map(|(welcome, content)| Op::ReceiveSingle { welcome, content }),
        (any::<bool>(), prop::collection::vec("[a-z ]{0,16}", 0..6))
            .prop_map(|(with_welcome, contents)| Op::ReceiveHistory { with_welcome, contents }),
        "[a-z ]{1,16}".prop_map(|content| Op::AddUser { content }),
    ]
}

fn build_message(id: &str, role: Role, content: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        role,
        content: content.to_string(),
        timestamp: "10:29 AM".to_string(),
    }
}

fn apply(log: &mut MessageLog, op: Op, seq: &mut u64) {
    match op {
        Op::ReceiveSingle { welcome, content } => {
            let message = if welcome {
                build_message(WELCOME_MESSAGE_ID, Role::System, &content)
            } else {
                *seq += 1;
                build_message(&format!("m{seq}"), Role::System, &content)
            };
            log.merge(LogUpdate::Single(message));
        },
        Op::ReceiveHistory { with_welcome, contents } => {
            let mut messages = Vec::new();
            if with_welcome {
                messages.push(build_message(WELCOME_MESSAGE_ID, Role::System, "w"));
            }
            for content in contents {
                *seq += 1;
                messages.push(build_message(&format!("h{seq}"), Role::User, &content));
            }
            log.merge(LogUpdate::History(messages));
        },
        Op::AddUser { content } => {
            let _ = log.add_user_message(&content);
        },
    }
}

proptest! {
    #[test]
    fn welcome_stays_unique_and_pinned(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut log = MessageLog::new();
        log.ensure_welcome();

        let mut seq = 0u64;
        for op in ops {
            apply(&mut log, op, &mut seq);

            let welcome_count = log
                .messages()
                .iter()
                .filter(|m| m.id == WELCOME_MESSAGE_ID)
                .count();
            prop_assert_eq!(welcome_count, 1);
            prop_assert_eq!(log.messages()[0].id.as_str(), WELCOME_MESSAGE_ID);
            prop_assert_eq!(log.messages()[0].role, Role::System);
        }
    }

    #[test]
    fn plain_singles_grow_log_by_one(contents in prop::collection::vec("[a-z]{1,8}", 1..20)) {
        let mut log = MessageLog::new();
        log.ensure_welcome();

        for (i, content) in contents.iter().enumerate() {
            let before: Vec<String> =
                log.messages().iter().map(|m| m.id.clone()).collect();

            log.merge(LogUpdate::Single(build_message(
                &format!("p{i}"),
                Role::System,
                content,
            )));

            prop_assert_eq!(log.len(), before.len() + 1);
            // Prior order preserved.
            let after: Vec<String> =
                log.messages().iter().map(|m| m.id.clone()).collect();
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }
    }
}
