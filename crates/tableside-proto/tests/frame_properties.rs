//! Property tests for frame classification.

use proptest::prelude::*;
use tableside_proto::{InboundFrame, OutboundFrame, Role};

proptest! {
    /// Classification is total: arbitrary input never panics and always
    /// yields one of the three variants.
    #[test]
    fn classify_is_total(raw in ".*") {
        let _ = InboundFrame::classify(&raw);
    }

    /// An outbound frame re-parsed as an inbound frame round-trips the
    /// message text (the backend echoes this envelope shape). Empty text
    /// is excluded: the send gate never emits it and the classifier drops
    /// it.
    #[test]
    fn outbound_envelope_roundtrips(text in ".+") {
        let encoded = OutboundFrame::new(text.clone()).encode().unwrap();
        prop_assert_eq!(InboundFrame::classify(&encoded), InboundFrame::Message(text));
    }

    /// Role translation maps exactly one remote role to System.
    #[test]
    fn only_assistant_is_system(role in "[a-z]{0,12}") {
        let expected = if role == "assistant" { Role::System } else { Role::User };
        prop_assert_eq!(Role::from_wire(&role), expected);
    }
}
