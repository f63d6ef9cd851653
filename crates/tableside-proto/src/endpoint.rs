//! Chat endpoint construction.

/// Build the per-session WebSocket URL.
///
/// The backend routes on the trailing slash, so it is always appended:
/// `<base>/ws/chat/<session_id>/`.
pub fn chat_endpoint(base: &str, session_id: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/ws/chat/{session_id}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_session_scoped_path() {
        assert_eq!(
            chat_endpoint("ws://localhost:8000", "abc123"),
            "ws://localhost:8000/ws/chat/abc123/"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        assert_eq!(
            chat_endpoint("ws://localhost:8000/", "abc123"),
            "ws://localhost:8000/ws/chat/abc123/"
        );
    }
}
