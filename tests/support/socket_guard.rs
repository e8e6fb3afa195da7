//! Skips wiremock-backed tests on hosts that cannot bind a localhost socket.
//!
//! Shared by the integration tests and the library's unit tests.

use std::net::TcpListener;

use wiremock::MockServer;

/// Set to `1`/`true`/`yes` to fail instead of skipping.
const REQUIRE_SOCKETS_ENV_VAR: &str = "BDL_REQUIRE_SOCKET_TESTS";

fn loopback_bindable() -> bool {
    TcpListener::bind(("127.0.0.1", 0)).is_ok()
}

fn sockets_required() -> bool {
    std::env::var(REQUIRE_SOCKETS_ENV_VAR)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Starts a mock server, or returns `None` when sockets are unavailable.
///
/// # Panics
///
/// Panics instead of skipping when `BDL_REQUIRE_SOCKET_TESTS` is set.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if loopback_bindable() {
        return Some(MockServer::start().await);
    }

    assert!(
        !sockets_required(),
        "cannot bind a localhost socket and {REQUIRE_SOCKETS_ENV_VAR} is set"
    );
    eprintln!(
        "skipping wiremock test: cannot bind a localhost socket (set {REQUIRE_SOCKETS_ENV_VAR}=1 to fail instead)"
    );
    None
}
