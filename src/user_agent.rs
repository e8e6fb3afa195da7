//! Shared User-Agent string for page and asset requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/bandcamp-dl";

/// Default User-Agent for every request issued by the tool.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("bandcamp-dl/{version} (+{PROJECT_UA_URL})")
}
