//! Network debug host selection.
//!
//! The remote debugger connects back to the editor on `network/debug_host`.
//! Which addresses make sense depends on the machine the editor currently
//! runs on, so the value is recomputed at every startup from the local
//! interface list instead of trusting whatever was saved last time.

use std::net::IpAddr;

/// Setting key holding the debug host address.
pub const DEBUG_HOST_KEY: &str = "network/debug_host";

/// Result of [`choose_debug_host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugHostChoice {
    /// Address to store in [`DEBUG_HOST_KEY`]; empty when no candidate exists.
    pub value: String,
    /// Comma-separated candidate list for the enum hint.
    pub candidates: String,
}

/// Chooses the debug host from `addresses`.
///
/// Loopback addresses are excluded.  The previously stored `current` value is
/// kept when it is still among the candidates.  A stale value (an address
/// this machine no longer has) is replaced by the first candidate instead of
/// being cleared, so the debugger keeps a reachable address after the
/// network changes.  The empty string is stored only when there is no
/// candidate at all.
pub fn choose_debug_host(current: &str, addresses: &[IpAddr]) -> DebugHostChoice {
    let candidates: Vec<String> = addresses
        .iter()
        .filter(|ip| !ip.is_loopback())
        .map(IpAddr::to_string)
        .collect();

    let value = if candidates.iter().any(|c| c == current) {
        current.to_string()
    } else {
        candidates.first().cloned().unwrap_or_default()
    };

    DebugHostChoice {
        value,
        candidates: candidates.join(","),
    }
}
