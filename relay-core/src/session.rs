//! Dialogflow session naming.

use crate::types::Platform;

/// Builds the backend session id `{platform_tag}-{native_user_id}`.
///
/// The same user on two platforms gets two independent sessions; tags never contain `-`,
/// so the prefix up to the first `-` always identifies the platform.
pub fn derive_session_id(platform: Platform, native_user_id: i64) -> String {
    format!("{}-{}", platform.tag(), native_user_id)
}
