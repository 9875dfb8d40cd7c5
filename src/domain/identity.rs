//! Authenticated request identity

/// The authenticated principal behind a request.
///
/// Supplied by the identity provider (JWT claims) and passed explicitly into
/// every core operation instead of being read from ambient request state.
/// The core trusts `is_staff` as given.
#[derive(Clone, Debug)]
pub struct RequestIdentity {
    /// Stable user ID (JWT subject)
    pub user_id: String,
    /// Display name used for `guest_name` derivation
    pub username: String,
    /// Staff flag — grants approve/modify/dashboard access
    pub is_staff: bool,
}

impl RequestIdentity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, is_staff: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_staff,
        }
    }
}
