/// Signed in user context that is handed to the wishlist components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    pub fn new(user_id: &str) -> Self {
        Identity {
            user_id: String::from(user_id),
        }
    }
}

/// Authentication state changes delivered to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
}
