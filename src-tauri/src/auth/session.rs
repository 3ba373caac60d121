use tokio::sync::watch;
use tracing::info;

use crate::error::EcoConnectError;

use super::types::User;

/// The in-memory signed-in state, observable through a watch channel.
///
/// Nothing is persisted: restarting the app signs the user out.
pub struct AuthSession {
    tx: watch::Sender<Option<User>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    /// The current user, or an auth error carrying `message`.
    pub fn require_user(&self, message: &str) -> Result<User, EcoConnectError> {
        self.current_user()
            .ok_or_else(|| EcoConnectError::Auth(message.to_string()))
    }

    pub fn set_user(&self, user: User) {
        info!("Auth state: signed in as {}", user.uid);
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if self.tx.send_replace(None).is_some() {
            info!("Auth state: signed out");
        }
    }

    /// Observe auth-state changes. The receiver sees the current state first.
    pub fn watch(&self) -> watch::Receiver<Option<User>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            uid: "u1".to_string(),
            email: "a@b.co".to_string(),
            display_name: Some("Priya".to_string()),
        }
    }

    #[test]
    fn test_set_and_sign_out() {
        let session = AuthSession::new();
        assert!(session.current_user().is_none());
        assert!(session.require_user("sign in").is_err());

        session.set_user(user());
        assert_eq!(session.current_user(), Some(user()));
        assert_eq!(session.require_user("sign in").unwrap().uid, "u1");

        session.sign_out();
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_watch_sees_changes() {
        let session = AuthSession::new();
        let mut rx = session.watch();
        assert!(rx.borrow_and_update().is_none());

        session.set_user(user());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.uid.clone()), Some("u1".to_string()));

        session.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
