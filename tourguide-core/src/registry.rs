//! In-memory user directory keyed by user name.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::User;

/// Directory of known users.
///
/// Registration never replaces an existing entry: the first user registered
/// under a name wins.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use tourguide_core::{User, UserRegistry};
///
/// let registry = UserRegistry::new();
/// assert!(registry.add_user(Arc::new(User::with_random_id("jon", "000", "jon@tourguide.com"))));
/// assert!(registry.user("jon").is_some());
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<String, Arc<User>>>,
}

impl UserRegistry {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user under its name.
    ///
    /// Returns `false`, leaving the directory untouched, when the name is
    /// already taken.
    pub fn add_user(&self, user: Arc<User>) -> bool {
        let mut users = self.users.write();
        if users.contains_key(user.name()) {
            return false;
        }
        users.insert(user.name().to_owned(), user);
        true
    }

    /// Look up a user by name.
    pub fn user(&self, name: &str) -> Option<Arc<User>> {
        self.users.read().get(name).cloned()
    }

    /// All registered users, ordered by name.
    pub fn all_users(&self) -> Vec<Arc<User>> {
        let mut users: Vec<Arc<User>> = self.users.read().values().cloned().collect();
        users.sort_by(|a, b| a.name().cmp(b.name()));
        users
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether no user is registered.
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
