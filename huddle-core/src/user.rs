//! The fixed user roster and the per-session acting user.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{HuddleError, HuddleResult};

pub type UserId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Avatar image URL
    pub avatar: String,
}

impl User {
    fn demo(id: &str, name: &str, background: &str) -> Self {
        User {
            id: id.to_string(),
            name: name.to_string(),
            avatar: format!(
                "https://ui-avatars.com/api/?name={}&background={}&color=fff",
                name.replace(' ', "+"),
                background
            ),
        }
    }
}

/// The set of known users. Not created or destroyed at runtime.
#[derive(Debug, Clone)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    pub fn new(users: Vec<User>) -> HuddleResult<Self> {
        if users.is_empty() {
            return Err(HuddleError::Validation(
                "A roster needs at least one user".into(),
            ));
        }
        Ok(Roster { users })
    }

    /// The built-in demo roster. The first user ("You") is the default profile.
    pub fn demo() -> Self {
        Roster {
            users: vec![
                User::demo("user1", "You", "6366f1"),
                User::demo("user2", "Alex Smith", "22c55e"),
                User::demo("user3", "Jamie Lee", "ef4444"),
                User::demo("user4", "Taylor Kim", "f59e0b"),
                User::demo("user5", "Jordan Patel", "8b5cf6"),
            ],
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn default_user(&self) -> &User {
        &self.users[0]
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a user, falling back to the default profile for unknown ids.
    pub fn get_or_default(&self, id: &str) -> &User {
        self.get(id).unwrap_or_else(|| self.default_user())
    }

    /// Start a session acting as `user_id`, which must be on the roster.
    pub fn session<Tz: TimeZone>(&self, user_id: &str, tz: Tz) -> HuddleResult<Session<Tz>> {
        match self.get(user_id) {
            Some(user) => Ok(Session::new(user.id.clone(), tz)),
            None => {
                let known: Vec<_> = self.users.iter().map(|u| u.id.as_str()).collect();
                Err(HuddleError::Validation(format!(
                    "Unknown user '{}'. Available: {}",
                    user_id,
                    known.join(", ")
                )))
            }
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::demo()
    }
}

/// Who is acting, and in which time zone their calendar days are counted.
///
/// Passed explicitly into operations that need an acting user or need to
/// read wall-clock dates.
#[derive(Debug, Clone)]
pub struct Session<Tz: TimeZone = Local> {
    pub user: UserId,
    pub tz: Tz,
}

impl<Tz: TimeZone> Session<Tz> {
    pub fn new(user: impl Into<UserId>, tz: Tz) -> Self {
        Session {
            user: user.into(),
            tz,
        }
    }
}

impl Session<Local> {
    pub fn local(user: impl Into<UserId>) -> Self {
        Session::new(user, Local)
    }
}
