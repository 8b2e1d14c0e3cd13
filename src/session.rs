//! Theme and sign-in state, persisted through a pluggable key-value store.

mod file;
#[cfg(test)]
mod memory;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use self::file::FileStore;
#[cfg(test)]
pub use self::memory::MemoryStore;
use crate::prelude::*;

/// Persistence port of the session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result;

    fn remove(&mut self, key: &str) -> Result;
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Operator,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Operator => write!(f, "operator"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Role,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Session {
    pub theme: Theme,
    pub user: Option<User>,
    pub token: Option<String>,
}

impl Session {
    pub const fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Session state backed by a [`KeyValueStore`].
///
/// Every mutation is written to the store first, and only then applied in memory.
pub struct SessionStore<S> {
    store: S,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    const THEME_KEY: &'static str = "theme";
    const USER_KEY: &'static str = "user";
    const TOKEN_KEY: &'static str = "token";

    #[instrument(skip_all)]
    pub fn load(store: S) -> Result<Self> {
        let theme = match store.get(Self::THEME_KEY)? {
            Some(value) => Self::parse_theme(&value),
            None => Theme::default(),
        };
        let user = match store.get(Self::USER_KEY)? {
            Some(value) => serde_json::from_str(&value)
                .inspect_err(|error| warn!("ignoring the stored user: {error:#}"))
                .ok(),
            None => None,
        };
        let token = store.get(Self::TOKEN_KEY)?.filter(|token| !token.is_empty());
        debug!(%theme, signed_in = token.is_some(), "loaded");
        Ok(Self { store, session: Session { theme, user, token } })
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result {
        self.store.set(Self::THEME_KEY, theme.as_str())?;
        self.session.theme = theme;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.session.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// The token is written last, so a stored token always comes with its user.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn sign_in(&mut self, user: User, token: String) -> Result {
        ensure!(!token.trim().is_empty(), "the token must not be empty");
        self.store.set(Self::USER_KEY, &serde_json::to_string(&user)?)?;
        if let Err(error) = self.store.set(Self::TOKEN_KEY, &token) {
            self.restore_user()?;
            return Err(error);
        }
        self.session.user = Some(user);
        self.session.token = Some(token);
        info!("signed in");
        Ok(())
    }

    /// The token goes first, so a failure midway leaves the session signed out.
    #[instrument(skip_all)]
    pub fn sign_out(&mut self) -> Result {
        self.store.remove(Self::TOKEN_KEY)?;
        self.session.token = None;
        self.store.remove(Self::USER_KEY)?;
        self.session.user = None;
        info!("signed out");
        Ok(())
    }

    /// Put the stored user back to what the session holds.
    fn restore_user(&mut self) -> Result {
        let result = match &self.session.user {
            Some(user) => self.store.set(Self::USER_KEY, &serde_json::to_string(user)?),
            None => self.store.remove(Self::USER_KEY),
        };
        result.context("failed to roll back the stored user")
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }

    fn parse_theme(value: &str) -> Theme {
        match value {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => {
                warn!(value, "ignoring the unknown stored theme");
                Theme::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".to_owned(),
            name: "Amina".to_owned(),
            email: Some("amina@example.com".to_owned()),
            role: Role::Operator,
        }
    }

    #[test]
    fn empty_store_gives_default_session() -> Result {
        let store = SessionStore::load(MemoryStore::default())?;
        assert_eq!(store.session(), &Session::default());
        assert!(!store.session().is_signed_in());
        Ok(())
    }

    #[test]
    fn theme_is_persisted() -> Result {
        let mut store = SessionStore::load(MemoryStore::default())?;
        assert_eq!(store.toggle_theme()?, Theme::Dark);

        let store = SessionStore::load(store.into_store())?;
        assert_eq!(store.session().theme, Theme::Dark);
        Ok(())
    }

    #[test]
    fn sign_in_and_out_ok() -> Result {
        let mut store = SessionStore::load(MemoryStore::default())?;
        store.sign_in(user(), "token-1".to_owned())?;
        assert_eq!(store.token(), Some("token-1"));

        let mut store = SessionStore::load(store.into_store())?;
        assert_eq!(store.session().user, Some(user()));
        assert!(store.session().is_signed_in());

        store.sign_out()?;
        let store = SessionStore::load(store.into_store())?;
        assert_eq!(store.session().user, None);
        assert_eq!(store.token(), None);
        Ok(())
    }

    #[test]
    fn empty_token_is_refused() -> Result {
        let mut store = SessionStore::load(MemoryStore::default())?;
        assert!(store.sign_in(user(), " ".to_owned()).is_err());
        assert!(!store.session().is_signed_in());
        Ok(())
    }

    #[test]
    fn corrupted_values_are_ignored() -> Result {
        let mut backing = MemoryStore::default();
        backing.set("theme", "sepia")?;
        backing.set("user", "{not json")?;
        let store = SessionStore::load(backing)?;
        assert_eq!(store.session().theme, Theme::Light);
        assert_eq!(store.session().user, None);
        Ok(())
    }

    /// Store that refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result {
            bail!("cannot write `{key}`")
        }

        fn remove(&mut self, key: &str) -> Result {
            bail!("cannot remove `{key}`")
        }
    }

    /// Memory store that fails on one key.
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: &'static str,
    }

    impl FlakyStore {
        fn signed_in(failing_key: &'static str) -> Result<Self> {
            let mut inner = MemoryStore::default();
            inner.set("user", &serde_json::to_string(&user())?)?;
            inner.set("token", "token-1")?;
            Ok(Self { inner, failing_key })
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result {
            ensure!(key != self.failing_key, "cannot write `{key}`");
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result {
            ensure!(key != self.failing_key, "cannot remove `{key}`");
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_token_write_rolls_back_user() -> Result {
        let backing = FlakyStore { inner: MemoryStore::default(), failing_key: "token" };
        let mut store = SessionStore::load(backing)?;
        assert!(store.sign_in(user(), "token-1".to_owned()).is_err());
        assert_eq!(store.session(), &Session::default());

        let store = SessionStore::load(store.into_store())?;
        assert_eq!(store.session().user, None);
        assert_eq!(store.token(), None);
        Ok(())
    }

    #[test]
    fn failed_user_removal_still_signs_out() -> Result {
        let mut store = SessionStore::load(FlakyStore::signed_in("user")?)?;
        assert!(store.session().is_signed_in());
        assert!(store.sign_out().is_err());
        assert!(!store.session().is_signed_in());

        let store = SessionStore::load(store.into_store())?;
        assert_eq!(store.token(), None);
        assert!(!store.session().is_signed_in());
        Ok(())
    }

    #[test]
    fn failed_write_leaves_state_untouched() -> Result {
        let mut store = SessionStore::load(ReadOnlyStore)?;
        assert!(store.set_theme(Theme::Dark).is_err());
        assert_eq!(store.session().theme, Theme::Light);
        assert!(store.sign_in(user(), "token".to_owned()).is_err());
        assert!(!store.session().is_signed_in());
        Ok(())
    }
}
