//! Admin credential definitions.

pub mod session;

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display, From};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3;

pub use self::session::Session;

/// Operator-configured admin credentials.
///
/// The marketplace has a single trusted operator: there is no user table,
/// only this credential pair injected via configuration.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`Login`] of the admin.
    pub login: Login,

    /// [`PasswordHash`] of the admin.
    pub password_hash: PasswordHash,
}

/// Role exposed by an authorized [`Session`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The trusted marketplace operator.
    Admin,
}

/// Login of the admin.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Login(String);

impl Login {
    /// Creates a new [`Login`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `login` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(login: impl Into<String>) -> Self {
        Self(login.into())
    }

    /// Creates a new [`Login`] if the given `login` is valid.
    #[must_use]
    pub fn new(login: impl Into<String>) -> Option<Self> {
        let login = login.into();
        Self::check(&login).then_some(Self(login))
    }

    /// Checks whether the given `login` is a valid [`Login`].
    fn check(login: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Login`] invariants:
        /// - Must not contain whitespace or control characters;
        /// - Must be between 3 and 128 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\S{3,128}$").expect("valid regex")
        });

        REGEX.is_match(login.as_ref())
    }
}

impl FromStr for Login {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Login`")
    }
}

/// Password of the admin.
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `password` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() > 1 && password.len() <= 128
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Password hash of the admin.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Creates a new [`PasswordHash`] from the given [`Password`].
    #[must_use]
    pub fn new(password: &Password) -> Self {
        // TODO: Use `argon2` or any other secure hashing algorithm.
        Self(format!("{:032x}", xxh3::xxh3_128(password.0.as_bytes())))
    }
}

#[cfg(test)]
mod spec {
    use super::{Login, Password, PasswordHash};

    #[test]
    fn login_format() {
        assert!(Login::new("admin@auto-immo.ga").is_some());
        assert!(Login::new("admin").is_some());
        assert!(Login::new("ad").is_none());
        assert!(Login::new("has space").is_none());
    }

    #[test]
    fn password_hash_is_deterministic() {
        let password = Password::from("admin");
        assert_eq!(PasswordHash::new(&password), PasswordHash::new(&password));
        assert_ne!(
            PasswordHash::new(&password),
            PasswordHash::new(&Password::from("nimda")),
        );
    }
}
