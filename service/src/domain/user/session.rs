//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Authenticated session of a [`User`], as carried by a [JWT].
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// ID of the [`User`] this [`Session`] belongs to.
    #[serde(rename = "sub")]
    pub user_id: user::Id,

    /// [`user::Role`] of the [`User`] this [`Session`] belongs to.
    #[serde(with = "role")]
    pub role: user::Role,

    /// Indicator whether the [`User`] is a super administrator.
    #[serde(default)]
    pub is_super_admin: bool,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
///
/// Not validated until decoded.
#[derive(AsRef, Clone, Debug, Display, From, FromStr)]
#[as_ref(str)]
pub struct Token(String);

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

mod role {
    //! [`user::Role`] (de)serialization as its string representation.

    use serde::{de::Error as _, Deserialize as _, Deserializer, Serializer};

    use crate::domain::user;

    pub(super) fn serialize<S: Serializer>(
        role: &user::Role,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(role)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<user::Role, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}
