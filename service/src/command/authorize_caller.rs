//! [`Command`] for authorizing a [`Caller`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    visibility::Caller,
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Caller`] by their [`Session`] token.
#[derive(Clone, Debug, From)]
pub struct AuthorizeCaller {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeCaller> for Service<Db>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Caller;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeCaller,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeCaller { token } = cmd;

        let session = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        drop(
            self.database()
                .execute(Select(By::new(session.user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or_else(|| E::UserNotExists(session.user_id))
                .map_err(tracerr::wrap!())?,
        );

        Ok(session.into())
    }
}

/// Error of [`AuthorizeCaller`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),

    /// [`User`] the [`Session`] belongs to does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::executor::block_on;
    use jsonwebtoken::{EncodingKey, Header};

    use crate::{
        command::Command as _,
        domain::user::{self, session::ExpirationDateTime, Session},
        infra::InMemory,
        test_support::{member, service},
    };

    use super::{AuthorizeCaller, ExecutionError};

    fn token(session: &Session) -> user::session::Token {
        let raw = jsonwebtoken::encode(
            &Header::default(),
            session,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        raw.parse().unwrap()
    }

    fn session(id: user::Id) -> Session {
        Session {
            user_id: id,
            role: user::Role::Doctor,
            is_super_admin: false,
            expires_at: ExpirationDateTime::now() + Duration::from_secs(60),
        }
    }

    #[test]
    fn authorizes_existing_user() {
        let doctor = member("Gregory", "House", user::Role::Doctor, 1);
        let svc = service(InMemory::with([doctor.clone()], []));

        let caller = block_on(svc.execute(AuthorizeCaller {
            token: token(&session(doctor.id)),
        }))
        .unwrap();

        assert_eq!(caller.id, doctor.id);
        assert_eq!(caller.role, user::Role::Doctor);
        assert!(!caller.is_super_admin);
    }

    #[test]
    fn rejects_unknown_user() {
        let svc = service(InMemory::default());

        let err = block_on(svc.execute(AuthorizeCaller {
            token: token(&session(user::Id::new())),
        }))
        .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }

    #[test]
    fn rejects_garbage_token() {
        let svc = service(InMemory::default());

        let err = block_on(svc.execute(AuthorizeCaller {
            token: "not.a.jwt".parse().unwrap(),
        }))
        .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::JsonWebTokenDecodeError(_),
        ));
    }
}
