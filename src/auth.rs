//! Identity and permission collaborators used by terminal handlers.
//!
//! The pipeline itself only extracts the raw [`AccessToken`]; turning it into
//! a [`User`] and deciding what that user may do happens here, behind narrow
//! interfaces.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use http::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::AccessToken;
use crate::error::Error;

/// An authenticated identity.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Turns a raw access token into a [`User`].
///
/// Implementations backed by a remote identity provider should return
/// futures that stop when dropped; a request whose client has gone away is
/// dropped mid-call.
pub trait AccessTokenConverter: Send + Sync + 'static {
    /// # Errors
    ///
    /// Returns an `Unauthenticated` error for tokens that map to no user.
    fn convert(&self, token: &AccessToken) -> impl Future<Output = Result<User, Error>> + Send;
}

/// Converter backed by a fixed token table.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenConverter {
    users: HashMap<String, User>,
}

impl StaticTokenConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: User) -> Self {
        self.users.insert(token.into(), user);
        self
    }
}

impl AccessTokenConverter for StaticTokenConverter {
    async fn convert(&self, token: &AccessToken) -> Result<User, Error> {
        self.users
            .get(token.token())
            .cloned()
            .ok_or_else(|| Error::unauthenticated("Unauthenticated - unknown access token"))
    }
}

/// Decides whether a user may perform an action (method + path).
#[derive(Clone, Debug, Default)]
pub enum Authorizer {
    /// Every authenticated user may do everything.
    #[default]
    PermitAll,
    /// Only the listed emails are allowed.
    AllowList(HashSet<String>),
}

impl Authorizer {
    /// # Errors
    ///
    /// Returns an `Unauthorized` error when the user is not allowed.
    pub fn authorize(&self, user: &User, method: &Method, path: &str) -> Result<(), Error> {
        let allowed = match self {
            Self::PermitAll => true,
            Self::AllowList(emails) => emails.contains(&user.email),
        };
        if !allowed {
            info!(user = %user.email, %method, path, "access denied");
            return Err(Error::unauthorized(format!(
                "user {} is not authorized for {method} {path}",
                user.email
            )));
        }
        debug!(user = %user.email, %method, path, "access granted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TokenType;
    use crate::error::Kind;

    fn otto() -> User {
        User {
            email: "otto.maddox@helpinghandacceptanceco.com".into(),
            first_name: "Otto".into(),
            last_name: "Maddox".into(),
        }
    }

    #[tokio::test]
    async fn static_converter_maps_known_tokens() {
        let conv = StaticTokenConverter::new().with_user("abc123def1", otto());
        let user = conv.convert(&AccessToken::new("abc123def1", TokenType::Bearer)).await.unwrap();
        assert_eq!(user, otto());

        let err = conv.convert(&AccessToken::new("nope", TokenType::Bearer)).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Unauthenticated);
    }

    #[test]
    fn allow_list_denies_strangers() {
        let authz = Authorizer::AllowList(HashSet::from(["someone@else.com".to_owned()]));
        let err = authz.authorize(&otto(), &Method::POST, "/api/v1/movies").unwrap_err();
        assert_eq!(err.kind(), Kind::Unauthorized);

        assert!(Authorizer::PermitAll.authorize(&otto(), &Method::POST, "/api/v1/movies").is_ok());
    }
}
