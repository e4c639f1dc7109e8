//! JWT claims model and the request extractor used by every protected route.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, error::ErrorUnauthorized, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the sign-in cookie issued by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Subject, the auth service's user identifier.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Expiry as a Unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decode and validate a JWT produced by the auth service.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }

    /// Issue a signed token for these claims. Exercised by integration tests
    /// and the development sign-in helper.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorUnauthorized("server configuration missing")));
        };

        let result = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => match identity.id() {
                Ok(token) => AuthenticatedUser::from_jwt(&token, &config.secret)
                    .map_err(|_| ErrorUnauthorized("invalid session token")),
                Err(_) => Err(ErrorUnauthorized("missing session token")),
            },
            Err(_) => Err(ErrorUnauthorized("not signed in")),
        };

        ready(result)
    }
}

/// Returns true when the required role is present in the claim set.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}
