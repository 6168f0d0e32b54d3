use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Role,
}

/// Who is calling. Resolved once from the bearer token and handed to the
/// service operations that need an owner or an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "id", rename_all = "lowercase")]
pub enum ActingAs {
    Student(i32),
    Teacher(i32),
}

impl ActingAs {
    pub fn role(&self) -> Role {
        match self {
            ActingAs::Student(_) => Role::Student,
            ActingAs::Teacher(_) => Role::Teacher,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            ActingAs::Student(id) | ActingAs::Teacher(id) => *id,
        }
    }

    pub fn teacher_id(&self) -> Result<i32> {
        match self {
            ActingAs::Teacher(id) => Ok(*id),
            ActingAs::Student(_) => Err(Error::Forbidden(
                "Not authenticated as a teacher".to_string(),
            )),
        }
    }

    pub fn student_id(&self) -> Result<i32> {
        match self {
            ActingAs::Student(id) => Ok(*id),
            ActingAs::Teacher(_) => Err(Error::Forbidden(
                "Not authenticated as a student".to_string(),
            )),
        }
    }

    fn from_claims(claims: &Claims) -> Result<Self> {
        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| Error::Unauthenticated("Token subject is not a user id".to_string()))?;
        Ok(match claims.role {
            Role::Student => ActingAs::Student(id),
            Role::Teacher => ActingAs::Teacher(id),
        })
    }
}

pub fn issue_token(actor: ActingAs, secret: &str, ttl_minutes: i64) -> Result<String> {
    let exp = (Utc::now() + Duration::minutes(ttl_minutes)).timestamp();
    let claims = Claims {
        sub: actor.id().to_string(),
        exp: exp.max(0) as usize,
        role: actor.role(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> Result<ActingAs> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    ActingAs::from_claims(&data.claims)
}

fn bearer_token(parts: &Parts) -> Result<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthenticated("Not authenticated".to_string()))?;
    let value = header
        .to_str()
        .map_err(|_| Error::Unauthenticated("Malformed authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthenticated("Unsupported authorization scheme".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for ActingAs {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = bearer_token(parts)?;
        let actor = verify_token(token, &state.config.jwt_secret)?;
        tracing::debug!(?actor, "request authenticated");
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_carries_role_and_id() {
        let token = issue_token(ActingAs::Teacher(12), SECRET, 5).unwrap();
        assert_eq!(verify_token(&token, SECRET).unwrap(), ActingAs::Teacher(12));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(ActingAs::Student(3), "other", 5).unwrap();
        assert!(matches!(verify_token(&token, SECRET), Err(Error::Token(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(ActingAs::Student(3), SECRET, -10).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_role_capability_is_forbidden() {
        assert!(matches!(
            ActingAs::Student(1).teacher_id(),
            Err(Error::Forbidden(_))
        ));
        assert_eq!(ActingAs::Teacher(4).teacher_id().unwrap(), 4);
        assert!(ActingAs::Teacher(4).student_id().is_err());
    }
}
