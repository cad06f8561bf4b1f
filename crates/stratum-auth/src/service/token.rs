//! JWT access-token service
//!
//! Tokens are HS256 JWTs. Only the SHA-256 fingerprint of an issued token
//! is persisted; validation and revocation work against the fingerprint
//! row, never the token itself.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::sync::Cache;
use sea_orm::*;
use uuid::Uuid;

use stratum_common::{StratumError, sha256_hex};
use stratum_persistence::entity::access_token::{self, TokenType};
use stratum_persistence::entity::account;

use crate::model::JwtClaims;

/// JWT decode cache to avoid repeated validation of the same token
static TOKEN_CACHE: LazyLock<Cache<String, JwtClaims>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(300))
        .build()
});

/// Encode a JWT for the given subject.
pub fn encode_jwt(
    sub: &str,
    secret_key: &str,
    expire_seconds: i64,
) -> jsonwebtoken::errors::Result<String> {
    let exp = Utc::now()
        .checked_add_signed(chrono::Duration::seconds(expire_seconds))
        .unwrap_or_else(Utc::now)
        .timestamp();

    let claims = JwtClaims {
        sub: sub.to_string(),
        exp,
    };

    let encoding_key = EncodingKey::from_base64_secret(secret_key)?;
    encode(&Header::default(), &claims, &encoding_key)
}

/// Decode and validate a JWT without caching.
pub fn decode_jwt(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtClaims>> {
    let decoding_key = DecodingKey::from_base64_secret(secret_key)?;
    decode::<JwtClaims>(token, &decoding_key, &Validation::default())
}

/// Decode and validate a JWT with caching.
///
/// Cached entries are trusted only until their `exp`; anything past that
/// is invalidated and re-validated.
pub fn decode_jwt_cached(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtClaims>> {
    if let Some(claims) = TOKEN_CACHE.get(token) {
        if claims.exp > Utc::now().timestamp() {
            return Ok(jsonwebtoken::TokenData {
                header: Header::default(),
                claims,
            });
        }
        TOKEN_CACHE.invalidate(token);
    }

    let result = decode_jwt(token, secret_key)?;
    TOKEN_CACHE.insert(token.to_string(), result.claims.clone());

    Ok(result)
}

/// Invalidate a token from the decode cache.
pub fn invalidate_token(token: &str) {
    TOKEN_CACHE.invalidate(token);
}

/// Clear the entire decode cache.
pub fn clear_token_cache() {
    TOKEN_CACHE.invalidate_all();
}

/// Issue a login token for the account.
///
/// Older user-type tokens of the account are deleted first, so at most one
/// login token exists per account (the database trigger enforces the same
/// invariant). Returns the persisted row and the JWT.
pub async fn issue_user_token(
    db: &DatabaseConnection,
    account: &account::Model,
    secret_key: &str,
    expire_seconds: i64,
) -> anyhow::Result<(access_token::Model, String)> {
    let token = encode_jwt(&account.email, secret_key, expire_seconds)?;
    let expiration = Utc::now() + chrono::Duration::seconds(expire_seconds);

    access_token::Entity::delete_many()
        .filter(access_token::Column::AccountId.eq(account.id))
        .filter(access_token::Column::TokenType.eq(TokenType::User))
        .exec(db)
        .await?;

    let model = access_token::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(None),
        token_type: Set(TokenType::User),
        revoked: Set(false),
        expiration: Set(expiration),
        value: Set(sha256_hex(&token)),
        created_at: Set(Utc::now()),
        last_modified_at: Set(None),
        account_id: Set(account.id),
    }
    .insert(db)
    .await?;

    tracing::debug!(account = %account.email, "login token issued");
    Ok((model, token))
}

/// Issue a named API token for the account.
///
/// The JWT is returned exactly once; afterwards only its fingerprint is
/// known.
pub async fn issue_api_token(
    db: &DatabaseConnection,
    account: &account::Model,
    name: &str,
    expiration: DateTime<Utc>,
    secret_key: &str,
) -> anyhow::Result<(access_token::Model, String)> {
    let expire_seconds = (expiration - Utc::now()).num_seconds();
    if expire_seconds <= 0 {
        return Err(StratumError::InvalidData(
            "token expiration must lie in the future".to_string(),
        )
        .into());
    }
    let token = encode_jwt(&account.email, secret_key, expire_seconds)?;

    let model = access_token::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(Some(name.to_string())),
        token_type: Set(TokenType::Api),
        revoked: Set(false),
        expiration: Set(expiration),
        value: Set(sha256_hex(&token)),
        created_at: Set(Utc::now()),
        last_modified_at: Set(None),
        account_id: Set(account.id),
    }
    .insert(db)
    .await?;

    tracing::info!(account = %account.email, name, "API token issued");
    Ok((model, token))
}

/// Validate a presented JWT against its persisted fingerprint.
///
/// Fails when the fingerprint is unknown, the row is revoked, or the
/// expiration has passed.
pub async fn validate(
    db: &DatabaseConnection,
    token: &str,
) -> anyhow::Result<access_token::Model> {
    let fingerprint = sha256_hex(token);
    let model = access_token::Entity::find()
        .filter(access_token::Column::Value.eq(fingerprint))
        .one(db)
        .await?
        .ok_or_else(|| StratumError::Authentication("unknown token".to_string()))?;

    if model.revoked {
        return Err(StratumError::Authentication("token has been revoked".to_string()).into());
    }
    if model.expiration <= Utc::now() {
        return Err(StratumError::Authentication("token has expired".to_string()).into());
    }
    Ok(model)
}

/// Revoke a token by id.
pub async fn revoke(db: &DatabaseConnection, token_id: Uuid) -> anyhow::Result<()> {
    match access_token::Entity::find_by_id(token_id).one(db).await? {
        Some(model) => {
            let mut model: access_token::ActiveModel = model.into();
            model.revoked = Set(true);
            model.last_modified_at = Set(Some(Utc::now()));
            model.update(db).await?;
            Ok(())
        }
        None => {
            Err(StratumError::not_found(format!("token '{}' not found", token_id)).into())
        }
    }
}

/// List an account's API tokens.
pub async fn list_api_tokens(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> anyhow::Result<Vec<access_token::Model>> {
    let tokens = access_token::Entity::find()
        .filter(access_token::Column::AccountId.eq(account_id))
        .filter(access_token::Column::TokenType.eq(TokenType::Api))
        .order_by_desc(access_token::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(tokens)
}

/// Delete expired token rows. Returns the number of deleted rows.
pub async fn purge_expired(db: &DatabaseConnection) -> anyhow::Result<u64> {
    let result = access_token::Entity::delete_many()
        .filter(access_token::Column::Expiration.lte(Utc::now()))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        tracing::info!(purged = result.rows_affected, "expired tokens purged");
    }
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64 of "stratum-test-secret-key"
    const SECRET: &str = "c3RyYXR1bS10ZXN0LXNlY3JldC1rZXk=";

    #[test]
    fn test_encode_decode_roundtrip() {
        let token = encode_jwt("jane@example.com", SECRET, 3600).unwrap();
        let decoded = decode_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded.claims.sub, "jane@example.com");
        assert!(decoded.claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = encode_jwt("jane@example.com", SECRET, 3600).unwrap();
        // base64 of "another-secret-key-entirely"
        let other = "YW5vdGhlci1zZWNyZXQta2V5LWVudGlyZWx5";
        assert!(decode_jwt(&token, other).is_err());
    }

    #[test]
    fn test_decode_rejects_expired() {
        // Past the default 60s validation leeway
        let token = encode_jwt("jane@example.com", SECRET, -120).unwrap();
        let err = decode_jwt(&token, SECRET).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_cached_decode_returns_same_claims() {
        let token = encode_jwt("cache@example.com", SECRET, 3600).unwrap();
        let first = decode_jwt_cached(&token, SECRET).unwrap();
        let second = decode_jwt_cached(&token, SECRET).unwrap();
        assert_eq!(first.claims.sub, second.claims.sub);
        assert_eq!(first.claims.exp, second.claims.exp);
        invalidate_token(&token);
    }
}
