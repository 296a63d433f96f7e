//! JWT encoding and decoding with HS256 over the server secret.

use crate::claims::Claims;
use crate::error::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Sign claims into a compact JWT.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if serialization fails.
pub fn encode_token(claims: &Claims, secret: &[u8]) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret);
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &key).map_err(|e| AuthError::InvalidToken(format!("encoding failed: {e}")))
}

/// Decode and validate a session token.
///
/// Verifies the HS256 signature and the expiry. Validation is pure:
/// no I/O, no state — the same token in the same time window always
/// produces the same result.
///
/// # Errors
///
/// - `AuthError::Expired` — `exp` is in the past.
/// - `AuthError::InvalidSignature` — signature mismatch.
/// - `AuthError::InvalidToken` — malformed token or claims.
pub fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256];
    // The token TTL is authoritative; no clock-skew allowance.
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::InvalidToken("unsupported algorithm".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::InvalidToken(format!("missing claim: {claim}"))
        }
        _ => AuthError::InvalidToken(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storefront_core::{Role, StoreId};

    const SECRET: &[u8] = b"test-signing-secret";
    const WRONG_SECRET: &[u8] = b"a-different-secret";

    #[test]
    fn roundtrip_preserves_claims() {
        let store = StoreId::new();
        let original = Claims::new("alice", Some(store), Role::Manager, 3600);

        let token = encode_token(&original, SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.store_id(), Some(store));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new("alice", None, Role::Admin, 3600);
        claims.exp = Utc::now().timestamp() - 30;

        let token = encode_token(&claims, SECRET).unwrap();
        let err = decode_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let claims = Claims::new("alice", None, Role::Admin, 3600);
        let token = encode_token(&claims, SECRET).unwrap();

        let err = decode_token(&token, WRONG_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn malformed_token_is_invalid() {
        let err = decode_token("not.a.token", SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let claims = Claims::new("alice", Some(StoreId::new()), Role::Manager, 3600);
        let token = encode_token(&claims, SECRET).unwrap();

        // Swap the payload segment for a different (validly encoded) one.
        let other = Claims::new("mallory", Some(StoreId::new()), Role::Manager, 3600);
        let other_token = encode_token(&other, SECRET).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other_token.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        let err = decode_token(&forged, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn decoding_twice_yields_identical_identity() {
        let claims = Claims::new("alice", Some(StoreId::new()), Role::Manager, 3600);
        let token = encode_token(&claims, SECRET).unwrap();

        let first = decode_token(&token, SECRET).unwrap().identity();
        let second = decode_token(&token, SECRET).unwrap().identity();
        assert_eq!(first, second);
    }
}
