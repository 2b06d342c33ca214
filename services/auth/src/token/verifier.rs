//! Access credential verification.

use crate::token::claims::AccessClaims;
use crate::token::TokenError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

/// Decode and validate a presented access credential.
///
/// Checks the HS512 signature and the expiry with zero leeway, and requires
/// the claims to be present and well-typed (`sub` must be numeric).
///
/// # Errors
///
/// - [`TokenError::Expired`] when the expiry instant has passed
/// - [`TokenError::InvalidSignature`] on a signature mismatch
/// - [`TokenError::Malformed`] for anything unparseable or mistyped
pub fn decode_access(token: &str, signing_secret: &SecretString) -> Result<AccessClaims, TokenError> {
    let key = DecodingKey::from_secret(signing_secret.expose_secret().as_bytes());

    let mut validation = Validation::new(Algorithm::HS512);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation.validate_aud = false;

    let data = decode::<AccessClaims>(token, &key, &validation).map_err(|err| {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn secret() -> SecretString {
        SecretString::from("verifier-test-secret".to_string())
    }

    fn sign(claims: &serde_json::Value, key: &SecretString) -> String {
        encode(
            &Header::new(Algorithm::HS512),
            claims,
            &EncodingKey::from_secret(key.expose_secret().as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_decodes() {
        let exp = chrono::Utc::now().timestamp() + 899;
        let token = sign(
            &serde_json::json!({"sub": 42, "ip": "10.0.0.1", "exp": exp}),
            &secret(),
        );
        let claims = decode_access(&token, &secret()).unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn test_expired_token_rejected_without_leeway() {
        // One second past expiry must already fail.
        let exp = chrono::Utc::now().timestamp() - 1;
        let token = sign(
            &serde_json::json!({"sub": 42, "ip": "10.0.0.1", "exp": exp}),
            &secret(),
        );
        assert!(matches!(
            decode_access(&token, &secret()),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let exp = chrono::Utc::now().timestamp() + 900;
        let token = sign(
            &serde_json::json!({"sub": 42, "ip": "10.0.0.1", "exp": exp}),
            &secret(),
        );
        let other = SecretString::from("a-different-secret".to_string());
        assert!(matches!(
            decode_access(&token, &other),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let exp = chrono::Utc::now().timestamp() + 900;
        let token = sign(
            &serde_json::json!({"sub": 42, "ip": "10.0.0.1", "exp": exp}),
            &secret(),
        );
        // Flip a byte inside the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(decode_access(&tampered, &secret()).is_err());
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let exp = chrono::Utc::now().timestamp() + 900;
        let token = sign(
            &serde_json::json!({"sub": "not-a-number", "ip": "10.0.0.1", "exp": exp}),
            &secret(),
        );
        assert!(matches!(
            decode_access(&token, &secret()),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            decode_access("definitely.not.a-jwt", &secret()),
            Err(TokenError::Malformed(_))
        ));
    }
}
