use anyhow::{anyhow, Context};
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha384;
use time::{Duration, OffsetDateTime};

// Create alias for HMAC-SHA384
type HmacSha384 = Hmac<Sha384>;

/// Add this as a parameter to a handler function to require the user to be logged in.
///
/// Parsed from the `Authorization: Bearer <token>` header, see `app::extractor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Claims {
    id: i64,
    username: String,
    /// Standard JWT `exp` claim.
    exp: i64,
}

fn signing_key(secret: &Secret<String>) -> HmacSha384 {
    HmacSha384::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC-SHA-384 should accept any key length")
}

impl SessionUser {
    /// Sign a token for this user, valid for `ttl`.
    pub fn to_jwt(&self, secret: &Secret<String>, ttl: Duration) -> anyhow::Result<String> {
        Claims {
            id: self.id,
            username: self.username.clone(),
            exp: (OffsetDateTime::now_utc() + ttl).unix_timestamp(),
        }
        .sign_with_key(&signing_key(secret))
        .context("Failed to sign the JWT token")
    }

    /// Attempt to parse `Self` from a bare token, without the scheme prefix.
    pub fn from_jwt(secret: &Secret<String>, token: &str) -> anyhow::Result<Self> {
        let jwt = jwt::Token::<jwt::Header, Claims, _>::parse_unverified(token)
            .context("Failed to parse the JWT token")?;

        let jwt = jwt
            .verify_with_key(&signing_key(secret))
            .context("Invalid JWT signature")?;

        let (_header, claims) = jwt.into();

        if claims.exp < OffsetDateTime::now_utc().unix_timestamp() {
            return Err(anyhow!("Token expired"));
        }

        Ok(Self {
            id: claims.id,
            username: claims.username,
        })
    }
}
