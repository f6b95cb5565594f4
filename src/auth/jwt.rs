use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::{Claims, Identity};
use crate::{
    config::{JwtConfig, MAX_TTL_MINUTES},
    state::AppState,
};

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Option<Duration>,
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: cfg
                .ttl_minutes
                .map(|m| Duration::from_secs(m.clamp(1, MAX_TTL_MINUTES) as u64 * 60)),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn sign(&self, who: &Identity) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = self
            .ttl
            .map(|ttl| (now + TimeDuration::seconds(ttl.as_secs() as i64)).unix_timestamp() as usize);
        let claims = Claims {
            sub: who.user_id,
            username: who.username.clone(),
            iat: now.unix_timestamp() as usize,
            exp,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %who.user_id, expires = exp.is_some(), "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        if self.ttl.is_none() {
            validation.validate_exp = false;
            validation.required_spec_claims.clear();
        }
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_keys(secret: &str, issuer: &str, audience: &str, ttl_minutes: Option<i64>) -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes,
        })
    }

    fn someone() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "mluukkai".into(),
        }
    }

    #[test]
    fn sign_and_verify_token() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud", None);
        let who = someone();
        let token = keys.sign(&who).expect("sign");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, who.user_id);
        assert_eq!(claims.username, "mluukkai");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.exp.is_none());
    }

    #[test]
    fn ttl_adds_expiry() {
        let keys = make_keys("dev-secret", "iss", "aud", Some(5));
        let token = keys.sign(&someone()).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        let exp = claims.exp.expect("exp present");
        assert!(exp > claims.iat);
    }

    #[test]
    fn huge_ttl_is_clamped() {
        let keys = make_keys("dev-secret", "iss", "aud", Some(i64::MAX));
        assert_eq!(
            keys.ttl,
            Some(Duration::from_secs(MAX_TTL_MINUTES as u64 * 60))
        );
        let token = keys.sign(&someone()).expect("sign");
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = make_keys("dev-secret", "iss", "aud", Some(5));
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "mluukkai".into(),
            iat: now - 7200,
            exp: Some(now - 3600),
            iss: "iss".into(),
            aud: "aud".into(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn token_without_exp_is_rejected_when_ttl_configured() {
        let unbounded = make_keys("dev-secret", "iss", "aud", None);
        let bounded = make_keys("dev-secret", "iss", "aud", Some(5));
        let token = unbounded.sign(&someone()).expect("sign");
        assert!(unbounded.verify(&token).is_ok());
        assert!(bounded.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_other_secret() {
        let keys = make_keys("secret-a", "iss", "aud", None);
        let other = make_keys("secret-b", "iss", "aud", None);
        let token = keys.sign(&someone()).expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good_keys = make_keys("same-secret", "good-iss", "good-aud", None);
        let bad_keys = make_keys("same-secret", "bad-iss", "bad-aud", None);
        let token = good_keys.sign(&someone()).expect("sign");
        assert!(bad_keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", "iss", "aud", None);
        assert!(keys.verify("not.a.jwt").is_err());
    }
}
