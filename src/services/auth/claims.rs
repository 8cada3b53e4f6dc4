//! Structural and temporal checks on already-verified claims.
use serde_json::{Map, Value};

use super::error::AuthError;

/// Claims the rest of the pipeline relies on, with their types settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub jti: String,
    pub aud: String,
    pub sub: String,
    pub scopes: Vec<String>,
    pub exp: i64,
}

/// `now` is the unix time captured once for the whole validation.
/// `leeway_seconds` widens every time comparison; zero means exact.
pub fn validate(
    claims: &Map<String, Value>,
    now: i64,
    leeway_seconds: u64,
) -> Result<VerifiedClaims, AuthError> {
    let jti = required_string(claims, "jti")?;
    if jti.trim().is_empty() {
        return Err(AuthError::malformed("The \"jti\" claim must not be empty"));
    }
    let aud = audience(claims)?;
    let sub = required_string(claims, "sub")?;
    let scopes = scopes(claims)?;
    // A fractional `exp` still lives until the end of its second.
    let exp = timestamp(claims, "exp", f64::ceil)?
        .ok_or_else(|| AuthError::malformed("The \"exp\" claim is required"))?;

    let leeway = i64::try_from(leeway_seconds).unwrap_or(i64::MAX);

    if exp.saturating_add(leeway) <= now {
        return Err(AuthError::Expired { exp, now });
    }

    for claim in ["nbf", "iat"] {
        if let Some(at) = timestamp(claims, claim, f64::floor)?
            && at > now.saturating_add(leeway)
        {
            return Err(AuthError::NotYetValid { claim });
        }
    }

    Ok(VerifiedClaims {
        jti,
        aud,
        sub,
        scopes,
        exp,
    })
}

fn required_string(claims: &Map<String, Value>, name: &str) -> Result<String, AuthError> {
    match claims.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AuthError::malformed(format!(
            "The \"{name}\" claim must be a string"
        ))),
        None => Err(AuthError::malformed(format!(
            "The \"{name}\" claim is required"
        ))),
    }
}

// RFC 7519 allows `aud` to be an array; the first entry is the client.
fn audience(claims: &Map<String, Value>) -> Result<String, AuthError> {
    match claims.get("aud") {
        Some(Value::Array(items)) => match items.first() {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(AuthError::malformed(
                "The \"aud\" claim must contain a client identifier",
            )),
        },
        _ => required_string(claims, "aud"),
    }
}

fn scopes(claims: &Map<String, Value>) -> Result<Vec<String>, AuthError> {
    let invalid = || AuthError::malformed("The \"scopes\" claim must be a list of strings");

    match claims.get("scopes") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
        None => Err(AuthError::malformed("The \"scopes\" claim is required")),
    }
}

fn timestamp(
    claims: &Map<String, Value>,
    name: &str,
    round: fn(f64) -> f64,
) -> Result<Option<i64>, AuthError> {
    let out_of_range = || AuthError::malformed(format!("The \"{name}\" claim is out of range"));

    match claims.get(name) {
        None => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            let f = n.as_f64().map(round).ok_or_else(out_of_range)?;
            if !(i64::MIN as f64..i64::MAX as f64).contains(&f) {
                return Err(out_of_range());
            }
            Ok(Some(f as i64))
        }
        Some(_) => Err(AuthError::malformed(format!(
            "The \"{name}\" claim must be a numeric timestamp"
        ))),
    }
}
