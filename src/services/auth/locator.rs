//! Finds the access token attached to a request.
//!
//! `Authorization: Bearer <jwt>` always wins. The `colllect_oauth2` cookie is
//! only looked at when the request carries no `Authorization` header at all.
use axum::http::{HeaderMap, header};

use super::error::AuthError;

/// Cookie set by the front-end after login.
pub const OAUTH_COOKIE_NAME: &str = "colllect_oauth2";

const BEARER_SCHEME: &str = "bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Header,
    Cookie,
}

/// The raw, untrusted token string and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCredential {
    pub token: String,
    pub source: CredentialSource,
}

pub fn locate(headers: &HeaderMap) -> Result<RawCredential, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|e| AuthError::malformed_with("Authorization header is not valid ASCII", e))?;

        return Ok(RawCredential {
            token: strip_bearer(value)?.to_string(),
            source: CredentialSource::Header,
        });
    }

    if let Some(token) = find_cookie(headers, OAUTH_COOKIE_NAME) {
        return Ok(RawCredential {
            token: token.to_string(),
            source: CredentialSource::Cookie,
        });
    }

    Err(AuthError::MissingCredential)
}

fn strip_bearer(value: &str) -> Result<&str, AuthError> {
    let value = value.trim();

    // "Bearer" followed by at least one whitespace character
    let (scheme, rest) = value
        .split_once(char::is_whitespace)
        .ok_or_else(|| AuthError::malformed("Authorization header must use the Bearer scheme"))?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::malformed(
            "Authorization header must use the Bearer scheme",
        ));
    }

    let token = rest.trim();
    if token.is_empty() {
        return Err(AuthError::malformed("Bearer token is empty"));
    }

    Ok(token)
}

fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn no_header_no_cookie_is_missing() {
        let err = locate(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
    }

    #[test]
    fn unrelated_cookie_is_missing() {
        let map = headers(&[(header::COOKIE, "session=abc; theme=dark")]);
        assert!(matches!(locate(&map), Err(AuthError::MissingCredential)));
    }

    #[test]
    fn bearer_header_is_trimmed() {
        let map = headers(&[(header::AUTHORIZATION, "   Bearer   a.b.c  ")]);
        let raw = locate(&map).unwrap();

        assert_eq!(raw.token, "a.b.c");
        assert_eq!(raw.source, CredentialSource::Header);
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        for value in ["bearer a.b.c", "BEARER a.b.c", "BeArEr\ta.b.c"] {
            let map = headers(&[(header::AUTHORIZATION, value)]);
            assert_eq!(locate(&map).unwrap().token, "a.b.c", "{value}");
        }
    }

    #[test]
    fn header_wins_over_cookie() {
        let map = headers(&[
            (header::COOKIE, "colllect_oauth2=from.the.cookie"),
            (header::AUTHORIZATION, "Bearer from.the.header"),
        ]);
        let raw = locate(&map).unwrap();

        assert_eq!(raw.token, "from.the.header");
        assert_eq!(raw.source, CredentialSource::Header);
    }

    #[test]
    fn non_bearer_header_is_rejected_even_with_cookie() {
        let map = headers(&[
            (header::AUTHORIZATION, "Basic dXNlcjpwYXNz"),
            (header::COOKIE, "colllect_oauth2=x.y.z"),
        ]);
        let err = locate(&map).unwrap_err();

        assert!(matches!(err, AuthError::MalformedToken { .. }));
    }

    #[test]
    fn empty_bearer_is_rejected() {
        let map = headers(&[(header::AUTHORIZATION, "Bearer    ")]);
        assert!(matches!(
            locate(&map),
            Err(AuthError::MalformedToken { .. })
        ));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let map = headers(&[
            (header::COOKIE, "theme=dark"),
            (header::COOKIE, "lang=fr; colllect_oauth2=x.y.z"),
        ]);
        let raw = locate(&map).unwrap();

        assert_eq!(raw.token, "x.y.z");
        assert_eq!(raw.source, CredentialSource::Cookie);
    }
}
