//! Session cookie plumbing.

use actix_web::cookie::{Cookie, SameSite, time::Duration};

use inkwell_core::ports::TokenService;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwt";

/// How the session cookie is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// `Secure` + `SameSite=None`; set in production only.
    pub secure: bool,
    pub max_age_seconds: i64,
}

impl SessionConfig {
    /// Cookies live exactly as long as the tokens they carry.
    pub fn for_tokens(tokens: &dyn TokenService, secure: bool) -> Self {
        Self {
            secure,
            max_age_seconds: tokens.expiration_seconds(),
        }
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(if self.secure {
                SameSite::None
            } else {
                SameSite::Lax
            })
            .finish()
    }

    /// Cookie holding `token` for the token's lifetime.
    pub fn issue_cookie(&self, token: &str) -> Cookie<'static> {
        let mut cookie = self.base(token.to_owned());
        cookie.set_max_age(Duration::seconds(self.max_age_seconds));
        cookie
    }

    /// Expired, empty cookie that makes the client drop the session.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        cookie
    }
}
