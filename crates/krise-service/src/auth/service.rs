//! Account lifecycle: registration with email confirmation, login with
//! lockout and optional emailed two-factor codes, token refresh, and
//! password reset.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use krise_auth::{
    CaptchaVerifier, EmailTokenKind, EmailTokenService, JwtDecoder, JwtEncoder,
    LoginAttemptTracker, PasswordHasher, PasswordValidator, TokenPair, TwoFactorService,
};
use krise_core::config::AuthConfig;
use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::traits::Mailer;
use krise_entity::stores::UserDirectory;
use krise_entity::user::{NewUser, User, UserRole};

use crate::context::RequestContext;

/// What a successful password check leads to.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted, session established.
    Tokens(TokenPair),
    /// Credentials accepted; a login code was emailed and must be verified
    /// before tokens are issued.
    TwoFactorRequired,
}

/// Authentication and account recovery flows.
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    mailer: Arc<dyn Mailer>,
    hasher: PasswordHasher,
    password_rules: PasswordValidator,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    email_tokens: EmailTokenService,
    two_factor: TwoFactorService,
    attempts: LoginAttemptTracker,
    captcha: CaptchaVerifier,
    frontend_url: String,
}

impl AuthService {
    /// Wires the auth service from configuration.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserDirectory>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            mailer,
            hasher: PasswordHasher::new(),
            password_rules: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            email_tokens: EmailTokenService::new(config),
            two_factor: TwoFactorService::new(config),
            attempts: LoginAttemptTracker::new(config),
            captcha: CaptchaVerifier::new(config.captcha.clone()),
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Registers a new account and emails a confirmation link.
    ///
    /// The account exists immediately but cannot log in until the email is
    /// confirmed. A confirmation-mail delivery failure is logged, not
    /// surfaced; the user can ask for a new link.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        captcha_token: &str,
    ) -> AppResult<User> {
        self.captcha.verify(captcha_token).await?;
        self.password_rules.validate(password)?;

        let email = normalize_email(email);
        if full_name.trim().is_empty() {
            return Err(AppError::validation("Full name must not be empty"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                email,
                password_hash,
                full_name: full_name.trim().to_string(),
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        self.send_confirmation_link(&user).await;
        Ok(user)
    }

    /// Emails a fresh confirmation link to an unconfirmed account.
    ///
    /// Silent when the address is unknown or already confirmed, so the
    /// endpoint cannot be used to probe for accounts.
    pub async fn resend_confirmation(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        if let Some(user) = self.users.find_by_email(&email).await? {
            if !user.email_confirmed {
                self.send_confirmation_link(&user).await;
            }
        }
        Ok(())
    }

    /// Consumes a confirmation token and marks the account confirmed.
    pub async fn confirm_email(&self, token: &str) -> AppResult<()> {
        let user_id = self
            .email_tokens
            .consume(EmailTokenKind::Confirmation, token)
            .await?;
        self.users.confirm_email(user_id).await?;
        info!(user_id = %user_id, "Email confirmed");
        Ok(())
    }

    /// Checks credentials and either issues tokens or starts the emailed
    /// two-factor exchange.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        captcha_token: &str,
    ) -> AppResult<LoginOutcome> {
        self.captcha.verify(captcha_token).await?;

        let email = normalize_email(email);
        self.attempts.check_allowed(&email)?;

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.attempts.record_failure(&email);
                return Err(invalid_credentials());
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            self.attempts.record_failure(&email);
            return Err(invalid_credentials());
        }

        if !user.email_confirmed {
            return Err(AppError::authentication(
                "Confirm your email address before logging in",
            ));
        }

        self.attempts.record_success(&email);

        if user.two_factor_enabled {
            let code = self.two_factor.issue_code(user.id).await;
            self.mailer
                .send(
                    &user.email,
                    "Din innloggingskode",
                    &format!("Innloggingskoden din er {code}. Den er gyldig i ti minutter."),
                )
                .await?;
            info!(user_id = %user.id, "Two-factor code issued");
            return Ok(LoginOutcome::TwoFactorRequired);
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, &user.email, user.role)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome::Tokens(tokens))
    }

    /// Completes a two-factor login by consuming the emailed code.
    pub async fn verify_two_factor(&self, email: &str, code: &str) -> AppResult<TokenPair> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        self.two_factor.verify_code(user.id, code).await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, &user.email, user.role)?;
        info!(user_id = %user.id, "Two-factor login completed");
        Ok(tokens)
    }

    /// Exchanges a valid refresh token for a new token pair.
    ///
    /// The user record is re-read so that a role change or deletion takes
    /// effect at the next refresh instead of at token expiry.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        self.encoder
            .generate_token_pair(user.id, &user.email, user.role)
    }

    /// Emails a password-reset link. Always succeeds so the endpoint cannot
    /// be used to probe which addresses are registered.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(());
        };

        let token = self
            .email_tokens
            .issue(EmailTokenKind::PasswordReset, user.id)
            .await;
        self.mailer
            .send(
                &user.email,
                "Tilbakestill passordet ditt",
                &format!(
                    "Følg lenken for å velge et nytt passord: \
                     {}/reset-password?token={token}",
                    self.frontend_url
                ),
            )
            .await?;
        info!(user_id = %user.id, "Password reset link sent");
        Ok(())
    }

    /// Consumes a reset token and replaces the password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        self.password_rules.validate(new_password)?;
        let user_id = self
            .email_tokens
            .consume(EmailTokenKind::PasswordReset, token)
            .await?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;

        // A successful reset clears any lockout on the account.
        if let Some(user) = self.users.find_by_id(user_id).await? {
            self.attempts.record_success(&user.email);
        }
        info!(user_id = %user_id, "Password reset");
        Ok(())
    }

    /// Turns the emailed two-factor requirement on or off for the caller.
    pub async fn set_two_factor(&self, ctx: &RequestContext, enabled: bool) -> AppResult<()> {
        self.users.set_two_factor(ctx.user_id, enabled).await
    }

    async fn send_confirmation_link(&self, user: &User) {
        let token = self
            .email_tokens
            .issue(EmailTokenKind::Confirmation, user.id)
            .await;
        let body = format!(
            "Velkommen! Bekreft e-postadressen din her: \
             {}/confirm-email?token={token}",
            self.frontend_url
        );
        if let Err(e) = self
            .mailer
            .send(&user.email, "Bekreft e-postadressen din", &body)
            .await
        {
            warn!(user_id = %user.id, error = %e, "Confirmation email failed");
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid email or password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx_for, FakeMailer, FakeUserDirectory};
    use krise_core::error::ErrorKind;

    const PASSWORD: &str = "Korrekt-Hest-Batteri-Stift9";

    struct Fixture {
        service: AuthService,
        users: Arc<FakeUserDirectory>,
        mailer: Arc<FakeMailer>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(FakeUserDirectory::default());
        let mailer = Arc::new(FakeMailer::default());
        let service = AuthService::new(&AuthConfig::default(), users.clone(), mailer.clone());
        Fixture {
            service,
            users,
            mailer,
        }
    }

    /// Pulls the token out of an emailed link.
    fn token_from(body: &str) -> String {
        body.split("token=").nth(1).unwrap().trim().to_string()
    }

    async fn register_and_confirm(f: &Fixture, email: &str) -> User {
        let user = f
            .service
            .register(email, PASSWORD, "Ola Nordmann", "")
            .await
            .unwrap();
        let mails = f.mailer.sent_to(&user.email);
        let token = token_from(&mails.last().unwrap().1);
        f.service.confirm_email(&token).await.unwrap();
        f.users.get(user.id)
    }

    #[tokio::test]
    async fn test_register_sends_confirmation_and_blocks_login_until_confirmed() {
        let f = fixture();
        let user = f
            .service
            .register("Ola@Test.no", PASSWORD, "Ola Nordmann", "")
            .await
            .unwrap();

        assert_eq!(user.email, "ola@test.no");
        assert!(!user.email_confirmed);
        assert_eq!(f.mailer.sent_to("ola@test.no").len(), 1);

        let err = f
            .service
            .login("ola@test.no", PASSWORD, "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let token = token_from(&f.mailer.sent_to("ola@test.no")[0].1);
        f.service.confirm_email(&token).await.unwrap();
        assert!(matches!(
            f.service.login("ola@test.no", PASSWORD, "").await.unwrap(),
            LoginOutcome::Tokens(_)
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let f = fixture();
        let err = f
            .service
            .register("ola@test.no", "Passord1", "Ola", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let f = fixture();
        f.service
            .register("ola@test.no", PASSWORD, "Ola", "")
            .await
            .unwrap();
        let err = f
            .service
            .register("ola@test.no", PASSWORD, "Kari", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_lockout_after_repeated_failures() {
        let f = fixture();
        register_and_confirm(&f, "ola@test.no").await;

        for _ in 0..5 {
            let err = f
                .service
                .login("ola@test.no", "feil-passord", "")
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }

        // Even the correct password is refused while locked out.
        let err = f
            .service
            .login("ola@test.no", PASSWORD, "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimit);
    }

    #[tokio::test]
    async fn test_two_factor_flow() {
        let f = fixture();
        let user = register_and_confirm(&f, "kari@test.no").await;
        f.service
            .set_two_factor(&ctx_for(&user), true)
            .await
            .unwrap();

        let outcome = f.service.login("kari@test.no", PASSWORD, "").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::TwoFactorRequired));

        let mails = f.mailer.sent_to("kari@test.no");
        let code_mail = &mails.last().unwrap().1;
        let code: String = code_mail
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(6)
            .collect();

        let tokens = f
            .service
            .verify_two_factor("kari@test.no", &code)
            .await
            .unwrap();
        assert!(!tokens.access_token.is_empty());

        // The code is single-use.
        assert!(f
            .service
            .verify_two_factor("kari@test.no", &code)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let f = fixture();
        let user = register_and_confirm(&f, "ola@test.no").await;

        f.service
            .request_password_reset("ola@test.no")
            .await
            .unwrap();
        let mails = f.mailer.sent_to("ola@test.no");
        let token = token_from(&mails.last().unwrap().1);

        let new_password = "Nytt-Sterkt-Passord-42";
        f.service
            .reset_password(&token, new_password)
            .await
            .unwrap();

        assert!(matches!(
            f.service
                .login("ola@test.no", new_password, "")
                .await
                .unwrap(),
            LoginOutcome::Tokens(_)
        ));
        assert_ne!(f.users.get(user.id).password_hash, user.password_hash);

        // The reset token is single-use.
        assert!(f
            .service
            .reset_password(&token, "Enda-Et-Passord-77")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_reset_request_for_unknown_email_is_silent() {
        let f = fixture();
        f.service
            .request_password_reset("finnes-ikke@test.no")
            .await
            .unwrap();
        assert!(f.mailer.sent_to("finnes-ikke@test.no").is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reissues_tokens() {
        let f = fixture();
        register_and_confirm(&f, "ola@test.no").await;

        let LoginOutcome::Tokens(pair) =
            f.service.login("ola@test.no", PASSWORD, "").await.unwrap()
        else {
            panic!("expected tokens");
        };

        let refreshed = f.service.refresh(&pair.refresh_token).await.unwrap();
        assert!(!refreshed.access_token.is_empty());

        // An access token is not accepted as a refresh token.
        assert!(f.service.refresh(&pair.access_token).await.is_err());
    }
}
