use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::TokenService;
use tracing::{info, instrument};

use crate::error::{UserError, UserResult};
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, Role, RoleAction, SetRoleRequest, SignupRequest,
    User,
};
use crate::policy::PromotionPolicy;
use crate::repository::UserRepository;

/// Present and not just whitespace
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Service layer for accounts: signup, login and role management
pub struct UserService<R: UserRepository> {
    repository: R,
    tokens: TokenService,
    policy: PromotionPolicy,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, tokens: TokenService, policy: PromotionPolicy) -> Self {
        Self {
            repository,
            tokens,
            policy,
        }
    }

    /// Create an account. The role comes from the promotion policy.
    #[instrument(skip(self, input))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<MessageResponse> {
        let (Some(name), Some(email), Some(password)) = (
            present(input.name),
            present(input.email),
            input.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(UserError::MissingFields);
        };

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let password_hash = hash_password(&password)?;
        let role = self.policy.role_for(&email);
        let user = self
            .repository
            .create(User::new(name, email, password_hash, role))
            .await?;

        info!(user_id = %user.id, %role, "User signed up");
        Ok(MessageResponse::new("Signup successful"))
    }

    /// Check credentials and issue a session token.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<LoginResponse> {
        let (Some(email), Some(password)) = (present(input.email), input.password) else {
            return Err(UserError::InvalidCredentials);
        };

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&password, &user.password_hash)? {
            info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id.to_string(), &user.role.to_string())?;
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            role: user.role,
        })
    }

    /// Grant or revoke admin rights for the account with `email`.
    ///
    /// Already-in-state requests succeed with an explanatory message and
    /// write nothing. Tokens issued before the change keep their old role
    /// until they expire.
    #[instrument(skip(self, input), fields(action = ?input.action))]
    pub async fn set_role(&self, input: SetRoleRequest) -> UserResult<MessageResponse> {
        let email = present(input.email).ok_or(UserError::InvalidRequest)?;
        let action: RoleAction = input
            .action
            .as_deref()
            .and_then(|a| a.parse().ok())
            .ok_or(UserError::InvalidRequest)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::UserNotFound)?;

        let (role, message) = match action {
            RoleAction::Grant if user.is_admin() => {
                return Ok(MessageResponse::new("User is already an admin"));
            }
            RoleAction::Revoke if !user.is_admin() => {
                return Ok(MessageResponse::new("User is not an admin"));
            }
            RoleAction::Grant => (Role::Admin, "Successfully granted admin access"),
            RoleAction::Revoke => (Role::Student, "Successfully revoked admin access"),
        };

        self.repository.update_role(user.id, role).await?;
        info!(user_id = %user.id, %role, "Role updated");
        Ok(MessageResponse::new(message))
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
