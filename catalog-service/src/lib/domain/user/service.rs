use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::validation::validate_user;
use crate::domain::user::validation::DUPLICATE_EMAIL_MESSAGE;
use crate::domain::validator::Validator;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let mut v = Validator::new();

        let role = match command.role.as_deref() {
            None | Some("") => Role::default(),
            Some(name) => name.parse::<Role>().unwrap_or_else(|_| {
                v.add_error("role", "must be one of admin, client, customer");
                Role::default()
            }),
        };

        let password = Password::set(&self.password_hasher, command.password)?;

        let user = NewUser {
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            address: command.address,
            password,
            role,
        };

        validate_user(&mut v, &user);
        if !v.is_valid() {
            return Err(UserError::Validation(v.into_errors()));
        }

        match self.repository.create(user).await {
            Ok(created) => {
                tracing::info!(user_id = %created.id, role = ?created.role, "User registered");
                Ok(created)
            }
            Err(UserError::DuplicateEmail(_)) => {
                v.add_error("email", DUPLICATE_EMAIL_MESSAGE);
                Err(UserError::Validation(v.into_errors()))
            }
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
