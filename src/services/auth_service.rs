//! Servicio de autenticación
//!
//! Registro y login con bcrypt + JWT. El rol del usuario se lee de la fila
//! al autenticar y viaja como claim en el token; en ningún punto se
//! compara un email literal para decidir permisos.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::middleware::auth::generate_jwt_token;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthService {
    users: UserRepository,
    config: EnvironmentConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            config,
        }
    }

    /// Registrar un usuario nuevo. Siempre entra como customer; los admins
    /// se provisionan fuera de banda.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<LoginResponse> {
        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .users
            .create(
                request.email.to_lowercase(),
                password_hash,
                request.full_name,
                UserRole::Customer,
            )
            .await?;

        log::info!("👤 Usuario registrado: {}", user.id);

        let token = generate_jwt_token(&user, &self.config)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(&request.email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        log::info!("🔑 Login de {} con rol {}", user.id, user.role.as_str());

        let token = generate_jwt_token(&user, &self.config)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn me(&self, user_id: uuid::Uuid) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
