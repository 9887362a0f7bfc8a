//! Controller de autenticación

use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::dto::response::ApiResponse;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AuthService::new(state.pool.clone(), state.config.clone()),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;

        let response = self.service.register(request).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Account created successfully".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;

        let response = self.service.login(request).await?;

        Ok(ApiResponse::success(response))
    }

    pub async fn me(&self, user_id: Uuid) -> AppResult<UserResponse> {
        self.service.me(user_id).await
    }
}
