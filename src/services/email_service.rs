//! Reenvío de formularios por email
//!
//! Proxy de un solo disparo hacia el endpoint transaccional de Web3Forms:
//! recibe un payload clave/valor arbitrario, le agrega la API key que vive
//! en el servidor y reporta éxito o fallo de forma síncrona. Sin reintentos
//! ni cola.

use std::collections::HashMap;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

pub struct EmailService {
    client: reqwest::Client,
    endpoint: String,
    access_key: Option<String>,
}

impl EmailService {
    pub fn new(client: reqwest::Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            endpoint: config.web3forms_endpoint.clone(),
            access_key: config.web3forms_api_key.clone(),
        }
    }

    /// Reenviar los campos del formulario tal cual llegan. Los valores null
    /// se descartan; el resto se serializa a string.
    pub async fn forward_form(
        &self,
        fields: HashMap<String, serde_json::Value>,
    ) -> AppResult<serde_json::Value> {
        let access_key = self.access_key.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("Email service not configured".to_string())
        })?;

        let mut form: HashMap<String, String> = HashMap::new();
        form.insert("access_key".to_string(), access_key.clone());

        for (key, value) in fields {
            match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => {
                    form.insert(key, s);
                }
                other => {
                    form.insert(key, other.to_string());
                }
            }
        }

        log::info!("📧 Reenviando formulario a {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Email request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Web3Forms respondió {}: {}", status, body);
            return Err(AppError::ExternalApi(format!(
                "Failed to send email: {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid email API response: {}", e)))?;

        log::info!("✅ Email enviado correctamente");

        Ok(body)
    }
}
