use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use dotenvy::dotenv;

use towing_dispatch::config::EnvironmentConfig;
use towing_dispatch::database::create_pool;
use towing_dispatch::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use towing_dispatch::routes;
use towing_dispatch::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Towing Dispatch - Portal API");
    info!("================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    info!("✅ Base de datos conectada");

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.is_development() || config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/auth", routes::auth_routes::create_auth_router(state.clone()))
        .nest("/api/ride", routes::ride_routes::create_ride_router(state.clone()))
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .nest("/api/contact", routes::contact_routes::create_contact_router())
        .nest("/api/admin", routes::admin_routes::create_admin_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registro de usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Rides:");
    info!("   POST /api/ride - Reservar grúa");
    info!("   GET  /api/ride/active - Ride activo del usuario");
    info!("   GET  /api/ride/:id - Obtener ride");
    info!("   GET  /api/ride/:id/stream - Seguimiento en vivo (SSE)");
    info!("🚛 Conductores:");
    info!("   POST /api/driver - Postularse como conductor");
    info!("📧 Contacto:");
    info!("   POST /api/contact/send - Reenviar formulario por email");
    info!("🛡️ Admin:");
    info!("   GET    /api/admin/stats - Contadores del dashboard");
    info!("   GET    /api/admin/rides - Listar rides");
    info!("   PATCH  /api/admin/rides/:id/status - Cambiar estado de ride");
    info!("   DELETE /api/admin/rides/:id - Eliminar ride");
    info!("   GET    /api/admin/drivers - Listar solicitudes");
    info!("   GET    /api/admin/drivers/:id - Obtener solicitud");
    info!("   PATCH  /api/admin/drivers/:id/status - Estado de solicitud");
    info!("   PATCH  /api/admin/drivers/:id/payment - Estado de pago");
    info!("   DELETE /api/admin/drivers/:id - Eliminar solicitud");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "towing-dispatch",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
