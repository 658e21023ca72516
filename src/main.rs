use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use transit_agency::config::environment::EnvironmentConfig;
use transit_agency::routes::create_app;
use transit_agency::services::seed_service::seed_demo_data;
use transit_agency::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Transit Agency - API de flota y viajes");
    info!("=========================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    let app_state = match AppState::open(config.clone()).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error abriendo el almacenamiento en {:?}: {}", config.data_dir, e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };
    info!("✅ Almacenamiento JSON abierto en {:?}", config.data_dir);

    if config.is_development() {
        info!("🧪 Modo desarrollo");
        if config.cors_origins.is_empty() {
            warn!("⚠️ CORS_ORIGINS vacío: se aceptan todos los orígenes");
        }
    }

    if config.seed_demo_data {
        seed_demo_data(&app_state)
            .await
            .map_err(|e| anyhow::anyhow!("Error cargando datos de demostración: {}", e))?;
    }

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{} ({})", addr, config.environment);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🏢 Estaciones:");
    info!("   GET|POST /api/stations");
    info!("   GET|PUT|DELETE /api/stations/:id");
    info!("💺 Modelos de vehículo:");
    info!("   GET|POST /api/vehicle-models");
    info!("   GET  /api/vehicle-models/:id/seats - Mapa de asientos");
    info!("   PUT  /api/vehicle-models/:id/layout - Sustituir esquema");
    info!("   POST /api/vehicle-models/:id/layout/edit - Editar esquema");
    info!("🚗 Vehículos y 👤 conductores (/api/vehicles, /api/drivers):");
    info!("   POST|DELETE /:id/temporary-ownership");
    info!("   PUT  /:id/maintenance, /:id/transfer");
    info!("   GET  /:id/owner, /:id/availability");
    info!("🗺️ Viajes:");
    info!("   GET|POST /api/trips");
    info!("   POST /api/trips/:id/vehicles");
    info!("   PUT  /api/trips/:id/departure, /arrival, /passengers");
    info!("   GET  /api/trips/:id/seats");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de señales: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
