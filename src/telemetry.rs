use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

// Вызывается фронтендом один раз при старте процесса; повторные вызовы
// безопасны и ничего не делают
pub fn init(app: &AppConfig) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    info!("Telemetry initialized for {} environment", app.environment);
}
