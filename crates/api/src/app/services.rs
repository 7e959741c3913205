//! Infrastructure wiring for the HTTP app.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use frostmart_infra::{
    AdminReadModel, Dispatcher, FormRelayConfig, FormRelayGateway, JsonFileSubscriptionStore,
    NotificationGateway, RefreshWorker, SubscriptionService, SubscriptionStore,
    TemplatedMailConfig, TemplatedMailGateway, WorkerHandle, admin::REFRESH_INTERVAL,
};

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    /// Admin snapshot poll interval.
    pub refresh_interval: Duration,
    pub relay: FormRelayConfig,
    pub mail: TemplatedMailConfig,
}

impl AppConfig {
    /// Read configuration from environment variables, warning and falling
    /// back to dev defaults where a value is missing.
    pub fn from_env() -> Self {
        let site_url = env_or("FROSTMART_SITE_URL", "https://frostmart.example");
        let sender_name = env_or("FROSTMART_SENDER_NAME", "Frostmart");
        let sender_email = env_or("FROSTMART_SENDER_EMAIL", "hello@frostmart.example");
        let operator_email = env_or("FROSTMART_OPERATOR_EMAIL", "owner@frostmart.example");

        Self {
            bind_addr: env_or("FROSTMART_BIND_ADDR", "0.0.0.0:8080"),
            data_dir: PathBuf::from(env_or("FROSTMART_DATA_DIR", "data")),
            refresh_interval: REFRESH_INTERVAL,
            relay: FormRelayConfig {
                endpoint: env_or("FROSTMART_RELAY_URL", "https://api.web3forms.com/submit"),
                access_key: env_or("FROSTMART_RELAY_ACCESS_KEY", "dev-access-key"),
                sender_name: sender_name.clone(),
                sender_email: sender_email.clone(),
                operator_email: operator_email.clone(),
                site_url: site_url.clone(),
            },
            mail: TemplatedMailConfig {
                endpoint: env_or(
                    "FROSTMART_MAIL_API_URL",
                    "https://api.emailjs.com/api/v1.0/email/send",
                ),
                service_id: env_or("FROSTMART_MAIL_SERVICE_ID", "service_dev"),
                template_id: env_or("FROSTMART_MAIL_TEMPLATE_ID", "template_dev"),
                public_key: env_or("FROSTMART_MAIL_PUBLIC_KEY", "dev-public-key"),
                company_name: sender_name,
                website: site_url,
                operator_email,
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        tracing::warn!("{key} not set; using dev default");
        default.to_string()
    })
}

/// Shared application services, wired once and handed to every handler.
pub struct AppServices {
    pub service: SubscriptionService,
    pub admin: Arc<AdminReadModel>,
    pub relay: Arc<FormRelayGateway>,
    pub templated: Arc<TemplatedMailGateway>,
    // Keeps the refresh thread alive for the lifetime of the app.
    _refresh_worker: WorkerHandle,
}

pub fn build_services(config: AppConfig) -> AppServices {
    let store: Arc<dyn SubscriptionStore> =
        Arc::new(JsonFileSubscriptionStore::in_dir(&config.data_dir));

    let relay = Arc::new(FormRelayGateway::new(config.relay));
    let templated = Arc::new(TemplatedMailGateway::new(config.mail));

    // The default flow dispatches through the primary relay; the templated
    // gateway stays reachable from diagnostics.
    let dispatcher = Dispatcher::new(relay.clone() as Arc<dyn NotificationGateway>);
    let service = SubscriptionService::new(store.clone(), dispatcher);

    let admin = Arc::new(AdminReadModel::new(store));
    let refresh_worker = RefreshWorker::spawn(admin.clone(), config.refresh_interval);

    AppServices {
        service,
        admin,
        relay,
        templated,
        _refresh_worker: refresh_worker,
    }
}
