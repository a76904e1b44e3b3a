use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;

use hourbook_api::{config::ApiConfig, ApiState};
use hourbook_core::dispatch::Mailer;
use hourbook_core::engine::{CancellationEngine, SchedulingEngine};
use hourbook_core::time::SystemClock;
use hourbook_db::stores::{PgAppointmentStore, PgIdentityProvider, PgUserDirectory};
use hourbook_db::{create_pool, schema::initialize_database};
use hourbook_notify::dispatcher::StoreNotifier;
use hourbook_notify::mailer::{DisabledMailer, HttpMailer};
use hourbook_notify::queue::{QueuedMailer, QueuedNotifier};
use hourbook_notify::worker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Delivery backends, decoupled from the request path by the bounded
    // dispatch queue
    let store_notifier = Arc::new(StoreNotifier::new(db_pool.clone()));
    let mail_backend: Arc<dyn Mailer> = match &config.mail_relay_url {
        Some(url) => Arc::new(HttpMailer::new(url.clone())),
        None => Arc::new(DisabledMailer),
    };
    let (dispatch, _worker) = worker::spawn(
        store_notifier,
        mail_backend,
        config.dispatch_queue_capacity,
    );

    // Wire the engines with their collaborators
    let clock = Arc::new(SystemClock);
    let appointments = Arc::new(PgAppointmentStore::new(db_pool.clone()));
    let users = Arc::new(PgUserDirectory::new(db_pool.clone()));
    let identity = Arc::new(PgIdentityProvider::new(db_pool.clone()));
    let notifier = Arc::new(QueuedNotifier::new(dispatch.clone()));
    let mailer = Arc::new(QueuedMailer::new(dispatch));

    let scheduling = SchedulingEngine::new(
        appointments.clone(),
        users.clone(),
        notifier,
        clock.clone(),
    );
    let cancellation = CancellationEngine::new(appointments.clone(), mailer, clock.clone());

    let state = Arc::new(ApiState {
        db_pool,
        clock,
        identity,
        appointments,
        users,
        scheduling,
        cancellation,
    });

    // Start API server
    hourbook_api::start_server(config, state).await?;

    Ok(())
}
