use counseling_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    background::start_notification_worker,
    domain::ports::SmsService,
    domain::services::clock::Clock,
    error::AppError,
    infra::repositories::{
        sqlite_slot_repo::SqliteSlotRepo,
        sqlite_reservation_repo::SqliteReservationRepo,
        sqlite_job_repo::SqliteJobRepo,
    },
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::Router;
use async_trait::async_trait;

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Records outbound messages instead of hitting the SMS gateway.
pub struct RecordingSmsService {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl SmsService for RecordingSmsService {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push((phone_number.to_string(), message.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub sent_sms: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            sms_service_url: "http://localhost".to_string(),
            sms_service_token: "token".to_string(),
            admin_api_token: ADMIN_TOKEN.to_string(),
        };

        let sent_sms = Arc::new(Mutex::new(Vec::new()));

        let state = Arc::new(AppState {
            config: config.clone(),
            clock: Clock::system(),
            slot_repo: Arc::new(SqliteSlotRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            sms_service: Arc::new(RecordingSmsService { sent: sent_sms.clone() }),
        });

        let worker_state = state.clone();
        tokio::spawn(async move {
            start_notification_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            sent_sms,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
