use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub sms_service_url: String,
    pub sms_service_token: String,
    pub admin_api_token: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            sms_service_url: env::var("SMS_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/messages".to_string()),
            sms_service_token: env::var("SMS_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            admin_api_token: env::var("ADMIN_API_TOKEN").expect("ADMIN_API_TOKEN must be set"),
        }
    }
}
