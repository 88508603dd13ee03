use std::sync::Arc;
use crate::domain::ports::{
    SlotRepository, ReservationRepository, NotificationJobRepository, SmsService,
};
use crate::domain::services::clock::Clock;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub clock: Clock,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub job_repo: Arc<dyn NotificationJobRepository>,
    pub sms_service: Arc<dyn SmsService>,
}
