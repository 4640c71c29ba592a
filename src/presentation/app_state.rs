// Application state for HTTP handlers
use crate::application::exchange_rate_service::ExchangeRateService;

#[derive(Clone)]
pub struct AppState {
    pub rate_service: ExchangeRateService,
}
