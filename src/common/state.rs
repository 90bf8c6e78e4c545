// Application state shared across all modules

use std::sync::Arc;

use crate::common::config::ServerConfig;
use crate::requests::RequestValidators;
use crate::validation::{ServiceProvider, ValidatorControl};

/// Application state: the frozen container and what was resolved from it
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub services: Arc<ServiceProvider>,
    pub validator_control: Arc<ValidatorControl>,
    pub validators: RequestValidators,
}
