pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::{HourBound, HourRangeParams};
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, ConfiguredResolver};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{current_hour, parse_hour_bound, resolve_hour_range};
