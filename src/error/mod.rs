mod app_error;

pub use app_error::AppError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;
