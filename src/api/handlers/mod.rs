pub mod health;
pub use self::health::health;

pub mod status;
pub use self::status::{confirmation_status, password_reset_status};
