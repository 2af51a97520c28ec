//! Command implementations.

pub mod categorize;
pub mod clarify;
pub mod health;
pub mod motivate;

pub use self::categorize::execute_categorize;
pub use self::clarify::execute_clarify;
pub use self::health::execute_health;
pub use self::motivate::execute_motivate;
