pub mod admin;
pub mod change;

pub use admin::Admin;
pub use change::Change;
