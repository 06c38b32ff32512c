pub mod admins;
pub mod changes;
