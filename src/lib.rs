pub mod actor;
pub mod clock;
pub mod hook;
pub mod record;
