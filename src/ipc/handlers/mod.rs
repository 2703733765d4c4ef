pub mod chapters;
pub mod core;
pub mod feedback;
pub mod progress;
pub mod remote;
pub mod reports;
pub mod session;
pub mod users;
