pub mod csrf;
pub mod in_flight;
pub mod middleware;
pub mod session;
pub mod validate;
