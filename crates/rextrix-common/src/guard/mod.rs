//! Page route guard

mod route_guard;

pub use route_guard::{GuardDecision, RouteGuard};
