pub mod origin;
pub mod rate_limit;

pub use origin::{origin_guard_middleware, OriginPolicy};
pub use rate_limit::{rate_limit_middleware, RateLimitState};
pub use reunion_infra::request_id_middleware;
