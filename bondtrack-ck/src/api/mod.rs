//! HTTP API handlers for bondtrack-ck

pub mod checkin;
pub mod clients;
pub mod health;
pub mod sse;

pub use checkin::{list_check_ins, list_client_check_ins, submit_check_in};
pub use clients::list_clients;
pub use health::health_routes;
pub use sse::event_stream;
