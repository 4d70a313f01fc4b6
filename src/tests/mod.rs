pub mod common;

mod busy_indicator;
mod expiry_probe;
mod session_and_logout;
