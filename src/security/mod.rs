pub mod ip_guard;

pub use ip_guard::{is_private_host, is_private_ip};
