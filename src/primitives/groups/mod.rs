/// RFC 5114 MODP group (2048-bit, 256-bit order).
pub mod rfc5114;

pub use rfc5114::{rfc5114_generator, rfc5114_group};
