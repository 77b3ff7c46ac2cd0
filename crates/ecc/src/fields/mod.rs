pub mod fp;
pub mod params;

pub use fp::Fp;
pub use params::{FieldParams, GroupParams};
