mod adapter;
mod entry_point;
mod error;
mod name;
mod perform;

pub use adapter::AdapterSpec;
pub use entry_point::EntryPoint;
pub use error::MissingOperation;
pub use name::{InvalidOpName, OpName};
pub use perform::{Construct, Perform};

#[cfg(feature = "macros")]
pub use opcall_macros::adapt;
