//! Operator commands besides serving the API.

mod dump;
mod test_setup;

pub use dump::dump;
pub use test_setup::{TestSetupReport, test_setup};
