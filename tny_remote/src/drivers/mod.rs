mod driver;
pub use driver::*;

mod driver_config;
pub use driver_config::*;
