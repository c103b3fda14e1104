mod tny_error;
pub use tny_error::*;
