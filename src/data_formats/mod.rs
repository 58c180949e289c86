pub mod request;
pub mod response;
pub mod wrapper;

pub use request::*;
pub use response::*;
pub use wrapper::*;
