pub mod course;
pub mod time;


pub use course::*;
pub use time::*;
