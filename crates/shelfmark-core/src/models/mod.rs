pub mod book;
pub mod filters;
pub mod genre;
pub mod series;

pub use book::*;
pub use filters::*;
pub use genre::*;
pub use series::*;
