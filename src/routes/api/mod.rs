mod router;
pub mod todo;

pub use router::router;
