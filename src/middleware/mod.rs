pub mod recover;

pub use recover::Recover;
