pub mod addic7ed;
pub mod extract;
