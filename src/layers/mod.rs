pub mod marker;
pub mod window;
