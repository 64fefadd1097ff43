pub mod catalog;
pub mod schemes;
