pub mod dispatch;
pub mod fleet;
pub mod movement;
pub mod selection;

pub use dispatch::Dispatcher;
