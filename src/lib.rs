pub mod app;
pub mod assistant;
pub mod board;
pub mod event;
pub mod session;
pub mod theme;
