pub mod app;
pub mod input;
pub mod model;
pub mod view;

pub use app::{run, Action, AppState};
