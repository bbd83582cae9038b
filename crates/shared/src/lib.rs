pub mod chart;
pub mod error;
pub mod gesture;
pub mod index;
pub mod models;
pub mod selection;
pub mod viewer;
pub mod viewport;
