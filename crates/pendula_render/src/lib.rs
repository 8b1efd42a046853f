pub mod controls;
pub mod grid;
pub mod plugin;
pub mod project;
pub mod scene;
pub mod surface;
pub mod trajectory;
pub mod ui;
