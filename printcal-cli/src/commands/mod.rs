pub mod export;
pub mod note;
pub mod show;
pub mod theme;
