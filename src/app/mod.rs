pub mod play;

pub use play::PlayApp;
