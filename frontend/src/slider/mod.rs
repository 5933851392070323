//! Project-theme hero slider.

pub mod animator;
pub mod autoplay;
pub mod controller;
pub mod hero;
pub mod machine;
pub mod slides;

pub use hero::HeroSlider;
pub use slides::SlideSet;
