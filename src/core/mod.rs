// Core math and geometry shared by the engine and the game

pub mod math;
pub mod rect;

pub use rect::Rect;
