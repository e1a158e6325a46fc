pub mod background;
pub mod font;
