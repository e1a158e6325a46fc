pub mod canvas_init;
pub mod curves;
pub mod generate;
pub mod glyphs;
pub mod noise;
