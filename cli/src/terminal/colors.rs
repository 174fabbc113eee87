use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 95, g: 175, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 175, b: 95 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor { r: 135, g: 215, b: 135 };
pub const PORT: Color = Color::TrueColor { r: 215, g: 175, b: 255 };
pub const PATH: Color = Color::TrueColor { r: 175, g: 215, b: 255 };
