use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
