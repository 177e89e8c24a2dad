use crossterm::style::Color;

pub const COLOR_WHITE: Color = Color::Rgb {
    r: 202,
    g: 211,
    b: 245,
};
pub const COLOR_DIMMED: Color = Color::Rgb {
    r: 110,
    g: 115,
    b: 141,
};
pub const COLOR_TITLE: Color = Color::Rgb {
    r: 245,
    g: 169,
    b: 127,
};
pub const COLOR_AUTHOR: Color = Color::Rgb {
    r: 125,
    g: 196,
    b: 228,
};
pub const COLOR_DATE: Color = Color::Rgb {
    r: 138,
    g: 173,
    b: 244,
};
pub const COLOR_THEMES: Color = Color::Rgb {
    r: 240,
    g: 198,
    b: 198,
};
pub const COLOR_PAGES: Color = Color::Rgb {
    r: 139,
    g: 213,
    b: 202,
};
pub const COLOR_RATING: Color = Color::Rgb {
    r: 198,
    g: 160,
    b: 246,
};
pub const COLOR_NOTICE: Color = Color::Rgb {
    r: 238,
    g: 212,
    b: 159,
};
pub const COLOR_ERROR: Color = Color::Rgb {
    r: 237,
    g: 135,
    b: 150,
};
