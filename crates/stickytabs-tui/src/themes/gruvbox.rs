//! Gruvbox Material theme
//! https://github.com/sainnhe/gruvbox-material

use ratatui::style::Color;
use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0xe7, 0x8a, 0x4e), // orange
        hero: Color::Rgb(0x7c, 0x6f, 0x64),
        hero_fg: Color::Rgb(0xfb, 0xf1, 0xc7),
        price: Color::Rgb(0xa9, 0xb6, 0x65), // green
        error: Color::Rgb(0xea, 0x69, 0x62),
        info: Color::Rgb(0x7d, 0xae, 0xa3),
    }
}

pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
        bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
        fg0: Color::Rgb(0x65, 0x47, 0x35),
        fg1: Color::Rgb(0x4f, 0x38, 0x29),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0xc3, 0x5e, 0x0a),
        hero: Color::Rgb(0xa8, 0x99, 0x84),
        hero_fg: Color::Rgb(0xfb, 0xf1, 0xc7),
        price: Color::Rgb(0x6c, 0x78, 0x2e),
        error: Color::Rgb(0xc1, 0x4a, 0x4a),
        info: Color::Rgb(0x45, 0x70, 0x7a),
    }
}
