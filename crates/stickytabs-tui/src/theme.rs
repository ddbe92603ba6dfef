use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub muted: Color,

    // Semantic colors
    pub accent: Color,
    /// Header row background
    pub hero: Color,
    /// Text and icons drawn over the hero
    pub hero_fg: Color,
    pub price: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox::dark()
    }
}

/// RGB components of a color, `None` for indexed and named colors
pub fn rgb_of(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((0xff, 0xff, 0xff)),
        _ => None,
    }
}

/// Mix `over` onto `under` with opacity `alpha` in [0, 1].
///
/// Colors without RGB components switch at half opacity.
pub fn blend(under: Color, over: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (rgb_of(under), rgb_of(over)) {
        (Some((r0, g0, b0)), Some((r1, g1, b1))) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * alpha).round() as u8;
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ if alpha >= 0.5 => over,
        _ => under,
    }
}
