//! Named colours

/// One pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale by `level / 255`
    pub fn dimmed(self, level: u8) -> Self {
        let scale = |c: u8| ((c as u16 * level as u16) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Palette used by the game screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    #[default]
    Off,
    Red,
    Blue,
    Green,
    Purple,
    Yellow,
}

impl Color {
    pub const fn rgb(self) -> Rgb {
        match self {
            Color::Off => Rgb::OFF,
            Color::Red => Rgb::new(255, 0, 0),
            Color::Blue => Rgb::new(0, 0, 255),
            Color::Green => Rgb::new(0, 255, 0),
            Color::Purple => Rgb::new(160, 0, 255),
            Color::Yellow => Rgb::new(255, 150, 0),
        }
    }
}
