use rand::Rng;
use serde::{Deserialize, Serialize};

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Look up a palette color by name, case-insensitively.
    pub fn named(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

/// Draw a color uniformly from [`PALETTE`].
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    PALETTE[rng.random_range(0..PALETTE.len())].1
}

/// Named web colors, AliceBlue through YellowGreen, used for randomized
/// symbols. Pure black, white, gray and transparent are left out so every
/// pick stands out against a neutral background.
pub const PALETTE: &[(&str, Color)] = &[
    ("AliceBlue", Color::rgb(240, 248, 255)),
    ("AntiqueWhite", Color::rgb(250, 235, 215)),
    ("Aqua", Color::rgb(0, 255, 255)),
    ("Aquamarine", Color::rgb(127, 255, 212)),
    ("Azure", Color::rgb(240, 255, 255)),
    ("Beige", Color::rgb(245, 245, 220)),
    ("Bisque", Color::rgb(255, 228, 196)),
    ("BlanchedAlmond", Color::rgb(255, 235, 205)),
    ("Blue", Color::rgb(0, 0, 255)),
    ("BlueViolet", Color::rgb(138, 43, 226)),
    ("Brown", Color::rgb(165, 42, 42)),
    ("BurlyWood", Color::rgb(222, 184, 135)),
    ("CadetBlue", Color::rgb(95, 158, 160)),
    ("Chartreuse", Color::rgb(127, 255, 0)),
    ("Chocolate", Color::rgb(210, 105, 30)),
    ("Coral", Color::rgb(255, 127, 80)),
    ("CornflowerBlue", Color::rgb(100, 149, 237)),
    ("Cornsilk", Color::rgb(255, 248, 220)),
    ("Crimson", Color::rgb(220, 20, 60)),
    ("Cyan", Color::rgb(0, 255, 255)),
    ("DarkBlue", Color::rgb(0, 0, 139)),
    ("DarkCyan", Color::rgb(0, 139, 139)),
    ("DarkGoldenrod", Color::rgb(184, 134, 11)),
    ("DarkGray", Color::rgb(169, 169, 169)),
    ("DarkGreen", Color::rgb(0, 100, 0)),
    ("DarkKhaki", Color::rgb(189, 183, 107)),
    ("DarkMagenta", Color::rgb(139, 0, 139)),
    ("DarkOliveGreen", Color::rgb(85, 107, 47)),
    ("DarkOrange", Color::rgb(255, 140, 0)),
    ("DarkOrchid", Color::rgb(153, 50, 204)),
    ("DarkRed", Color::rgb(139, 0, 0)),
    ("DarkSalmon", Color::rgb(233, 150, 122)),
    ("DarkSeaGreen", Color::rgb(143, 188, 139)),
    ("DarkSlateBlue", Color::rgb(72, 61, 139)),
    ("DarkSlateGray", Color::rgb(47, 79, 79)),
    ("DarkTurquoise", Color::rgb(0, 206, 209)),
    ("DarkViolet", Color::rgb(148, 0, 211)),
    ("DeepPink", Color::rgb(255, 20, 147)),
    ("DeepSkyBlue", Color::rgb(0, 191, 255)),
    ("DimGray", Color::rgb(105, 105, 105)),
    ("DodgerBlue", Color::rgb(30, 144, 255)),
    ("Firebrick", Color::rgb(178, 34, 34)),
    ("FloralWhite", Color::rgb(255, 250, 240)),
    ("ForestGreen", Color::rgb(34, 139, 34)),
    ("Fuchsia", Color::rgb(255, 0, 255)),
    ("Gainsboro", Color::rgb(220, 220, 220)),
    ("GhostWhite", Color::rgb(248, 248, 255)),
    ("Gold", Color::rgb(255, 215, 0)),
    ("Goldenrod", Color::rgb(218, 165, 32)),
    ("Green", Color::rgb(0, 128, 0)),
    ("GreenYellow", Color::rgb(173, 255, 47)),
    ("Honeydew", Color::rgb(240, 255, 240)),
    ("HotPink", Color::rgb(255, 105, 180)),
    ("IndianRed", Color::rgb(205, 92, 92)),
    ("Indigo", Color::rgb(75, 0, 130)),
    ("Ivory", Color::rgb(255, 255, 240)),
    ("Khaki", Color::rgb(240, 230, 140)),
    ("Lavender", Color::rgb(230, 230, 250)),
    ("LavenderBlush", Color::rgb(255, 240, 245)),
    ("LawnGreen", Color::rgb(124, 252, 0)),
    ("LemonChiffon", Color::rgb(255, 250, 205)),
    ("LightBlue", Color::rgb(173, 216, 230)),
    ("LightCoral", Color::rgb(240, 128, 128)),
    ("LightCyan", Color::rgb(224, 255, 255)),
    ("LightGoldenrodYellow", Color::rgb(250, 250, 210)),
    ("LightGray", Color::rgb(211, 211, 211)),
    ("LightGreen", Color::rgb(144, 238, 144)),
    ("LightPink", Color::rgb(255, 182, 193)),
    ("LightSalmon", Color::rgb(255, 160, 122)),
    ("LightSeaGreen", Color::rgb(32, 178, 170)),
    ("LightSkyBlue", Color::rgb(135, 206, 250)),
    ("LightSlateGray", Color::rgb(119, 136, 153)),
    ("LightSteelBlue", Color::rgb(176, 196, 222)),
    ("LightYellow", Color::rgb(255, 255, 224)),
    ("Lime", Color::rgb(0, 255, 0)),
    ("LimeGreen", Color::rgb(50, 205, 50)),
    ("Linen", Color::rgb(250, 240, 230)),
    ("Magenta", Color::rgb(255, 0, 255)),
    ("Maroon", Color::rgb(128, 0, 0)),
    ("MediumAquamarine", Color::rgb(102, 205, 170)),
    ("MediumBlue", Color::rgb(0, 0, 205)),
    ("MediumOrchid", Color::rgb(186, 85, 211)),
    ("MediumPurple", Color::rgb(147, 112, 219)),
    ("MediumSeaGreen", Color::rgb(60, 179, 113)),
    ("MediumSlateBlue", Color::rgb(123, 104, 238)),
    ("MediumSpringGreen", Color::rgb(0, 250, 154)),
    ("MediumTurquoise", Color::rgb(72, 209, 204)),
    ("MediumVioletRed", Color::rgb(199, 21, 133)),
    ("MidnightBlue", Color::rgb(25, 25, 112)),
    ("MintCream", Color::rgb(245, 255, 250)),
    ("MistyRose", Color::rgb(255, 228, 225)),
    ("Moccasin", Color::rgb(255, 228, 181)),
    ("NavajoWhite", Color::rgb(255, 222, 173)),
    ("Navy", Color::rgb(0, 0, 128)),
    ("OldLace", Color::rgb(253, 245, 230)),
    ("Olive", Color::rgb(128, 128, 0)),
    ("OliveDrab", Color::rgb(107, 142, 35)),
    ("Orange", Color::rgb(255, 165, 0)),
    ("OrangeRed", Color::rgb(255, 69, 0)),
    ("Orchid", Color::rgb(218, 112, 214)),
    ("PaleGoldenrod", Color::rgb(238, 232, 170)),
    ("PaleGreen", Color::rgb(152, 251, 152)),
    ("PaleTurquoise", Color::rgb(175, 238, 238)),
    ("PaleVioletRed", Color::rgb(219, 112, 147)),
    ("PapayaWhip", Color::rgb(255, 239, 213)),
    ("PeachPuff", Color::rgb(255, 218, 185)),
    ("Peru", Color::rgb(205, 133, 63)),
    ("Pink", Color::rgb(255, 192, 203)),
    ("Plum", Color::rgb(221, 160, 221)),
    ("PowderBlue", Color::rgb(176, 224, 230)),
    ("Purple", Color::rgb(128, 0, 128)),
    ("Red", Color::rgb(255, 0, 0)),
    ("RosyBrown", Color::rgb(188, 143, 143)),
    ("RoyalBlue", Color::rgb(65, 105, 225)),
    ("SaddleBrown", Color::rgb(139, 69, 19)),
    ("Salmon", Color::rgb(250, 128, 114)),
    ("SandyBrown", Color::rgb(244, 164, 96)),
    ("SeaGreen", Color::rgb(46, 139, 87)),
    ("SeaShell", Color::rgb(255, 245, 238)),
    ("Sienna", Color::rgb(160, 82, 45)),
    ("Silver", Color::rgb(192, 192, 192)),
    ("SkyBlue", Color::rgb(135, 206, 235)),
    ("SlateBlue", Color::rgb(106, 90, 205)),
    ("SlateGray", Color::rgb(112, 128, 144)),
    ("Snow", Color::rgb(255, 250, 250)),
    ("SpringGreen", Color::rgb(0, 255, 127)),
    ("SteelBlue", Color::rgb(70, 130, 180)),
    ("Tan", Color::rgb(210, 180, 140)),
    ("Teal", Color::rgb(0, 128, 128)),
    ("Thistle", Color::rgb(216, 191, 216)),
    ("Tomato", Color::rgb(255, 99, 71)),
    ("Turquoise", Color::rgb(64, 224, 208)),
    ("Violet", Color::rgb(238, 130, 238)),
    ("Wheat", Color::rgb(245, 222, 179)),
    ("WhiteSmoke", Color::rgb(245, 245, 245)),
    ("Yellow", Color::rgb(255, 255, 0)),
    ("YellowGreen", Color::rgb(154, 205, 50)),
];
