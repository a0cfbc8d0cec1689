use crate::core::colour_mapping::gradient::ColourGradient;
use crate::core::colour_mapping::kinds::GradientKind;
use crate::core::data::colour::Colour;

/// Preset stop lists. Stop 0 colours points that never escape.
#[must_use]
pub fn gradient_factory(kind: GradientKind) -> ColourGradient {
    let stops = match kind {
        GradientKind::Classic => vec![
            Colour::new(0, 0, 0),
            Colour::new(25, 7, 26),
            Colour::new(9, 1, 47),
            Colour::new(12, 44, 138),
            Colour::new(57, 125, 209),
            Colour::new(211, 236, 248),
            Colour::new(248, 201, 95),
            Colour::new(204, 128, 0),
            Colour::new(106, 52, 3),
        ],
        GradientKind::Fire => vec![
            Colour::new(0, 0, 0),
            Colour::new(255, 255, 200),
            Colour::new(255, 200, 0),
            Colour::new(220, 60, 0),
            Colour::new(90, 0, 0),
        ],
        GradientKind::BlueWhite => vec![
            Colour::new(0, 0, 0),
            Colour::new(255, 255, 255),
            Colour::new(110, 170, 255),
            Colour::new(0, 30, 120),
        ],
        GradientKind::Grayscale => vec![Colour::new(0, 0, 0), Colour::new(255, 255, 255)],
    };

    ColourGradient::new(stops)
}
