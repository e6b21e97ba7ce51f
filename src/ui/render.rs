//! Frame snapshots and how they are drawn.
//!
//! The app hands a [`Frame`] to its renderer once per iteration. Drawing
//! is generic over any monochrome `DrawTarget`, so the same code paints the
//! SSD1306 buffer on target and an in-memory canvas in tests.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use heapless::String;
use smart_leds::RGB8;

use crate::ui::text_entry::Candidate;

/// Horizontal centre of the 128-pixel wide panel.
const CENTER_X: i32 = 64;

/// Height of the coloured heading band.
const BAND_HEIGHT: u32 = 36;

/// Shown instead of the body text when no name is configured.
const NO_NAME_HINT: &str = "Set your name in\nthe settings app!";

/// What the badge shows when no overlay is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen<'a> {
    pub heading: &'a str,
    pub subheading: &'a str,
    /// `None` only for the name screen before a name is set.
    pub text: Option<&'a str>,
    pub color: RGB8,
}

/// State of an open text entry overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub prompt: &'a str,
    pub entered: &'a str,
    pub candidate: Candidate,
}

/// One rendered frame: the app screen plus an optional overlay on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    pub screen: Screen<'a>,
    pub overlay: Option<EntryView<'a>>,
}

/// Monochrome stand-in for an RGB colour: anything but black lights up.
pub fn to_binary(color: RGB8) -> BinaryColor {
    if color.r == 0 && color.g == 0 && color.b == 0 {
        BinaryColor::Off
    } else {
        BinaryColor::On
    }
}

/// Render `frame` into `target`. The target is cleared first.
pub fn draw_frame<D>(target: &mut D, frame: &Frame<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    match &frame.overlay {
        Some(entry) => draw_entry(target, entry),
        None => draw_screen(target, &frame.screen),
    }
}

fn draw_screen<D>(target: &mut D, screen: &Screen<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fg = to_binary(screen.color);
    // Heading and subheading are drawn in black on the coloured band.
    let ink = BinaryColor::Off;

    Rectangle::new(Point::zero(), Size::new(128, BAND_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(fg))
        .draw(target)?;

    Text::with_alignment(
        screen.heading,
        Point::new(CENTER_X, 17),
        MonoTextStyle::new(&FONT_10X20, ink),
        Alignment::Center,
    )
    .draw(target)?;

    Text::with_alignment(
        screen.subheading,
        Point::new(CENTER_X, 31),
        MonoTextStyle::new(&FONT_6X10, ink),
        Alignment::Center,
    )
    .draw(target)?;

    match screen.text {
        Some(text) if !text.is_empty() => {
            Text::with_alignment(
                text,
                Point::new(CENTER_X, 60),
                MonoTextStyle::new(&FONT_10X20, fg),
                Alignment::Center,
            )
            .draw(target)?;
        }
        _ => {
            Text::with_alignment(
                NO_NAME_HINT,
                Point::new(CENTER_X, 44),
                MonoTextStyle::new(&FONT_6X10, fg),
                Alignment::Center,
            )
            .draw(target)?;
        }
    }

    Ok(())
}

fn draw_entry<D>(target: &mut D, entry: &EntryView<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    Text::with_alignment(entry.prompt, Point::new(CENTER_X, 10), small, Alignment::Center)
        .draw(target)?;

    Text::with_alignment(
        entry.entered,
        Point::new(CENTER_X, 36),
        MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
        Alignment::Center,
    )
    .draw(target)?;

    let mut picker: String<8> = String::new();
    let _ = picker.push('[');
    match entry.candidate {
        Candidate::Char(c) => {
            let _ = picker.push(c);
        }
        Candidate::Done => {
            let _ = picker.push_str("OK");
        }
    }
    let _ = picker.push(']');

    Text::with_alignment(picker.as_str(), Point::new(CENTER_X, 58), small, Alignment::Center)
        .draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ORANGE, WHITE};
    use core::convert::Infallible;

    const W: usize = 128;
    const H: usize = 64;

    struct Canvas {
        pixels: [[BinaryColor; W]; H],
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                pixels: [[BinaryColor::On; W]; H],
            }
        }

        fn lit_in_rows(&self, rows: core::ops::Range<usize>) -> usize {
            self.pixels[rows]
                .iter()
                .flat_map(|row| row.iter())
                .filter(|&&p| p == BinaryColor::On)
                .count()
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..W as i32).contains(&point.x) && (0..H as i32).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn screen(text: Option<&str>) -> Screen<'_> {
        Screen {
            heading: "Hello",
            subheading: "my name is",
            text,
            color: WHITE,
        }
    }

    #[test]
    fn black_maps_off_everything_else_on() {
        assert_eq!(to_binary(RGB8 { r: 0, g: 0, b: 0 }), BinaryColor::Off);
        assert_eq!(to_binary(ORANGE), BinaryColor::On);
        assert_eq!(to_binary(RGB8 { r: 0, g: 0, b: 1 }), BinaryColor::On);
    }

    #[test]
    fn band_is_filled_and_heading_cut_out() {
        let mut canvas = Canvas::new();
        let frame = Frame {
            screen: screen(Some("Alice")),
            overlay: None,
        };
        draw_frame(&mut canvas, &frame).unwrap();

        // Band corners are untouched by text.
        assert_eq!(canvas.pixels[0][0], BinaryColor::On);
        assert_eq!(canvas.pixels[35][127], BinaryColor::On);
        // Heading text punches black pixels into the band.
        let band = BAND_HEIGHT as usize;
        assert!(canvas.lit_in_rows(0..band) < W * band);
        // Body text is lit below the band.
        assert!(canvas.lit_in_rows(band..H) > 0);
    }

    #[test]
    fn hint_is_drawn_when_nameless() {
        let mut named = Canvas::new();
        let mut nameless = Canvas::new();
        let named_frame = Frame {
            screen: screen(Some("Al")),
            overlay: None,
        };
        let nameless_frame = Frame {
            screen: screen(None),
            overlay: None,
        };
        draw_frame(&mut named, &named_frame).unwrap();
        draw_frame(&mut nameless, &nameless_frame).unwrap();

        // The hint starts higher up than the body text would.
        assert!(nameless.lit_in_rows(36..43) > 0);
        assert_eq!(named.lit_in_rows(36..43), 0);
    }

    #[test]
    fn overlay_replaces_screen() {
        let mut canvas = Canvas::new();
        let frame = Frame {
            screen: screen(None),
            overlay: Some(EntryView {
                prompt: "What is your name?",
                entered: "AL",
                candidate: Candidate::Done,
            }),
        };
        draw_frame(&mut canvas, &frame).unwrap();

        // No band: the top-left corner stays clear.
        assert_eq!(canvas.pixels[0][0], BinaryColor::Off);
        assert!(canvas.lit_in_rows(0..12) > 0);
        assert!(canvas.lit_in_rows(48..H) > 0);
    }
}
