use crate::config::DisplayParameters;
use crate::models::forecast::Forecast;
use crate::models::frame::{Color, Font, Frame, Label};

/// Degree Fahrenheit sign
const TEMP_UNIT: char = '\u{2109}';

const RADIATION_ICON: char = '\u{f7ba}';

/// Top left corner of the radiation icon, before left pull is applied
const RADIATION_LOCATION: (i32, i32) = (75, 6);

/// Reference text for line height so that baselines line up whether or not
/// the text has ascenders or descenders
const LINE_HEIGHT_TEXT: &str = "Ay";

const SMALL_FONT_SIZE: u32 = 12;

/// Screen quadrants, numbered as in math class
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    fn is_right(&self) -> bool {
        matches!(self, Quadrant::TopRight | Quadrant::BottomRight)
    }

    fn is_bottom(&self) -> bool {
        matches!(self, Quadrant::BottomLeft | Quadrant::BottomRight)
    }
}

/// Text measurement as provided by the font rendering service
pub trait TextMetrics {
    /// Returns width and height in pixels of the text set in the given font
    fn measure(&self, text: &str, font: Font, size: u32) -> (u32, u32);
}

/// Estimates text size from a fixed cell per character. Good enough for the
/// digits and single glyphs that make up the screen.
pub struct CellMetrics;

impl TextMetrics for CellMetrics {
    fn measure(&self, text: &str, font: Font, size: u32) -> (u32, u32) {
        let chars = text.chars().count() as u32;
        let width = match font {
            Font::Text => chars * size * 3 / 5,
            Font::Icon => chars * size,
        };

        (width, size * 6 / 5)
    }
}

/// Lays out a forecast on the screen:
/// high temp top right, UV index top left, sky icon bottom left and low temp bottom right.
pub struct Layout<'a> {
    display: &'a DisplayParameters,
    metrics: &'a dyn TextMetrics,
    debug: bool,
}

impl<'a> Layout<'a> {
    /// Returns a new Layout
    ///
    /// # Arguments
    ///
    /// * 'display' - display parameters
    /// * 'metrics' - text measurement service
    /// * 'debug' - whether to add the debug overlay
    pub fn new(display: &'a DisplayParameters, metrics: &'a dyn TextMetrics, debug: bool) -> Self {
        Self { display, metrics, debug }
    }

    /// Builds the frame for a forecast
    ///
    /// # Arguments
    ///
    /// * 'forecast' - the forecast to show
    pub fn render(&self, forecast: &Forecast) -> Frame {
        let size = self.display.font_size;
        let mut labels = vec![
            self.place(format!("{}{}", forecast.high_temp, TEMP_UNIT), Font::Text, Quadrant::TopRight),
            self.place(forecast.uv_index.to_string(), Font::Text, Quadrant::TopLeft),
            self.place(forecast.sky_icon().to_string(), Font::Icon, Quadrant::BottomLeft),
            self.place(format!("{}{}", forecast.low_temp, TEMP_UNIT), Font::Text, Quadrant::BottomRight),
        ];

        if forecast.is_uv_warning() {
            labels.push(Label {
                x: RADIATION_LOCATION.0 - self.display.left_pull,
                y: RADIATION_LOCATION.1,
                text: RADIATION_ICON.to_string(),
                font: Font::Icon,
                size,
                color: Color::Yellow,
            });
        }

        if forecast.precipitation_is_likely() {
            if let Some(p) = forecast.current_precip_probability {
                let (icon_x, icon_y) = (labels[2].x, labels[2].y);
                let (icon_w, _) = self.metrics.measure(&labels[2].text, Font::Icon, size);
                labels.push(Label {
                    x: icon_x + icon_w as i32 + 2,
                    y: icon_y,
                    text: format!("{}%", (p * 100.0).round() as i32),
                    font: Font::Text,
                    size: SMALL_FONT_SIZE,
                    color: Color::Black,
                });
            }
        }

        if self.debug {
            let text = format!("{} {}", forecast.source, forecast.fetched_at.format("%m-%d %H:%M"));
            let (_, h) = self.metrics.measure(&text, Font::Text, SMALL_FONT_SIZE);
            labels.push(Label {
                x: 0,
                y: self.display.height as i32 - h as i32,
                text,
                font: Font::Text,
                size: SMALL_FONT_SIZE,
                color: Color::Red,
            });
        }

        Frame {
            width: self.display.width,
            height: self.display.height,
            border: self.display.border,
            labels,
        }
    }

    /// Centers text in a quadrant, left quadrants are pulled towards the left edge
    ///
    /// # Arguments
    ///
    /// * 'text' - text to place
    /// * 'font' - font to set it in
    /// * 'quadrant' - where to place it
    fn place(&self, text: String, font: Font, quadrant: Quadrant) -> Label {
        let size = self.display.font_size;
        let half_w = (self.display.width / 2) as i32;
        let half_h = (self.display.height / 2) as i32;

        let (_, font_height) = self.metrics.measure(LINE_HEIGHT_TEXT, font, size);
        let (text_w, _) = self.metrics.measure(&text, font, size);

        let mut x = (half_w - text_w as i32).max(0) / 2;
        if quadrant.is_right() {
            x += half_w;
        } else {
            x -= self.display.left_pull;
        }

        let mut y = (half_h - font_height as i32).max(0) / 2;
        if quadrant.is_bottom() {
            y += half_h;
        }

        Label { x, y, text, font, size, color: Color::Black }
    }
}
