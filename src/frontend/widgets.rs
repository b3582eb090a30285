//! Custom widgets for the LiveTemp-RS UI
//!
//! # Widgets
//!
//! - [`StatusIndicator`] - Colored status dot with label (scraped, simulated, waiting)
//! - [`ValueDisplay`] - Formatted value with label and optional unit
//! - [`Card`] - Framed dashboard card with a title

use crate::types::ReadingSource;
use egui::{Color32, Response, RichText, Ui, Widget};

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
    tooltip: Option<String>,
}

impl StatusIndicator {
    /// Create a new status indicator with the given color and label
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            tooltip: None,
        }
    }

    /// Indicator for the origin of a reading
    pub fn for_source(source: ReadingSource) -> Self {
        match source {
            ReadingSource::Scraped => Self::new(Color32::GREEN, "Live"),
            ReadingSource::Simulated => Self::new(Color32::YELLOW, "Simulated"),
        }
    }

    /// Indicator shown before the first snapshot arrives
    pub fn waiting() -> Self {
        Self::new(Color32::GRAY, "Waiting")
    }

    /// Indicator shown once the feed worker has stopped
    pub fn stopped() -> Self {
        Self::new(Color32::RED, "Stopped")
    }

    /// Add a tooltip to the indicator
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.horizontal(|ui| {
            ui.colored_label(self.color, "●");
            ui.label(RichText::new(&self.label).small());
        });

        let response = response.response;

        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip)
        } else {
            response
        }
    }
}

/// A widget for displaying a value with a label and optional unit
pub struct ValueDisplay {
    label: String,
    value: String,
    unit: Option<String>,
    color: Option<Color32>,
}

impl ValueDisplay {
    /// Create a new value display
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: None,
            color: None,
        }
    }

    /// Create a new value display from a numeric value
    pub fn from_f64(label: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(
            label,
            format!("{:.precision$}", value, precision = precision),
        )
    }

    /// Add a unit to the display
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the color of the value
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }
}

impl Widget for ValueDisplay {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{}:", self.label)).small());

            let value_text = if let Some(unit) = self.unit {
                format!("{} {}", self.value, unit)
            } else {
                self.value
            };

            if let Some(color) = self.color {
                ui.colored_label(color, RichText::new(value_text).small());
            } else {
                ui.label(RichText::new(value_text).small().strong());
            }
        })
        .response
    }
}

/// A framed card with a title, used for the dashboard value boxes
pub struct Card {
    title: String,
    min_height: f32,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            min_height: 0.0,
        }
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    /// Show the card and its contents
    pub fn show<R>(self, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_min_height(self.min_height);
                ui.label(RichText::new(&self.title).strong());
                ui.add_space(4.0);
                add_contents(ui)
            })
            .inner
    }
}
