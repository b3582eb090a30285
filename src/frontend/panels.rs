//! Panel components for the frontend UI
//!
//! # Panels
//!
//! - [`ControlsPanel`] - Sidebar with the unit selector, refresh and trend toggle
//! - [`ReadoutCards`] - Current temperature and date/time cards
//! - [`ReadingsTablePanel`] - The rolling history as a two-column table

use crate::config::{LocationConfig, RuntimeSettings};
use crate::frontend::views::{self, TableView};
use crate::frontend::widgets::Card;
use crate::snapshot::Snapshot;
use crate::types::TemperatureUnit;
use egui::{RichText, Ui};

/// Actions the sidebar asks the app to perform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlAction {
    /// "Refresh now" was clicked
    pub refresh: bool,
}

/// Renders the sidebar controls
pub struct ControlsPanel;

impl ControlsPanel {
    /// Render the sidebar and report requested actions
    pub fn render(
        ui: &mut Ui,
        settings: &mut RuntimeSettings,
        location: &LocationConfig,
    ) -> ControlAction {
        let mut action = ControlAction::default();

        ui.heading(views::heading(location));
        ui.label(views::description(location));

        ui.add_space(12.0);
        ui.label(RichText::new("Choose temperature unit:").strong());
        for unit in TemperatureUnit::all() {
            ui.radio_value(&mut settings.unit, *unit, unit.to_string());
        }

        ui.add_space(12.0);
        ui.checkbox(&mut settings.show_trend_line, "Show trend line");

        ui.add_space(12.0);
        if ui
            .button("⟳ Refresh now")
            .on_hover_text("Fetch a new reading without waiting for the timer")
            .clicked()
        {
            action.refresh = true;
        }

        action
    }
}

/// Renders the current temperature and date/time cards
pub struct ReadoutCards;

impl ReadoutCards {
    pub fn render(
        ui: &mut Ui,
        snapshot: &Snapshot,
        unit: TemperatureUnit,
        location: &LocationConfig,
    ) {
        ui.columns(2, |columns| {
            Card::new("Current Temperature")
                .min_height(60.0)
                .show(&mut columns[0], |ui| {
                    ui.label(RichText::new(views::readout(snapshot, unit)).size(32.0).strong());
                    ui.label(views::readout_caption(location));
                });
            Card::new("Current Date and Time")
                .min_height(60.0)
                .show(&mut columns[1], |ui| {
                    ui.label(RichText::new(views::timestamp(snapshot)).size(24.0));
                });
        });
    }
}

/// Renders the readings table
pub struct ReadingsTablePanel;

impl ReadingsTablePanel {
    pub fn render(ui: &mut Ui, view: &TableView) {
        Card::new(views::TABLE_CARD_TITLE).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("readings_table_scroll")
                .max_height(160.0)
                .show(ui, |ui| {
                    egui::Grid::new("readings_grid")
                        .num_columns(2)
                        .striped(true)
                        .min_col_width(120.0)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            ui.strong(&view.header[0]);
                            ui.strong(&view.header[1]);
                            ui.end_row();

                            for row in &view.rows {
                                ui.monospace(&row[0]);
                                ui.monospace(&row[1]);
                                ui.end_row();
                            }
                        });
                });
        });
    }
}
