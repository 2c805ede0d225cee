//! RPE calculator application and persistent user settings.

use dirs_next as dirs;
use eframe::{App, Frame, NativeOptions, egui};
use rfd::FileDialog;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Local;
use log::info;

mod calculator;
use calculator::{Calculator, InputChange};
mod date_format;
use date_format::format_saved_at;
mod estimation;
use estimation::{ALL_ESTIMATION_MODES, EstimationMode, Estimator};
mod export;
use export::{save_history_csv, save_history_json};
mod history;
use history::{FILTER_ALL, FileStorage, HistoryEntry, HistoryError, HistoryStore, LiftFilter};
mod i18n;
use i18n::{ALL_LOCALES, Dictionary, Locale};
mod input;
use input::{
    CalculationInput, LIFT_CATEGORIES, MAX_REPS, MAX_RPE, MAX_WEIGHT, MIN_REPS, MIN_RPE, RPE_STEP,
    snap_rpe,
};

const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Table columns of the history view, as dictionary keys.
const HISTORY_COLUMNS: [&str; 7] = [
    "history.date",
    "history.liftType",
    "history.weight",
    "history.reps",
    "history.rpe",
    "history.oneRepMax",
    "history.actions",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

const ALL_THEMES: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];

impl Theme {
    fn label_key(self) -> &'static str {
        match self {
            Theme::System => "theme.system",
            Theme::Light => "theme.light",
            Theme::Dark => "theme.dark",
        }
    }
}

/// Language guessed from `LANG`, used until the user picks one.
fn system_locale() -> Locale {
    std::env::var("LANG")
        .map(|tag| Locale::from_tag(&tag))
        .unwrap_or_default()
}

/// Persistent user preferences and the last calculator inputs.
///
/// Stored as JSON in the config directory. Every field falls back to its
/// default when missing so older files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
struct Settings {
    locale: Locale,
    estimation_mode: EstimationMode,
    theme: Theme,
    lift_type: String,
    history_filter: LiftFilter,
    weight: f64,
    reps: u32,
    rpe: f64,
}

impl Settings {
    const FILE: &'static str = "rpe_calculator_settings.json";

    fn path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join(Self::FILE))
    }

    fn load() -> Self {
        if let Some(path) = Self::path() {
            if let Ok(data) = std::fs::read_to_string(&path) {
                if let Ok(cfg) = serde_json::from_str(&data) {
                    return cfg;
                }
            }
        }
        Self {
            locale: system_locale(),
            ..Self::default()
        }
    }

    fn save(&self) {
        if let Some(path) = Self::path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(data) = serde_json::to_string_pretty(self) {
                let _ = std::fs::write(path, data);
            }
        }
    }

    /// Last inputs, pulled back into the ranges the widgets can show.
    fn input(&self) -> CalculationInput {
        let defaults = CalculationInput::default();
        let weight = if self.weight > 0.0 && self.weight <= MAX_WEIGHT {
            self.weight
        } else {
            defaults.weight
        };
        let lift_type = if self.lift_type.trim().is_empty() {
            defaults.lift_type
        } else {
            self.lift_type.clone()
        };
        CalculationInput::new(
            weight,
            self.reps.clamp(MIN_REPS, MAX_REPS),
            snap_rpe(self.rpe),
            lift_type,
        )
    }

    fn remember_input(&mut self, input: &CalculationInput) {
        self.weight = input.weight;
        self.reps = input.reps;
        self.rpe = input.rpe;
        self.lift_type = input.lift_type.clone();
    }
}

impl Default for Settings {
    fn default() -> Self {
        let input = CalculationInput::default();
        Self {
            locale: Locale::default(),
            estimation_mode: EstimationMode::default(),
            theme: Theme::default(),
            lift_type: input.lift_type,
            history_filter: LiftFilter::All,
            weight: input.weight,
            reps: input.reps,
            rpe: input.rpe,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Short-lived message shown in the corner, e.g. after a refused save.
#[derive(Debug)]
struct Notice {
    key: &'static str,
    start: Instant,
}

struct RpeApp {
    settings: Settings,
    calculator: Calculator,
    history: HistoryStore<FileStorage>,
    notice: Option<Notice>,
    settings_dirty: bool,
}

impl Default for RpeApp {
    fn default() -> Self {
        let settings = Settings::load();
        let calculator = Calculator::new(
            Estimator::new(settings.estimation_mode),
            settings.input(),
        );
        let history = HistoryStore::load(FileStorage::default_location());
        info!("Using history file {}", history.storage().path().display());
        Self {
            settings,
            calculator,
            history,
            notice: None,
            settings_dirty: false,
        }
    }
}

impl RpeApp {
    fn dictionary(&self) -> Dictionary {
        Dictionary::new(self.settings.locale)
    }

    fn show_notice(&mut self, key: &'static str) {
        self.notice = Some(Notice {
            key,
            start: Instant::now(),
        });
    }

    fn on_input(&mut self, change: InputChange) {
        self.calculator.apply(change);
        self.settings.remember_input(self.calculator.input());
        self.settings_dirty = true;
    }

    fn set_mode(&mut self, mode: EstimationMode) {
        self.calculator.set_mode(mode);
        self.settings.estimation_mode = mode;
        self.settings_dirty = true;
    }

    fn save_current(&mut self) {
        match self.calculator.save(&mut self.history, Local::now()) {
            Ok(_) => self.show_notice("notice.saved"),
            Err(HistoryError::Rejected(_)) => self.show_notice("notice.invalid"),
            Err(e) => {
                log::error!("Saving calculation failed: {e}");
                self.show_notice("notice.persistFailed");
            }
        }
    }

    fn delete_entry(&mut self, id: &str) {
        if let Err(e) = self.history.remove_by_id(id) {
            log::error!("Deleting history entry {id} failed: {e}");
            self.show_notice("notice.persistFailed");
        }
    }

    fn clear_history(&mut self) {
        match self.history.clear() {
            Ok(()) => info!("History cleared"),
            Err(e) => {
                log::error!("Clearing history failed: {e}");
                self.show_notice("notice.persistFailed");
            }
        }
    }

    fn filtered_history(&self) -> Vec<&HistoryEntry> {
        self.history.filter(&self.settings.history_filter)
    }

    fn export_history(&mut self, format: ExportFormat) {
        let ext = format.extension();
        if let Some(path) = FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(format!("rpe_history.{ext}"))
            .save_file()
        {
            self.export_history_to(&path, format);
        }
    }

    fn export_history_to(&mut self, path: &Path, format: ExportFormat) {
        let entries = self.filtered_history();
        let count = entries.len();
        let result = match format {
            ExportFormat::Csv => save_history_csv(path, &entries).map_err(|e| e.to_string()),
            ExportFormat::Json => save_history_json(path, &entries).map_err(|e| e.to_string()),
        };
        match result {
            Ok(()) => {
                info!("Exported {count} history entries to {}", path.display());
                self.show_notice("notice.exported");
            }
            Err(e) => {
                log::error!("Failed to export history: {e}");
                self.show_notice("notice.exportFailed");
            }
        }
    }

    fn apply_theme(&self, ctx: &egui::Context, frame: &Frame) {
        match self.settings.theme {
            Theme::Light => ctx.set_visuals(egui::Visuals::light()),
            Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
            Theme::System => {
                if let Some(theme) = frame.info().system_theme {
                    ctx.set_visuals(theme.egui_visuals());
                }
            }
        }
    }

    fn top_bar_ui(&mut self, ui: &mut egui::Ui, dict: Dictionary) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(dict.get("menu.file"), |ui| {
                if ui.button(dict.get("menu.exportCsv")).clicked() {
                    self.export_history(ExportFormat::Csv);
                    ui.close_menu();
                }
                if ui.button(dict.get("menu.exportJson")).clicked() {
                    self.export_history(ExportFormat::Json);
                    ui.close_menu();
                }
            });
            ui.separator();

            ui.label(dict.get("language"));
            let prev_locale = self.settings.locale;
            egui::ComboBox::from_id_source("language_combo")
                .selected_text(self.settings.locale.native_name())
                .show_ui(ui, |ui| {
                    for locale in ALL_LOCALES {
                        ui.selectable_value(
                            &mut self.settings.locale,
                            locale,
                            locale.native_name(),
                        );
                    }
                });
            if prev_locale != self.settings.locale {
                info!("Switched language to {}", self.settings.locale.tag());
                self.settings_dirty = true;
            }

            ui.label(dict.get("theme"));
            let prev_theme = self.settings.theme;
            egui::ComboBox::from_id_source("theme_combo")
                .selected_text(dict.get(self.settings.theme.label_key()))
                .show_ui(ui, |ui| {
                    for theme in ALL_THEMES {
                        ui.selectable_value(
                            &mut self.settings.theme,
                            theme,
                            dict.get(theme.label_key()),
                        );
                    }
                });
            if prev_theme != self.settings.theme {
                self.settings_dirty = true;
            }
        });
    }

    fn calculator_ui(&mut self, ui: &mut egui::Ui, dict: Dictionary) {
        ui.heading(dict.get("calculator.title"));
        ui.label(dict.get("calculator.description"));
        ui.add_space(8.0);

        let input = self.calculator.input().clone();
        let current_mode = self.calculator.mode();
        let mut mode = current_mode;
        let mut changes = Vec::new();

        egui::Grid::new("calculator_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(dict.get("calculator.liftType"));
                let mut lift = input.lift_type.clone();
                egui::ComboBox::from_id_source("lift_type_combo")
                    .selected_text(lift.clone())
                    .show_ui(ui, |ui| {
                        for l in LIFT_CATEGORIES {
                            ui.selectable_value(&mut lift, l.to_string(), l);
                        }
                    });
                if lift != input.lift_type {
                    changes.push(InputChange::LiftType(lift));
                }
                ui.end_row();

                ui.label(dict.get("calculator.weight"));
                let mut weight = input.weight;
                if ui
                    .add(
                        egui::DragValue::new(&mut weight)
                            .speed(0.5)
                            .clamp_range(0.0..=MAX_WEIGHT),
                    )
                    .changed()
                {
                    changes.push(InputChange::Weight(weight));
                }
                ui.end_row();

                ui.label(dict.get("calculator.repetitions"));
                let mut reps = input.reps;
                egui::ComboBox::from_id_source("reps_combo")
                    .selected_text(reps.to_string())
                    .show_ui(ui, |ui| {
                        for r in MIN_REPS..=MAX_REPS {
                            ui.selectable_value(&mut reps, r, r.to_string());
                        }
                    })
                    .response
                    .on_hover_text(dict.get("calculator.selectReps"));
                if reps != input.reps {
                    changes.push(InputChange::Reps(reps));
                }
                ui.end_row();

                ui.label(dict.get("calculator.rpe"));
                let mut rpe = input.rpe;
                if ui
                    .add(egui::Slider::new(&mut rpe, MIN_RPE..=MAX_RPE).step_by(RPE_STEP))
                    .changed()
                {
                    changes.push(InputChange::Rpe(rpe));
                }
                ui.end_row();

                ui.label(dict.get("calculator.mode"));
                egui::ComboBox::from_id_source("estimation_mode_combo")
                    .selected_text(dict.get(mode.label_key()))
                    .show_ui(ui, |ui| {
                        for m in ALL_ESTIMATION_MODES {
                            ui.selectable_value(&mut mode, m, dict.get(m.label_key()));
                        }
                    })
                    .response
                    .on_hover_text(dict.get("calculator.modeHint"));
                ui.end_row();
            });

        for change in changes {
            self.on_input(change);
        }
        if mode != current_mode {
            self.set_mode(mode);
        }

        ui.add_space(8.0);
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.label(dict.get("calculator.estimatedOneRepMax"));
                ui.label(
                    egui::RichText::new(self.calculator.estimate().to_string())
                        .size(36.0)
                        .strong(),
                );
            });
        });

        if self.calculator.mode() == EstimationMode::Ensemble {
            egui::CollapsingHeader::new(dict.get("calculator.breakdown"))
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("breakdown_grid").striped(true).show(ui, |ui| {
                        for (name, value) in self.calculator.breakdown().values() {
                            ui.label(name);
                            ui.label(format!("{value:.2}"));
                            ui.end_row();
                        }
                    });
                });
        }

        ui.add_space(8.0);
        let save = egui::Button::new(dict.get("calculator.saveToHistory"));
        if ui.add_sized([ui.available_width(), 28.0], save).clicked() {
            self.save_current();
        }
    }

    fn history_ui(&mut self, ui: &mut egui::Ui, dict: Dictionary) {
        let mut clear = false;
        ui.horizontal(|ui| {
            ui.heading(dict.get("history.title"));
            if ui.button(dict.get("history.clear")).clicked() {
                clear = true;
            }
        });
        if clear {
            self.clear_history();
        }

        ui.horizontal(|ui| {
            ui.label(dict.get("history.liftType"));
            let prev = self.settings.history_filter.clone();
            let selected = match &self.settings.history_filter {
                LiftFilter::All => dict.get("filterAll").to_string(),
                LiftFilter::Lift(lift) => lift.clone(),
            };
            egui::ComboBox::from_id_source("history_filter_combo")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.settings.history_filter,
                        LiftFilter::from(FILTER_ALL),
                        dict.get("filterAll"),
                    );
                    for lift in LIFT_CATEGORIES {
                        ui.selectable_value(
                            &mut self.settings.history_filter,
                            LiftFilter::from(lift),
                            lift,
                        );
                    }
                });
            if prev != self.settings.history_filter {
                self.settings_dirty = true;
            }
        });

        let locale = dict.locale();
        let rows: Vec<HistoryEntry> = self.filtered_history().into_iter().cloned().collect();
        let mut delete: Option<String> = None;
        let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;

        egui_extras::TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(egui_extras::Column::auto().at_least(48.0), 6)
            .column(egui_extras::Column::remainder())
            .header(row_height, |mut header| {
                for key in HISTORY_COLUMNS {
                    header.col(|ui| {
                        ui.strong(dict.get(key));
                    });
                }
            })
            .body(|mut body| {
                for e in &rows {
                    body.row(row_height, |mut row| {
                        row.col(|ui| {
                            ui.label(format_saved_at(e.date(), locale));
                        });
                        row.col(|ui| {
                            ui.label(e.lift_type());
                        });
                        row.col(|ui| {
                            ui.label(e.weight().to_string());
                        });
                        row.col(|ui| {
                            ui.label(e.reps().to_string());
                        });
                        row.col(|ui| {
                            ui.label(e.rpe().to_string());
                        });
                        row.col(|ui| {
                            ui.strong(e.one_rep_max().to_string());
                        });
                        row.col(|ui| {
                            if ui
                                .small_button("✖")
                                .on_hover_text(dict.get("history.deleteEntry"))
                                .clicked()
                            {
                                delete = Some(e.id().to_string());
                            }
                        });
                    });
                }
            });

        if rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.weak(dict.get("history.recordsFound"));
            });
        }
        if let Some(id) = delete {
            self.delete_entry(&id);
        }
    }
}

impl App for RpeApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        self.apply_theme(ctx, frame);
        let dict = self.dictionary();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.top_bar_ui(ui, dict);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.calculator_ui(ui, dict);
                ui.separator();
                self.history_ui(ui, dict);
            });
        });

        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.start.elapsed() >= NOTICE_DURATION)
        {
            self.notice = None;
        }
        if let Some(notice) = &self.notice {
            egui::Area::new(egui::Id::new("notice_toast"))
                .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
                .show(ctx, |ui| {
                    ui.label(dict.get(notice.key));
                });
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        if self.settings_dirty {
            self.settings.save();
            self.settings_dirty = false;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.remember_input(self.calculator.input());
        self.settings.save();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "RPE Calculator",
        options,
        Box::new(|_cc| Box::new(RpeApp::default())),
    )
}
