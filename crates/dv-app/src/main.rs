//! Main application entry point

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dv_core::{Dataset, DimensionConfig, PlotConfig};
use dv_views::{ParallelCoordinatesView, SummaryTableView, TableColumn};

mod loader;

use loader::Loader;

/// What the central panel shows
enum Session {
    /// Nothing loaded yet
    Empty,
    Ready(Box<ParallelCoordinatesView>),
    /// The load failed; nothing of the dataset is drawn
    Failed(String),
}

/// Main application state
struct ParcoordsApp {
    config: PlotConfig,
    loader: Loader,
    loading: Option<PathBuf>,
    session: Session,
    table_view: SummaryTableView,
}

impl ParcoordsApp {
    fn new(cc: &eframe::CreationContext<'_>, config: PlotConfig, loader: Loader) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        if let Some(ratio) = config.device_pixel_ratio {
            cc.egui_ctx.set_pixels_per_point(ratio);
        }

        let mut app = Self {
            config,
            loader,
            loading: None,
            session: Session::Empty,
            table_view: SummaryTableView::new(),
        };
        let path = app.config.data_path.clone();
        app.open(path, &cc.egui_ctx);
        app
    }

    fn open(&mut self, path: PathBuf, ctx: &egui::Context) {
        self.loader.start(path.clone(), DimensionConfig::event_log(), ctx.clone());
        self.loading = Some(path);
    }

    /// Pick up a finished load
    fn poll_load(&mut self, ctx: &egui::Context) {
        let Some(result) = self.loader.take() else {
            return;
        };
        self.loading = None;

        match result {
            Ok(dataset) => self.install(dataset, ctx),
            Err(e) => {
                // A failed load replaces whatever was shown; no partial render
                self.session = Session::Failed(format!("{:#}", e));
            }
        }
    }

    fn install(&mut self, dataset: Dataset, ctx: &egui::Context) {
        if let Session::Ready(view) = &mut self.session {
            view.reload(dataset);
            return;
        }

        // The plot is sized once, from the window it first appears in
        let panel_margin = 2.0 * ctx.style().spacing.window_margin.left;
        let config = self.config.clone().with_width(ctx.screen_rect().width() - panel_margin);
        info!("Plot area {}x{}", config.width, config.height);

        self.session = Session::Ready(Box::new(ParallelCoordinatesView::new(
            config,
            DimensionConfig::event_log(),
            TableColumn::event_log(),
            dataset,
        )));
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📂 Open CSV...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV Files", &["csv"])
                        .pick_file()
                    {
                        self.open(path, ctx);
                    }
                }

                ui.separator();

                if let Some(path) = &self.loading {
                    ui.spinner();
                    ui.label(format!("Loading {}", path.display()));
                } else if let Session::Ready(view) = &self.session {
                    ui.label(view.status());
                }
            });
        });
    }
}

impl eframe::App for ParcoordsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load(ctx);
        self.menu_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.session {
            Session::Ready(view) => {
                egui::ScrollArea::both().show(ui, |ui| {
                    view.ui(ui);
                    ui.add_space(12.0);
                    self.table_view.show(ui, view.table());
                });
            }
            Session::Failed(message) => {
                ui.colored_label(egui::Color32::DARK_RED, message.as_str());
            }
            Session::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label("No data loaded");
                });
            }
        });
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("parcoords.json"));
    let config = PlotConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    if config_path.exists() {
        info!("Using config {}", config_path.display());
    } else {
        warn!("{} not found, using default config", config_path.display());
    }

    let loader = Loader::new()?;

    info!("Starting parallel coordinates viewer");

    let [width, height] = config.outer_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width + 40.0, height + 260.0])
            .with_min_inner_size([640.0, 480.0]),
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Parallel Coordinates",
        options,
        Box::new(move |cc| Box::new(ParcoordsApp::new(cc, config, loader))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
