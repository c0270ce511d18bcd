use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Align, Context, Layout as EguiLayout, Pos2};

use crate::data::{self, NetworkData, NetworkKind};

mod graph;
mod layout;
mod render_utils;
mod scales;
mod ui;
mod viewport;

use graph::{LayoutGraph, build_layout_graph};
use layout::{ForceConfig, ForceSimulation, Layout, LayoutMode, RadialLayout};
use viewport::Viewport;

pub struct CiteGraphApp {
    paths: DatasetPaths,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

#[derive(Clone)]
struct DatasetPaths {
    citations: PathBuf,
    authors: Option<PathBuf>,
}

struct LoadedData {
    citations: NetworkData,
    authors: Option<NetworkData>,
}

type LoadResult = Result<LoadedData, String>;

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

/// The active layout pass. Both variants implement [`Layout`]; the force
/// variant additionally takes live tuning from the controls panel.
enum ActiveLayout {
    Force(ForceSimulation),
    Radial(RadialLayout),
}

impl ActiveLayout {
    fn as_layout(&mut self) -> &mut dyn Layout {
        match self {
            Self::Force(sim) => sim,
            Self::Radial(radial) => radial,
        }
    }
}

struct ViewModel {
    data: LoadedData,
    network: NetworkKind,
    layout_mode: LayoutMode,
    graph: LayoutGraph,
    layout: ActiveLayout,
    viewport: Viewport,
    force_config: ForceConfig,
    max_nodes: usize,
    search: String,
    selected: Option<String>,
    year_highlight: Option<i32>,
    year_counts: Vec<(i32, usize)>,
    drag_node: Option<usize>,
    graph_dirty: bool,
    graph_revision: u64,
    search_cache: Option<SearchCache>,
    scratch: ViewScratch,
}

struct SearchCache {
    query: String,
    revision: u64,
    matches: Arc<HashSet<usize>>,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    draw_order: Vec<usize>,
    draw_order_dirty: bool,
}

impl CiteGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        citations: PathBuf,
        authors: Option<PathBuf>,
    ) -> Self {
        let paths = DatasetPaths { citations, authors };
        let state = Self::start_load(paths.clone());
        Self {
            paths,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(paths: DatasetPaths) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_datasets(&paths).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(paths: DatasetPaths) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(paths),
        }
    }
}

fn load_datasets(paths: &DatasetPaths) -> anyhow::Result<LoadedData> {
    let citations = data::load_network(&paths.citations)?;
    let authors = paths
        .authors
        .as_deref()
        .map(data::load_network)
        .transpose()?;
    Ok(LoadedData { citations, authors })
}

impl ViewModel {
    fn new(data: LoadedData) -> Self {
        let max_nodes = data.citations.nodes.len().max(2);
        let mut model = Self {
            data,
            network: NetworkKind::Citations,
            layout_mode: LayoutMode::ForceDirected,
            graph: build_layout_graph(&NetworkData::default(), None),
            layout: ActiveLayout::Force(ForceSimulation::new(ForceConfig::default())),
            viewport: Viewport::new(),
            force_config: ForceConfig::default(),
            max_nodes,
            search: String::new(),
            selected: None,
            year_highlight: None,
            year_counts: Vec::new(),
            drag_node: None,
            graph_dirty: true,
            graph_revision: 0,
            search_cache: None,
            scratch: ViewScratch {
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
                draw_order: Vec::new(),
                draw_order_dirty: true,
            },
        };
        model.rebuild_layout();
        model
    }

    fn active_network(&self) -> &NetworkData {
        match self.network {
            NetworkKind::Citations => &self.data.citations,
            NetworkKind::Authors => self.data.authors.as_ref().unwrap_or(&self.data.citations),
        }
    }

    /// Tears down the previous layout pass and builds a fresh layout-owned
    /// graph. Interaction state tied to the old pass is reset so no stale
    /// gesture survives the swap.
    fn rebuild_layout(&mut self) {
        self.layout.as_layout().halt();
        self.drag_node = None;
        self.graph_revision = self.graph_revision.wrapping_add(1);
        self.search_cache = None;
        self.scratch.draw_order_dirty = true;

        let network_data = match self.network {
            NetworkKind::Citations => &self.data.citations,
            NetworkKind::Authors => self.data.authors.as_ref().unwrap_or(&self.data.citations),
        };
        let total = network_data.nodes.len();
        let cap = (self.max_nodes < total).then_some(self.max_nodes);
        self.graph = build_layout_graph(network_data, cap);

        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for node in &self.graph.nodes {
            if let Some(year) = node.year {
                *counts.entry(year).or_default() += 1;
            }
        }
        self.year_counts = counts.into_iter().collect();

        self.layout = match self.layout_mode {
            LayoutMode::ForceDirected => {
                ActiveLayout::Force(ForceSimulation::new(self.force_config))
            }
            LayoutMode::RadialBundled => ActiveLayout::Radial(RadialLayout::new()),
        };
        self.graph_dirty = false;
    }

    fn show(
        &mut self,
        ctx: &Context,
        paths: &DatasetPaths,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.graph_dirty {
            self.rebuild_layout();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("citegraph");
                    ui.separator();
                    ui.label(format!("dataset: {}", self.network.label()));
                    let network = self.active_network();
                    ui.label(format!(
                        "nodes: {}  links: {}",
                        network.reported_node_count(),
                        network.reported_link_count()
                    ));
                    if let Some(meta) = network.meta
                        && let (Some(min_year), Some(max_year)) = (meta.min_year, meta.max_year)
                    {
                        ui.label(format!("years: {min_year}-{max_year}"));
                    }
                    ui.label(format!("source: {}", paths.citations.display()));

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload datasets"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(EguiLayout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "rendered: {} nodes / {} links",
                            self.graph.nodes.len(),
                            self.graph.links.len()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(310.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::TopBottomPanel::bottom("timeline")
            .resizable(false)
            .show(ctx, |ui| self.draw_timeline(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading network datasets...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }
}

impl eframe::App for CiteGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(data))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading network datasets...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load network datasets");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.paths.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.paths, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.paths.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(data) => AppState::Ready(Box::new(ViewModel::new(data))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
