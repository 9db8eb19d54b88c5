use eframe::egui::{self, Pos2};

use crate::config::ChartConfig;
use crate::data::loader::{spawn_fetch, DataSource, LoadError, PendingLoad};
use crate::data::model::Dataset;
use crate::scale::ScaleSet;
use crate::scene::Scene;
use crate::tooltip::{PointerEvent, TooltipState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ChartConfig,

    /// Loaded dataset (None until the first load succeeds).
    pub dataset: Option<Dataset>,

    /// Scales derived from `dataset`; None when the dataset is empty.
    pub scales: Option<ScaleSet>,

    /// Retained chart drawing.
    pub scene: Scene,

    pub tooltip: TooltipState,

    /// Element index of the cell under the pointer.
    pub hovered: Option<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Load in flight, if any.
    pub pending: Option<PendingLoad>,

    /// Bumped for every load started; results tagged with an older value
    /// are ignored.
    generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: ChartConfig::default(),
            dataset: None,
            scales: None,
            scene: Scene::new(),
            tooltip: TooltipState::default(),
            hovered: None,
            status_message: None,
            pending: None,
            generation: 0,
        }
    }
}

impl AppState {
    /// Whether a load is in progress.
    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start loading `source` in the background, superseding any load still
    /// in flight.
    pub fn begin_load(&mut self, source: DataSource, ctx: &egui::Context) {
        let generation = self.next_generation();
        log::info!("Loading dataset from {source}");
        self.status_message = None;
        self.pending = Some(spawn_fetch(source, generation, ctx));
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Check the in-flight load and apply its result when it arrives.
    pub fn poll_load(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        let generation = pending.generation;
        let source = pending.source.to_string();
        self.pending = None;

        if let Err(e) = &result {
            log::error!("Failed to load {source}: {e}");
        }
        self.apply_load_result(generation, result);
    }

    /// Apply a finished load. Returns false when the result belongs to a
    /// superseded load and was dropped.
    pub fn apply_load_result(
        &mut self,
        generation: u64,
        result: Result<Dataset, LoadError>,
    ) -> bool {
        if generation != self.generation {
            log::warn!(
                "Dropping result of load #{generation}; load #{} is current",
                self.generation
            );
            return false;
        }

        match result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
        true
    }

    /// Ingest a newly loaded dataset, build scales and redraw the scene.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.unhover();
        self.scales = ScaleSet::build(&dataset, &self.config);

        match &self.scales {
            Some(scales) => {
                self.scene.render(&dataset, scales, &self.config);
                if let Some((first, last)) = dataset.year_extent() {
                    log::info!("Loaded {} records ({first} - {last})", dataset.len());
                }
                self.status_message = None;
            }
            None => {
                self.scene.clear();
                log::warn!("Loaded dataset has no records; nothing to draw");
                self.status_message = Some("Dataset contains no records.".to_string());
            }
        }

        self.dataset = Some(dataset);
    }

    // -- Pointer transitions --

    /// Pointer entered cell `id` (element index in the scene).
    pub fn hover(&mut self, id: usize, pointer: Pos2) {
        if self.hovered == Some(id) {
            return;
        }
        self.unhover();

        let Some(dataset) = &self.dataset else {
            return;
        };
        let Some(record) = self
            .scene
            .cell(id)
            .and_then(|cell| dataset.records.get(cell.record))
        else {
            return;
        };

        self.tooltip.on_pointer_enter(
            PointerEvent { pos: pointer },
            record,
            dataset.base_temperature,
            self.config.tooltip_offset,
        );
        self.scene.set_outlined(id, true);
        self.hovered = Some(id);
    }

    /// Pointer left the hovered cell.
    pub fn unhover(&mut self) {
        if let Some(id) = self.hovered.take() {
            self.scene.set_outlined(id, false);
        }
        self.tooltip.on_pointer_leave();
    }

    /// Title subtitle for the loaded data.
    pub fn description(&self) -> Option<String> {
        self.dataset.as_ref().and_then(Dataset::description)
    }
}
