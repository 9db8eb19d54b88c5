// ---------------------------------------------------------------------------
// Presentation constants
// ---------------------------------------------------------------------------

/// Default remote dataset.
pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Heading shown above the chart.
pub const TITLE: &str = "Global Temperature Heat Map";

/// Space reserved around the chart area for the axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Every layout constant the scene renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub margin: Margin,
    /// Outer size of the chart including margins.
    pub outer_width: f32,
    pub outer_height: f32,
    /// Added to each cell so neighbouring cells overlap instead of leaving
    /// sub-pixel seams.
    pub cell_overlap: [f32; 2],
    pub tick_size: f32,
    pub tick_padding: f32,
    pub legend_width: f32,
    pub legend_height: f32,
    pub legend_tick_size: f32,
    /// Vertical gap between the chart and the legend.
    pub legend_gap: f32,
    /// Temperature range covered by the legend axis (°C). Fixed, not derived
    /// from the loaded data.
    pub legend_domain: [f64; 2],
    pub color_tick_count: usize,
    /// Tooltip placement relative to the pointer.
    pub tooltip_offset: [f32; 2],
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: Margin {
                top: 20.0,
                right: 20.0,
                bottom: 30.0,
                left: 70.0,
            },
            outer_width: 1400.0,
            outer_height: 500.0,
            cell_overlap: [0.6, 0.5],
            tick_size: 6.0,
            tick_padding: 3.0,
            legend_width: 400.0,
            legend_height: 20.0,
            legend_tick_size: 10.0,
            legend_gap: 5.0,
            legend_domain: [2.8, 12.8],
            color_tick_count: 10,
            tooltip_offset: [-50.0, -100.0],
        }
    }
}

impl ChartConfig {
    /// Width of the cell area (outer width minus horizontal margins).
    pub fn chart_width(&self) -> f32 {
        (self.outer_width - self.margin.left - self.margin.right).floor()
    }

    /// Height of the cell area (outer height minus vertical margins).
    pub fn chart_height(&self) -> f32 {
        (self.outer_height - self.margin.top - self.margin.bottom).floor()
    }

    /// Top edge of the legend strip in scene coordinates.
    pub fn legend_top(&self) -> f32 {
        self.outer_height + self.legend_gap
    }

    /// Total scene size: chart, gap, legend strip and its axis.
    pub fn scene_size(&self) -> [f32; 2] {
        [
            self.outer_width,
            self.legend_top() + self.legend_height + 20.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_size_subtracts_margins() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.chart_width(), 1310.0);
        assert_eq!(cfg.chart_height(), 450.0);
    }

    #[test]
    fn legend_sits_below_chart() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.legend_top(), 505.0);
        assert_eq!(cfg.scene_size(), [1400.0, 545.0]);
    }
}
