//! In-memory layout snapshot and geometry selection.
//!
//! The snapshot is the neutral form any layout reader can produce: cells
//! holding per-layer polygons and text labels, plus translated references to
//! child cells. File-format parsing itself lives outside this crate; the
//! whole model derives `serde`, so a JSON dump from any exporter loads
//! directly.

use crate::error::{MeasureError, Result};
use crate::geometry::{self, Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Identifies one drawing layer by layer number and datatype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerSelector {
    pub layer: u32,
    pub datatype: u32,
}

impl LayerSelector {
    pub fn new(layer: u32, datatype: u32) -> Self {
        Self { layer, datatype }
    }
}

impl std::fmt::Display for LayerSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.layer, self.datatype)
    }
}

/// A named point placed by the designer to mark a measurement port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    pub origin: Point,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, origin: Point) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

/// One drawn shape on a layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutShape {
    pub layer: LayerSelector,
    pub points: Vec<Point>,
}

/// One text label on a layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutText {
    pub layer: LayerSelector,
    pub text: String,
    pub origin: Point,
}

/// A translated reference to another cell.
///
/// Rotation and magnification are the layout reader's concern; snapshots are
/// expected to arrive with those already applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub cell: String,
    #[serde(default)]
    pub offset: Point,
}

/// One cell of the layout hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    #[serde(default)]
    pub shapes: Vec<LayoutShape>,
    #[serde(default)]
    pub texts: Vec<LayoutText>,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// A layout snapshot: the full cell list of one loaded file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    pub cells: Vec<Cell>,
}

impl Layout {
    /// Cells not instantiated by any other cell.
    pub fn top_level(&self) -> Vec<&Cell> {
        self.cells
            .iter()
            .filter(|c| {
                !self
                    .cells
                    .iter()
                    .any(|other| other.instances.iter().any(|inst| inst.cell == c.name))
            })
            .collect()
    }

    fn cell_by_name(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name == name)
    }

    /// All polygons on `layer` within `cell`, recursing through instances.
    fn polygons_on(&self, cell: &Cell, layer: LayerSelector, offset: Point, out: &mut Vec<Polygon>) {
        for shape in cell.shapes.iter().filter(|s| s.layer == layer) {
            let pts: Vec<Point> = shape
                .points
                .iter()
                .map(|p| Point::new(p.x + offset.x, p.y + offset.y))
                .collect();
            out.push(Polygon::new(&pts));
        }
        for inst in &cell.instances {
            match self.cell_by_name(&inst.cell) {
                Some(child) => {
                    let child_offset =
                        Point::new(offset.x + inst.offset.x, offset.y + inst.offset.y);
                    self.polygons_on(child, layer, child_offset, out);
                }
                None => warn!(cell = %inst.cell, "instance references unknown cell, skipping"),
            }
        }
    }

    /// All text labels on `layer` within `cell`, recursing through instances.
    fn labels_on(&self, cell: &Cell, layer: LayerSelector, offset: Point, out: &mut Vec<TextLabel>) {
        for text in cell.texts.iter().filter(|t| t.layer == layer) {
            out.push(TextLabel::new(
                text.text.clone(),
                Point::new(text.origin.x + offset.x, text.origin.y + offset.y),
            ));
        }
        for inst in &cell.instances {
            if let Some(child) = self.cell_by_name(&inst.cell) {
                let child_offset = Point::new(offset.x + inst.offset.x, offset.y + inst.offset.y);
                self.labels_on(child, layer, child_offset, out);
            }
        }
    }
}

/// Selects the raw measurement geometry from a layout.
///
/// Returns the merged path polygons, the unmerged cutting-layer polygons,
/// and the cutting-layer labels of the selected top cell. Fails when the
/// layout has no top cell, when several exist and none was named, or when
/// the named cell is absent.
pub fn select_geometry(
    layout: &Layout,
    path_layer: LayerSelector,
    cutting_layer: LayerSelector,
    cell_name: Option<&str>,
) -> Result<(Vec<Polygon>, Vec<Polygon>, Vec<TextLabel>)> {
    let tops = layout.top_level();
    if tops.is_empty() {
        return Err(MeasureError::NoCells);
    }
    if tops.len() > 1 && cell_name.is_none() {
        return Err(MeasureError::AmbiguousCell { count: tops.len() });
    }

    let cell = match cell_name {
        None => tops[0],
        Some(name) => tops
            .iter()
            .copied()
            .find(|c| c.name == name)
            .ok_or_else(|| MeasureError::UnknownCell {
                name: name.to_string(),
            })?,
    };

    let mut raw_paths = Vec::new();
    layout.polygons_on(cell, path_layer, Point::default(), &mut raw_paths);
    let path_polygons = geometry::union_merge(raw_paths);

    let mut cutting_polygons = Vec::new();
    layout.polygons_on(cell, cutting_layer, Point::default(), &mut cutting_polygons);

    let mut labels = Vec::new();
    layout.labels_on(cell, cutting_layer, Point::default(), &mut labels);

    debug!(
        cell = %cell.name,
        paths = path_polygons.len(),
        cuts = cutting_polygons.len(),
        labels = labels.len(),
        "selected layout geometry"
    );
    Ok((path_polygons, cutting_polygons, labels))
}
