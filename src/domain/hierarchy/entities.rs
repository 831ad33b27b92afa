use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::repositories::HierarchyIndex;
use super::value_objects::{NodeId, NodeKind, SCOPE_SEPARATOR};
use crate::domain::errors::{AppError, AppResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Symbol;
use crate::domain::sunburst::Color;
use crate::log_warn;

/// Fallback colors handed out in table order to ETFs and sectors without one
pub const PALETTE: [u32; 10] = [
    0x4e79a7, 0xf28e2b, 0xe15759, 0x76b7b2, 0x59a14f, 0xedc948, 0xb07aa1, 0xff9da7, 0x9c755f,
    0xbab0ac,
];

/// Domain entity - one node of the membership tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub color: Color,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Feed key, set on instrument nodes only
    pub symbol: Option<Symbol>,
}

/// One membership row of the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyRow {
    pub etf: String,
    pub sector: String,
    pub sub_sector: String,
    pub symbol: String,
}

impl HierarchyRow {
    pub fn new(etf: &str, sector: &str, sub_sector: &str, symbol: &str) -> Self {
        Self {
            etf: etf.to_string(),
            sector: sector.to_string(),
            sub_sector: sub_sector.to_string(),
            symbol: symbol.to_string(),
        }
    }

    fn fields(&self) -> [&String; 4] {
        [&self.etf, &self.sector, &self.sub_sector, &self.symbol]
    }

    fn is_complete(&self) -> bool {
        self.fields().iter().all(|field| !field.trim().is_empty())
    }

    /// Names become id segments, so none may carry the separator
    fn has_scope_separator(&self) -> bool {
        self.fields().iter().any(|field| field.contains(SCOPE_SEPARATOR))
    }
}

/// Serialized form of the reference table.
///
/// `colors` is keyed by ETF symbol or sector name and holds `#rrggbb` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyTable {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    pub rows: Vec<HierarchyRow>,
}

/// In-memory membership tree built once from a [`HierarchyTable`].
#[derive(Debug, Clone, Default)]
pub struct StaticHierarchy {
    nodes: HashMap<NodeId, HierarchyNode>,
    roots: Vec<NodeId>,
    by_name: HashMap<(NodeKind, String), Vec<NodeId>>,
}

impl StaticHierarchy {
    pub fn from_rows(rows: Vec<HierarchyRow>) -> AppResult<Self> {
        Self::from_table(HierarchyTable { colors: BTreeMap::new(), rows })
    }

    pub fn from_table(table: HierarchyTable) -> AppResult<Self> {
        let mut colors = HashMap::new();
        for (key, hex) in &table.colors {
            let color = Color::parse_hex(hex)
                .map_err(|e| AppError::Validation(format!("color for {}: {}", key, e)))?;
            colors.insert(key.trim().to_string(), color);
        }

        let mut hierarchy = Self::default();
        let mut palette_cursor = 0usize;
        let mut next_color = |name: &str| -> Color {
            colors.get(name).copied().unwrap_or_else(|| {
                let color = Color::from_hex(PALETTE[palette_cursor % PALETTE.len()]);
                palette_cursor += 1;
                color
            })
        };

        for (index, row) in table.rows.into_iter().enumerate() {
            if !row.is_complete() {
                return Err(AppError::Validation(format!("row {} has an empty field", index)));
            }
            if row.has_scope_separator() {
                return Err(AppError::Validation(format!(
                    "row {} has a name containing '{}'",
                    index, SCOPE_SEPARATOR
                )));
            }
            let symbol = Symbol::from(row.symbol.as_str());

            let etf_id = NodeId::from(row.etf.trim());
            if !hierarchy.nodes.contains_key(&etf_id) {
                let color = next_color(row.etf.trim());
                hierarchy.insert(etf_id.clone(), NodeKind::Etf, row.etf.trim(), color, None, None);
                hierarchy.roots.push(etf_id.clone());
            }

            let sector_id = etf_id.child(&row.sector);
            if !hierarchy.nodes.contains_key(&sector_id) {
                let color = next_color(row.sector.trim());
                hierarchy.insert(
                    sector_id.clone(),
                    NodeKind::Sector,
                    row.sector.trim(),
                    color,
                    Some(etf_id.clone()),
                    None,
                );
            }
            let sector_color = hierarchy.nodes[&sector_id].color;

            let sub_sector_id = sector_id.child(&row.sub_sector);
            if !hierarchy.nodes.contains_key(&sub_sector_id) {
                hierarchy.insert(
                    sub_sector_id.clone(),
                    NodeKind::SubSector,
                    row.sub_sector.trim(),
                    sector_color,
                    Some(sector_id.clone()),
                    None,
                );
            }

            let instrument_id = sub_sector_id.child(symbol.value());
            if hierarchy.nodes.contains_key(&instrument_id) {
                log_warn!(
                    LogComponent::Domain("Hierarchy"),
                    "Duplicate membership row for {}, skipped",
                    instrument_id
                );
                continue;
            }
            let label = symbol.value().to_string();
            hierarchy.insert(
                instrument_id,
                NodeKind::Instrument,
                &label,
                sector_color,
                Some(sub_sector_id),
                Some(symbol),
            );
        }

        Ok(hierarchy)
    }

    fn insert(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        label: &str,
        color: Color,
        parent: Option<NodeId>,
        symbol: Option<Symbol>,
    ) {
        if let Some(parent_id) = &parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.push(id.clone());
            }
        }
        self.by_name.entry((kind, label.to_string())).or_default().push(id.clone());
        self.nodes.insert(
            id.clone(),
            HierarchyNode { id, kind, label: label.to_string(), color, parent, children: Vec::new(), symbol },
        );
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl HierarchyIndex for StaticHierarchy {
    fn node(&self, id: &NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id)
    }

    fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.nodes.get(id).and_then(|node| node.parent.as_ref())
    }

    fn find_by_name(&self, kind: NodeKind, name: &str) -> Vec<&NodeId> {
        self.by_name
            .get(&(kind, name.trim().to_string()))
            .map(|ids| ids.iter().collect())
            .unwrap_or_default()
    }
}
