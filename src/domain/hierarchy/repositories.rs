use super::entities::HierarchyNode;
use super::value_objects::{NodeId, NodeKind};

/// Read-only access to the static membership table
pub trait HierarchyIndex {
    fn node(&self, id: &NodeId) -> Option<&HierarchyNode>;

    /// Top-level ETF ids in table order
    fn roots(&self) -> &[NodeId];

    /// Direct children in table order; empty for leaves and unknown ids
    fn children_of(&self, id: &NodeId) -> &[NodeId];

    fn parent_of(&self, id: &NodeId) -> Option<&NodeId>;

    /// Every node of `kind` whose label is `name`
    fn find_by_name(&self, kind: NodeKind, name: &str) -> Vec<&NodeId>;

    /// Instrument leaves beneath `id` (or `id` itself when it is a leaf), depth-first in table order
    fn descendant_instruments(&self, id: &NodeId) -> Vec<&HierarchyNode> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            if node.kind.is_leaf() {
                leaves.push(node);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }

    /// Children as exposed to drilling: sub-sectors are flattened away, so a
    /// sector drills straight into its instruments. `None` means the root.
    fn drill_children(&self, parent: Option<&NodeId>) -> Vec<NodeId> {
        let Some(parent) = parent else {
            return self.roots().to_vec();
        };
        match self.node(parent).map(|node| node.kind) {
            Some(NodeKind::Etf) => self.children_of(parent).to_vec(),
            Some(NodeKind::Sector) | Some(NodeKind::SubSector) => {
                self.descendant_instruments(parent).into_iter().map(|node| node.id.clone()).collect()
            }
            Some(NodeKind::Instrument) | None => Vec::new(),
        }
    }

    fn is_drill_child(&self, parent: Option<&NodeId>, child: &NodeId) -> bool {
        match parent {
            None => self.roots().contains(child),
            Some(parent) => {
                let Some(node) = self.node(child) else {
                    return false;
                };
                match node.kind {
                    NodeKind::Sector => node.parent.as_ref() == Some(parent),
                    NodeKind::Instrument => {
                        // instrument → sub-sector → sector
                        node.parent
                            .as_ref()
                            .and_then(|sub_sector| self.parent_of(sub_sector))
                            .is_some_and(|sector| sector == parent)
                    }
                    NodeKind::Etf | NodeKind::SubSector => false,
                }
            }
        }
    }
}
