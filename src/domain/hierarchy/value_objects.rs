use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Separator between the scopes of a path-style node id
pub const SCOPE_SEPARATOR: char = '/';

/// Value Object - stable node key.
///
/// Ids are scoped by their ancestors (`QQQ`, `QQQ/Technology`,
/// `QQQ/Technology/Semiconductors/NVDA`) so the same sector or symbol can sit
/// under several ETFs without colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of a child named `name` scoped under this node
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}{}{}", self.0, SCOPE_SEPARATOR, name.trim()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Last scope component, used wherever the id is shown to a person
    pub fn display_name(&self) -> &str {
        self.0.rsplit(SCOPE_SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Number of scopes in the id (an ETF id has depth 1)
    pub fn depth(&self) -> usize {
        self.0.split(SCOPE_SEPARATOR).count()
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Value Object - node kind, leaf last
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    #[display(fmt = "ETF")]
    #[strum(serialize = "etf")]
    Etf,
    #[display(fmt = "Sector")]
    #[strum(serialize = "sector")]
    Sector,
    #[display(fmt = "Sub-sector")]
    #[strum(serialize = "subSector")]
    SubSector,
    #[display(fmt = "Instrument")]
    #[strum(serialize = "instrument")]
    Instrument,
}

impl NodeKind {
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_ids_are_scoped() {
        let etf = NodeId::from("QQQ");
        let sector = etf.child("Technology");
        let stock = sector.child("Semiconductors").child("NVDA");
        assert_eq!(sector.value(), "QQQ/Technology");
        assert_eq!(stock.display_name(), "NVDA");
        assert_eq!(stock.depth(), 4);
        assert_eq!(etf.display_name(), "QQQ");
    }
}
