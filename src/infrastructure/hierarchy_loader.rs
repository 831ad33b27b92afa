use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::domain::{
    errors::AppResult,
    hierarchy::{HierarchyRow, HierarchyTable, StaticHierarchy},
    logging::{LogComponent, get_logger},
};

/// (etf, sector, sub-sector, symbol)
const DEMO_MEMBERSHIP: &[(&str, &str, &str, &str)] = &[
    ("QQQ", "Technology", "Semiconductors", "NVDA"),
    ("QQQ", "Technology", "Semiconductors", "AVGO"),
    ("QQQ", "Technology", "Software", "MSFT"),
    ("QQQ", "Technology", "Hardware", "AAPL"),
    ("QQQ", "Communication Services", "Interactive Media", "GOOGL"),
    ("QQQ", "Communication Services", "Interactive Media", "META"),
    ("QQQ", "Consumer Discretionary", "Internet Retail", "AMZN"),
    ("QQQ", "Consumer Discretionary", "Automobiles", "TSLA"),
    ("SPY", "Technology", "Software", "MSFT"),
    ("SPY", "Technology", "Hardware", "AAPL"),
    ("SPY", "Financials", "Banks", "JPM"),
    ("SPY", "Financials", "Payments", "V"),
    ("SPY", "Health Care", "Pharmaceuticals", "LLY"),
    ("SPY", "Health Care", "Managed Care", "UNH"),
    ("SPY", "Energy", "Integrated Oil & Gas", "XOM"),
    ("DIA", "Industrials", "Aerospace & Defense", "BA"),
    ("DIA", "Industrials", "Machinery", "CAT"),
    ("DIA", "Financials", "Investment Banking", "GS"),
    ("DIA", "Consumer Staples", "Beverages", "KO"),
];

const DEMO_COLORS: &[(&str, &str)] = &[("QQQ", "#4e79a7"), ("SPY", "#59a14f"), ("DIA", "#f28e2b")];

/// Built-in three-ETF table used when the host supplies none
pub static DEMO_TABLE: Lazy<HierarchyTable> = Lazy::new(|| HierarchyTable {
    colors: DEMO_COLORS.iter().map(|(key, hex)| (key.to_string(), hex.to_string())).collect::<BTreeMap<_, _>>(),
    rows: DEMO_MEMBERSHIP
        .iter()
        .map(|(etf, sector, sub_sector, symbol)| HierarchyRow::new(etf, sector, sub_sector, symbol))
        .collect(),
});

/// Parse a JSON reference table into a hierarchy
pub fn load_hierarchy_json(json: &str) -> AppResult<StaticHierarchy> {
    let table: HierarchyTable = serde_json::from_str(json)?;
    let rows = table.rows.len();
    let hierarchy = StaticHierarchy::from_table(table)?;
    get_logger().info(
        LogComponent::Infrastructure("HierarchyLoader"),
        &format!("Loaded {} membership rows into {} nodes", rows, hierarchy.len()),
    );
    Ok(hierarchy)
}

pub fn demo_hierarchy() -> AppResult<StaticHierarchy> {
    StaticHierarchy::from_table(DEMO_TABLE.clone())
}
