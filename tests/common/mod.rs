#![allow(dead_code)]

use sector_drill_wasm::domain::hierarchy::{HierarchyIndex, HierarchyRow, NodeId, StaticHierarchy};
use sector_drill_wasm::domain::market_data::{Instrument, Symbol};
use sector_drill_wasm::infrastructure::InMemoryInstrumentFeed;
use std::rc::Rc;

pub fn rows() -> Vec<HierarchyRow> {
    vec![
        HierarchyRow::new("QQQ", "Technology", "Semiconductors", "NVDA"),
        HierarchyRow::new("QQQ", "Technology", "Semiconductors", "AVGO"),
        HierarchyRow::new("QQQ", "Technology", "Software", "MSFT"),
        HierarchyRow::new("QQQ", "Consumer", "Retail", "AMZN"),
        HierarchyRow::new("QQQ", "Consumer", "Retail", "ZERO"),
        HierarchyRow::new("SPY", "Technology", "Software", "MSFT"),
        HierarchyRow::new("SPY", "Financials", "Banks", "JPM"),
    ]
}

pub fn hierarchy() -> StaticHierarchy {
    StaticHierarchy::from_rows(rows()).expect("fixture hierarchy")
}

pub fn shared_hierarchy() -> Rc<dyn HierarchyIndex> {
    Rc::new(hierarchy())
}

pub fn instrument(symbol: &str, sector: &str, sub_sector: &str) -> Instrument {
    Instrument::new(Symbol::from(symbol), sector, sub_sector)
}

/// AVGO is deliberately absent; ZERO has no volume and no capitalisation.
pub fn feed() -> InMemoryInstrumentFeed {
    InMemoryInstrumentFeed::from_instruments([
        instrument("NVDA", "Technology", "Semiconductors")
            .with_quote(120.0, 2.0)
            .with_size(4_000.0, 3_000.0)
            .with_pe_ratio(60.0),
        instrument("MSFT", "Technology", "Software")
            .with_quote(410.0, -1.0)
            .with_size(1_000.0, 1_000.0)
            .with_pe_ratio(35.0),
        instrument("AMZN", "Consumer", "Retail").with_quote(180.0, 0.5).with_size(3_000.0, 2_000.0),
        instrument("ZERO", "Consumer", "Retail").with_quote(1.0, 0.0).with_size(0.0, 0.0),
        instrument("JPM", "Financials", "Banks").with_quote(200.0, 1.0).with_size(2_000.0, 500.0),
    ])
}

pub fn id(value: &str) -> NodeId {
    NodeId::from(value)
}

pub const QQQ: &str = "QQQ";
pub const SPY: &str = "SPY";
pub const QQQ_TECH: &str = "QQQ/Technology";
pub const QQQ_CONSUMER: &str = "QQQ/Consumer";
pub const SPY_TECH: &str = "SPY/Technology";
pub const NVDA: &str = "QQQ/Technology/Semiconductors/NVDA";
pub const AVGO: &str = "QQQ/Technology/Semiconductors/AVGO";
pub const MSFT: &str = "QQQ/Technology/Software/MSFT";
pub const AMZN: &str = "QQQ/Consumer/Retail/AMZN";
pub const ZERO: &str = "QQQ/Consumer/Retail/ZERO";
