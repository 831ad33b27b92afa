pub use super::value_objects::{MarketCap, Price, Symbol, Volume};
use serde::{Deserialize, Serialize};

/// Domain entity - one live instrument record as published by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub symbol: Symbol,
    pub sector: String,
    pub sub_sector: String,
    pub price: Price,
    pub volume: Volume,
    pub market_cap: MarketCap,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
}

impl Instrument {
    pub fn new(symbol: Symbol, sector: &str, sub_sector: &str) -> Self {
        Self {
            symbol,
            sector: sector.to_string(),
            sub_sector: sub_sector.to_string(),
            price: Price::default(),
            volume: Volume::default(),
            market_cap: MarketCap::default(),
            change: 0.0,
            change_percent: 0.0,
            pe_ratio: None,
        }
    }

    pub fn with_quote(mut self, price: f64, change_percent: f64) -> Self {
        self.price = Price::from(price);
        self.change_percent = change_percent;
        self.change = price * change_percent / (100.0 + change_percent);
        self
    }

    pub fn with_size(mut self, volume: f64, market_cap: f64) -> Self {
        self.volume = Volume::from(volume);
        self.market_cap = MarketCap::from(market_cap);
        self
    }

    pub fn with_pe_ratio(mut self, pe_ratio: f64) -> Self {
        self.pe_ratio = Some(pe_ratio);
        self
    }
}
