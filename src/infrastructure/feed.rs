use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    market_data::{Instrument, InstrumentFeed, MarketCap, Price, Symbol, Volume},
};

/// Wire shape of one record pushed by the feed simulation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDto {
    pub symbol: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub sub_sector: String,
    pub price: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default, alias = "pe")]
    pub pe_ratio: Option<f64>,
}

impl InstrumentDto {
    /// Convert the DTO into a domain entity
    pub fn to_domain_instrument(&self) -> AppResult<Instrument> {
        let symbol = Symbol::new(self.symbol.clone()).map_err(AppError::Validation)?;
        let numbers = [
            ("price", self.price),
            ("volume", self.volume),
            ("marketCap", self.market_cap),
            ("change", self.change),
            ("changePercent", self.change_percent),
        ];
        if let Some((field, value)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(AppError::Validation(format!("{}: {} is not finite ({})", symbol, field, value)));
        }
        if self.volume < 0.0 || self.market_cap < 0.0 {
            return Err(AppError::Validation(format!("{}: negative volume or market cap", symbol)));
        }

        Ok(Instrument {
            symbol,
            sector: self.sector.clone(),
            sub_sector: self.sub_sector.clone(),
            price: Price::from(self.price),
            volume: Volume::from(self.volume),
            market_cap: MarketCap::from(self.market_cap),
            change: self.change,
            change_percent: self.change_percent,
            pe_ratio: self.pe_ratio.filter(|pe| pe.is_finite()),
        })
    }
}

/// Keyed store of the latest record per symbol
#[derive(Debug, Clone, Default)]
pub struct InMemoryInstrumentFeed {
    instruments: HashMap<Symbol, Instrument>,
}

impl InMemoryInstrumentFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_instruments(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        let mut feed = Self::new();
        for instrument in instruments {
            feed.upsert(instrument);
        }
        feed
    }

    pub fn upsert(&mut self, instrument: Instrument) {
        self.instruments.insert(instrument.symbol.clone(), instrument);
    }

    /// Swap in a whole new snapshot
    pub fn replace_snapshot(&mut self, instruments: Vec<Instrument>) {
        self.instruments.clear();
        for instrument in instruments {
            self.upsert(instrument);
        }
    }

    /// Apply a JSON array of records. Invalid records are skipped and
    /// counted; a malformed document is an error and changes nothing.
    pub fn apply_json(&mut self, json: &str, replace: bool) -> AppResult<usize> {
        let records: Vec<InstrumentDto> = serde_json::from_str(json)?;
        let mut accepted = Vec::with_capacity(records.len());
        for record in &records {
            match record.to_domain_instrument() {
                Ok(instrument) => accepted.push(instrument),
                Err(e) => get_logger().warn(LogComponent::Infrastructure("InstrumentFeed"), &e.to_string()),
            }
        }

        let count = accepted.len();
        if replace {
            self.replace_snapshot(accepted);
        } else {
            accepted.into_iter().for_each(|instrument| self.upsert(instrument));
        }
        Ok(count)
    }
}

impl InstrumentFeed for InMemoryInstrumentFeed {
    fn get(&self, symbol: &Symbol) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    fn snapshot(&self) -> Vec<&Instrument> {
        let mut records: Vec<&Instrument> = self.instruments.values().collect();
        records.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        records
    }

    fn len(&self) -> usize {
        self.instruments.len()
    }
}
