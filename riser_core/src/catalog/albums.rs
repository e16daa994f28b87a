//! KUU Album Templates
//!
//! Each album type selects a bill-of-materials template for the apartment
//! metering units of a zone. The set of albums is closed; two of the three
//! currently carry no line items.
//!
//! Template names may contain the `{n}` placeholder, which is replaced by
//! the auto-sized collector outlet count when the BOM is materialized.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Placeholder token substituted with the collector outlet count
pub const OUTLETS_PLACEHOLDER: &str = "{n}";

/// KUU album type assigned to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumType {
    /// Floor collector
    #[default]
    Collector,
    /// Floor collector with connection in front of the apartment
    CollectorPreApt,
    /// Connection in front of the apartment
    PreApt,
}

impl AlbumType {
    /// All album types in display order
    pub const ALL: [AlbumType; 3] = [AlbumType::Collector, AlbumType::CollectorPreApt, AlbumType::PreApt];

    /// Display name of the album
    pub fn display_name(&self) -> &'static str {
        match self {
            AlbumType::Collector => "Коллекторный",
            AlbumType::CollectorPreApt => "Коллекторный с подключением перед квартирой",
            AlbumType::PreApt => "С подключением перед квартирой",
        }
    }

    /// Template line items for this album (may be empty)
    pub fn template(&self) -> &'static [BomTemplateEntry] {
        match self {
            AlbumType::Collector => COLLECTOR_TEMPLATE.as_slice(),
            AlbumType::CollectorPreApt => &[],
            AlbumType::PreApt => &[],
        }
    }
}

/// One line of an album template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomTemplateEntry {
    /// Item name, optionally containing [`OUTLETS_PLACEHOLDER`]
    pub name_template: String,
    /// Quantity per apartment
    pub qty_per_apartment: u64,
    /// Unit of measure
    pub unit: String,
}

impl BomTemplateEntry {
    fn pieces(name_template: &str, qty_per_apartment: u64) -> Self {
        BomTemplateEntry {
            name_template: name_template.to_string(),
            qty_per_apartment,
            unit: "шт".to_string(),
        }
    }
}

static COLLECTOR_TEMPLATE: Lazy<Vec<BomTemplateEntry>> = Lazy::new(collector_template);

/// Floor-collector KUU: two of everything per apartment (cold + hot)
fn collector_template() -> Vec<BomTemplateEntry> {
    vec![
        BomTemplateEntry::pieces("Кран шаровый Ду 32", 2),
        BomTemplateEntry::pieces("Кран шаровый Ду 15", 2),
        BomTemplateEntry::pieces("Фильтр сетчатый косой Ду 32", 2),
        BomTemplateEntry::pieces("Регулятор давления Ду 32", 2),
        BomTemplateEntry::pieces("Манометр", 2),
        BomTemplateEntry::pieces("Коллектор на {n} подключений", 2),
        BomTemplateEntry::pieces("Кран сливной Ду 15", 2),
    ]
}
