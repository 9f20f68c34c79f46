//! Equipment and stock inventory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Inventory grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Equipment,
    Supplies,
    #[serde(rename = "For Sale")]
    ForSale,
    Other,
}

/// Condition of equipment or stock level of goods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Operational,
    #[serde(rename = "Needs Maintenance")]
    NeedsMaintenance,
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    Out,
}

impl ItemStatus {
    /// Statuses that call for attention from staff
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            ItemStatus::NeedsMaintenance | ItemStatus::LowStock | ItemStatus::Out
        )
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ItemCategory::Equipment => "Equipment",
            ItemCategory::Supplies => "Supplies",
            ItemCategory::ForSale => "For Sale",
            ItemCategory::Other => "Other",
        })
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ItemStatus::Operational => "Operational",
            ItemStatus::NeedsMaintenance => "Needs Maintenance",
            ItemStatus::InStock => "In Stock",
            ItemStatus::LowStock => "Low Stock",
            ItemStatus::Out => "Out",
        })
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equipment" => Ok(ItemCategory::Equipment),
            "supplies" => Ok(ItemCategory::Supplies),
            "for sale" | "for-sale" => Ok(ItemCategory::ForSale),
            "other" => Ok(ItemCategory::Other),
            _ => Err(DomainError::validation(format!("Unknown category '{}'", s))),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', " ").as_str() {
            "operational" => Ok(ItemStatus::Operational),
            "needs maintenance" => Ok(ItemStatus::NeedsMaintenance),
            "in stock" => Ok(ItemStatus::InStock),
            "low stock" => Ok(ItemStatus::LowStock),
            "out" => Ok(ItemStatus::Out),
            _ => Err(DomainError::validation(format!("Unknown status '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: ItemCategory,
    pub quantity: u32,
    pub status: ItemStatus,
}

impl InventoryItem {
    pub fn new(name: String, category: ItemCategory, quantity: u32, status: ItemStatus) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Please fill out at least Name and Category."));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            category,
            quantity,
            status,
        })
    }
}
