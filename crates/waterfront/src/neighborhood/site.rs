use crate::proforma::DPA_ACRES;
use serde::Serialize;

const EAST_BOSTON_DPA_MAP: &str = "https://felt.com/embed/map/East-Boston-Designated-Port-Area-PvTqoiSzSGK2YxtGu2Z4OC?lat=42.371475&lon=-71.032965&zoom=14.284";

/// Facts about land zoned for marine-industrial use only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignatedPortArea {
    pub name: &'static str,
    pub acres: f64,
    pub current_homes: u32,
    /// Homes the current zoning permits.
    pub allowed_homes: u32,
    pub map_embed_url: &'static str,
}

impl DesignatedPortArea {
    pub fn east_boston() -> Self {
        Self {
            name: "East Boston Designated Port Area",
            acres: DPA_ACRES,
            current_homes: 0,
            allowed_homes: 0,
            map_embed_url: EAST_BOSTON_DPA_MAP,
        }
    }
}
