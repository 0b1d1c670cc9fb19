//! Static reference data shown alongside the pro forma.

mod households;
mod site;

pub use households::{
    HouseholdTableLoader, IncomeBand, NeighborhoodDataError, NeighborhoodProfile,
    EAST_BOSTON_INCOME_RESTRICTED_HOMES, EAST_BOSTON_TOTAL_HOUSEHOLDS,
};
pub use site::DesignatedPortArea;
