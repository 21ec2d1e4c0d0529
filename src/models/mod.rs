pub mod comparison;
pub mod edge;
pub mod item;
pub mod stats;

pub use comparison::{MatchedObservation, PriceBasis, ReferenceComparison};
pub use edge::{MatchEdge, MATCH_FLOOR};
pub use item::{
    ObservedFields, ObservedItem, ReferenceAttributes, ReferenceFields, ReferenceItem,
    SecondaryPrices, DEFAULT_CURRENCY,
};
pub use stats::PricingStats;
