//! Board representation and game-state types.
//!
//! Contains the engine-native data structures shared by every variant:
//! provinces, nations, units, orders, the topology graph and the per-phase
//! game state.

pub mod graph;
pub mod order;
pub mod province;
pub mod state;
pub mod unit;

pub use graph::{Edge, Graph, GraphBuilder, Node};
pub use order::{
    parse_order, parse_submission, IssuedOrder, Order, OrderError, OrderSubmission, OrderType,
    ALL_ORDER_TYPES,
};
pub use province::{Nation, Province, ProvinceType, COAST_SEPARATOR};
pub use state::{GameState, PhaseType, Season, ALL_PHASE_TYPES, ALL_SEASONS};
pub use unit::{Unit, UnitType, ALL_UNIT_TYPES};
