//! Variant engines.
//!
//! A [`VariantEngine`] is the opaque collaborator that knows a variant's
//! rules: it produces the starting position, adjudicates a phase's orders
//! into the next phase, and supplies the pre-rendered map. The catalog never
//! looks past this trait.
//!
//! [`StandardEngine`] is the reference engine behind the bundled variants.
//! Its adjudication is standoff-only: every unit has equal strength, so
//! moves succeed into provinces that are empty or being vacated and bounce
//! otherwise. Supports and convoys are checked for plausibility and the unit
//! holds; no unit is ever dislodged by a movement phase.

pub mod adjustment;
pub mod movement;
pub mod phase;
pub mod retreat;
pub mod standard;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::{GameState, IssuedOrder, Province};
use crate::error::EngineError;

pub use standard::{StandardEngine, StartPosition};

/// The rules collaborator behind a variant.
pub trait VariantEngine: Send + Sync {
    /// Produces the variant's starting position.
    fn start(&self) -> Result<GameState, EngineError>;

    /// Adjudicates `orders` against `state` and advances to the next phase.
    fn resolve(&self, state: GameState, orders: &[IssuedOrder]) -> Result<Resolution, EngineError>;

    /// Returns the variant's map as SVG bytes.
    fn svg_map(&self) -> Result<Cow<'static, [u8]>, EngineError>;
}

/// The outcome of adjudicating one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The state of the following phase.
    pub state: GameState,
    /// Per-province outcome of every submitted order.
    pub results: BTreeMap<Province, OrderResult>,
}

/// The outcome of a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderResult {
    Succeeded,
    Bounced,
    MissingUnit,
    WrongNation,
    WrongPhase,
    IllegalMove,
    IllegalSupport,
    IllegalConvoy,
    NoConvoyPath,
    IllegalRetreat,
    IllegalBuild,
    IllegalDisband,
    ExcessAdjustment,
}

impl OrderResult {
    /// Returns the wire code for this outcome.
    pub const fn code(self) -> &'static str {
        match self {
            OrderResult::Succeeded => "OK",
            OrderResult::Bounced => "ErrBounce",
            OrderResult::MissingUnit => "ErrMissingUnit",
            OrderResult::WrongNation => "ErrWrongNation",
            OrderResult::WrongPhase => "ErrInvalidPhase",
            OrderResult::IllegalMove => "ErrIllegalMove",
            OrderResult::IllegalSupport => "ErrIllegalSupport",
            OrderResult::IllegalConvoy => "ErrIllegalConvoy",
            OrderResult::NoConvoyPath => "ErrMissingConvoyPath",
            OrderResult::IllegalRetreat => "ErrIllegalRetreat",
            OrderResult::IllegalBuild => "ErrIllegalBuild",
            OrderResult::IllegalDisband => "ErrIllegalDisband",
            OrderResult::ExcessAdjustment => "ErrExcessAdjustment",
        }
    }
}

impl Serialize for OrderResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
