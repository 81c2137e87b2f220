//! Custom actions for the Order actor.
//!
//! Status only changes through these actions, each of which checks the current status
//! and writes the new one inside a single actor message.

use crate::model::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves the order one step forward (`pending -> confirmed -> shipped -> delivered`).
    Advance(OrderStatus),
    /// `pending -> cancelled`. Fails for any other current status.
    Cancel,
    /// `cancelled -> pending`. Only used to undo a cancellation whose stock release failed.
    Reopen,
}
