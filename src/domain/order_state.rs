use serde::{Deserialize, Serialize};

/// Order states an order may enter while awaiting payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    New,
    PendingPayment,
    Holded,
}

impl OrderState {
    /// Checked in this order; the first state owning a status wins.
    pub const CANDIDATES: [OrderState; 3] = [Self::New, Self::PendingPayment, Self::Holded];
}

/// The order system's mapping from states to the statuses they contain.
pub trait StatusCatalog: Send + Sync {
    fn statuses(&self, state: OrderState) -> Vec<String>;
}

/// Maps a configured status to the state that owns it.
///
/// `None` means the status belongs to none of the candidate states; callers
/// leave the state unresolved instead of aborting.
pub fn resolve_order_state(catalog: &dyn StatusCatalog, status: &str) -> Option<OrderState> {
    OrderState::CANDIDATES
        .into_iter()
        .find(|state| catalog.statuses(*state).iter().any(|s| s == status))
}
