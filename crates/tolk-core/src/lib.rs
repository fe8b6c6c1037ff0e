pub mod coordinator;
pub mod history;
pub mod phrases;
pub mod speech;
pub mod state;

#[cfg(test)]
mod tests;

pub use coordinator::{
    Coordinator, CoordinatorEvent, Delivery, Outcome, PendingRequestToken, SlotId, SlotMode,
};
pub use history::{HistoryEntry, TranslationHistory};
