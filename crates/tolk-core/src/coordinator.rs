//! Runs translations off the UI context and hands results back to it.
//!
//! All slot state lives in [`Coordinator`] and is only touched from the context that owns it.
//! Background tasks never look at that state: they report a [`CoordinatorEvent`] over a channel
//! and the owner feeds it back through [`Coordinator::handle`], which is where tokens are
//! compared and stale completions dropped.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tolk_config::coordinator::CoordinatorConfig;
use tolk_translator::{TranslationError, TranslationRequest, TranslationResult, Translator};

pub type Outcome = Result<TranslationResult, TranslationError>;

/// One logical input, e.g. a text box or a conversation log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMode {
    /// A newer submit supersedes everything before it
    Latest,
    /// Every dispatched request is delivered
    Every,
}

/// Identifies one submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingRequestToken {
    slot: SlotId,
    seq: u64,
}

impl PendingRequestToken {
    pub fn slot(&self) -> SlotId {
        self.slot
    }
}

/// A finished request that is still wanted by its slot
#[derive(Debug)]
pub struct Delivery {
    pub token: PendingRequestToken,
    pub request: TranslationRequest,
    pub outcome: Outcome,
}

/// Background notification, to be passed to [`Coordinator::handle`] on the owning context
#[derive(Debug)]
pub struct CoordinatorEvent(Event);

#[derive(Debug)]
enum Event {
    Completed {
        token: PendingRequestToken,
        request: TranslationRequest,
        outcome: Outcome,
    },
    DebounceElapsed {
        token: PendingRequestToken,
    },
}

struct Pending {
    token: PendingRequestToken,
    request: TranslationRequest,
    timer: AbortHandle,
}

struct Slot {
    mode: SlotMode,
    /// Only meaningful for `SlotMode::Latest`
    current: Option<u64>,
    pending: Option<Pending>,
    in_flight: HashMap<u64, AbortHandle>,
}

impl Slot {
    fn new(mode: SlotMode) -> Self {
        Self {
            mode,
            current: None,
            pending: None,
            in_flight: HashMap::new(),
        }
    }
}

pub struct Coordinator {
    translator: Arc<dyn Translator>,
    runtime: Handle,
    debounce: Duration,
    cancel_superseded: bool,
    slots: HashMap<SlotId, Slot>,
    next_slot: u32,
    next_seq: u64,
    events_tx: AsyncSender<CoordinatorEvent>,
    events_rx: AsyncReceiver<CoordinatorEvent>,
}

impl Coordinator {
    /// Spawns onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, use [`Coordinator::with_handle`] there.
    pub fn new(translator: Arc<dyn Translator>, config: &CoordinatorConfig) -> Self {
        Self::with_handle(translator, config, Handle::current())
    }

    pub fn with_handle(
        translator: Arc<dyn Translator>,
        config: &CoordinatorConfig,
        runtime: Handle,
    ) -> Self {
        let (events_tx, events_rx) = kanal::unbounded_async();

        Self {
            translator,
            runtime,
            debounce: config.debounce(),
            cancel_superseded: config.cancel_superseded,
            slots: HashMap::new(),
            next_slot: 0,
            next_seq: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn open_slot(&mut self, mode: SlotMode) -> SlotId {
        let id = SlotId(self.next_slot);
        self.next_slot += 1;
        self.slots.insert(id, Slot::new(mode));
        id
    }

    /// Dispatch `request` right away
    pub fn submit(&mut self, slot: SlotId, request: TranslationRequest) -> PendingRequestToken {
        let token = self.mint(slot);
        self.supersede(token);
        self.dispatch(token, request);
        token
    }

    /// Dispatch `request` once the slot has been quiet for the debounce window.
    ///
    /// A later debounced submit on the same slot replaces this one before it is sent.
    pub fn submit_debounced(
        &mut self,
        slot: SlotId,
        request: TranslationRequest,
    ) -> PendingRequestToken {
        let token = self.mint(slot);
        self.supersede(token);

        let tx = self.events_tx.clone();
        let debounce = self.debounce;
        let timer = self
            .runtime
            .spawn(async move {
                tokio::time::sleep(debounce).await;
                let elapsed = CoordinatorEvent(Event::DebounceElapsed { token });
                if tx.send(elapsed).await.is_err() {
                    tracing::debug!("Coordinator dropped before debounce elapsed");
                }
            })
            .abort_handle();

        let replaced = self.slot_mut(slot).pending.replace(Pending {
            token,
            request,
            timer,
        });
        if let Some(replaced) = replaced {
            replaced.timer.abort();
        }

        token
    }

    /// Forget everything submitted to `slot` so far
    pub fn clear(&mut self, slot: SlotId) {
        let cancel = self.cancel_superseded;
        let Some(state) = self.slots.get_mut(&slot) else {
            return;
        };

        if let Some(pending) = state.pending.take() {
            pending.timer.abort();
        }
        state.current = None;
        for (_, task) in state.in_flight.drain() {
            if cancel {
                task.abort();
            }
        }
    }

    /// Receiver to select on without borrowing the coordinator
    pub fn events(&self) -> AsyncReceiver<CoordinatorEvent> {
        self.events_rx.clone()
    }

    /// Apply one background event. Returns the delivery if it is still wanted.
    pub fn handle(&mut self, event: CoordinatorEvent) -> Option<Delivery> {
        match event.0 {
            Event::DebounceElapsed { token } => {
                let state = self.slots.get_mut(&token.slot)?;
                match state.pending.take() {
                    Some(pending) if pending.token == token => {
                        self.dispatch(pending.token, pending.request);
                    }
                    other => state.pending = other,
                }
                None
            }
            Event::Completed {
                token,
                request,
                outcome,
            } => {
                let state = self.slots.get_mut(&token.slot)?;

                if state.in_flight.remove(&token.seq).is_none() {
                    tracing::debug!("Dropping completion {} for cleared request", token.seq);
                    return None;
                }

                if state.mode == SlotMode::Latest {
                    if state.current != Some(token.seq) {
                        tracing::debug!("Dropping stale completion {}", token.seq);
                        return None;
                    }
                    state.current = None;
                }

                Some(Delivery {
                    token,
                    request,
                    outcome,
                })
            }
        }
    }

    /// Wait for the next delivery
    pub async fn next(&mut self) -> Option<Delivery> {
        loop {
            let event = self.events_rx.recv().await.ok()?;
            if let Some(delivery) = self.handle(event) {
                return Some(delivery);
            }
        }
    }

    /// Non-blocking variant of [`Coordinator::next`] for UIs that poll
    pub fn try_next(&mut self) -> Option<Delivery> {
        while let Ok(Some(event)) = self.events_rx.try_recv() {
            if let Some(delivery) = self.handle(event) {
                return Some(delivery);
            }
        }
        None
    }

    /// Number of dispatched requests on `slot` that have not reported back
    pub fn in_flight(&self, slot: SlotId) -> usize {
        self.slots.get(&slot).map_or(0, |s| s.in_flight.len())
    }

    /// Nothing pending and nothing wanted from in-flight calls
    pub fn is_idle(&self, slot: SlotId) -> bool {
        self.slots.get(&slot).is_none_or(|s| {
            s.pending.is_none()
                && match s.mode {
                    SlotMode::Latest => s.current.is_none(),
                    SlotMode::Every => s.in_flight.is_empty(),
                }
        })
    }

    fn mint(&mut self, slot: SlotId) -> PendingRequestToken {
        self.next_seq += 1;
        PendingRequestToken {
            slot,
            seq: self.next_seq,
        }
    }

    fn slot_mut(&mut self, slot: SlotId) -> &mut Slot {
        self.slots
            .entry(slot)
            .or_insert_with(|| Slot::new(SlotMode::Latest))
    }

    /// Make `token` the current one on a latest-wins slot
    fn supersede(&mut self, token: PendingRequestToken) {
        let cancel = self.cancel_superseded;
        let state = self.slot_mut(token.slot);
        if state.mode != SlotMode::Latest {
            return;
        }

        state.current = Some(token.seq);
        if let Some(pending) = state.pending.take() {
            tracing::trace!("Debounced request {} replaced by {}", pending.token.seq, token.seq);
            pending.timer.abort();
        }
        if cancel {
            for (seq, task) in state.in_flight.drain() {
                tracing::debug!("Aborting superseded request {seq}");
                task.abort();
            }
        }
    }

    fn dispatch(&mut self, token: PendingRequestToken, request: TranslationRequest) {
        let translator = Arc::clone(&self.translator);
        let tx = self.events_tx.clone();

        tracing::debug!(
            "Dispatching request {} ({} -> {})",
            token.seq,
            request.source_lang(),
            request.target_lang()
        );

        let task = self.runtime.spawn(async move {
            let outcome = match AssertUnwindSafe(translator.translate(&request))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!("Translation task panicked: {message}");
                    Err(TranslationError::internal(message))
                }
            };

            let event = CoordinatorEvent(Event::Completed {
                token,
                request,
                outcome,
            });
            if tx.send(event).await.is_err() {
                tracing::debug!("Coordinator gone, completion {} dropped", token.seq);
            }
        });

        self.slot_mut(token.slot)
            .in_flight
            .insert(token.seq, task.abort_handle());
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        for slot in self.slots.values_mut() {
            if let Some(pending) = slot.pending.take() {
                pending.timer.abort();
            }
            for (_, task) in slot.in_flight.drain() {
                task.abort();
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "translation task panicked".to_string()
    }
}
