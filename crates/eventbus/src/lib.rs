//! C4 — the durable event log plus its live SSE fan-out.

mod bus;
mod durable;

pub use bus::{EventBus, EventBusError, SseMessage, Subscription, SystemGreeting, MAX_SSE_CLIENTS, REPLAY_CAP};
pub use durable::{DurableLog, DurableLogError, InMemoryDurableLog};
