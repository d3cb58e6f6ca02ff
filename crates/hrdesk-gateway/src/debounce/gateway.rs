//! Debounced input gateway (tokio timers).
//!
//! Lifecycle: Idle -> Scheduled -> Idle (fire or cancel), Disposed from any
//! state. A pending emission is a spawned task sleeping until its deadline.
//! Each schedule bumps `generation`; a task only fires if its generation is
//! still the scheduled one, and it commits the fire (phase -> Idle) under the
//! lock before calling the sink outside it. Once committed, cancellation can
//! no longer reach it.

use std::sync::{Arc, Mutex, MutexGuard};

use hrdesk_core::error::{DeskError, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::obs::metrics::{DeskMetrics, EV_CANCELED, EV_DELIVERED, EV_SUBMITTED, EV_SUPERSEDED};

pub const DEFAULT_DELAY_MS: u64 = 300;

/// Quiet period before a value is considered settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DELAY_MS)
    }
}

impl DebounceConfig {
    /// `delay_ms = 0` delivers synchronously; negative values are rejected.
    pub fn new(delay_ms: i64) -> Result<Self> {
        let ms = u64::try_from(delay_ms).map_err(|_| {
            DeskError::InvalidConfig(format!("debounce delay_ms must be >= 0, got {delay_ms}"))
        })?;
        Ok(Self::from_millis(ms))
    }

    pub fn from_millis(ms: u64) -> Self {
        Self { delay: Duration::from_millis(ms) }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}

/// Downstream consumer of settled values.
///
/// Panics raised here are the caller's problem: the gateway has already
/// returned to Idle before the sink runs.
pub trait SettledSink: Send + Sync {
    fn on_settled(&self, value: String);
}

impl<F> SettledSink for F
where
    F: Fn(String) + Send + Sync,
{
    fn on_settled(&self, value: String) {
        self(value)
    }
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Idle,
    Scheduled,
    Disposed,
}

enum Phase {
    Idle,
    Scheduled { generation: u64, task: JoinHandle<()> },
    Disposed,
}

struct Slot {
    delay: Duration,
    generation: u64,
    phase: Phase,
}

struct Shared {
    field: String,
    slot: Mutex<Slot>,
    sink: Arc<dyn SettledSink>,
    metrics: Arc<DeskMetrics>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A panic while holding the lock leaves the slot consistent (every
        // critical section is a single phase swap), so recover the guard.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn deliver(&self, value: String) {
        self.metrics.debounce(&self.field, EV_DELIVERED);
        self.sink.on_settled(value);
    }

    fn fire(&self, generation: u64, value: String) {
        {
            let mut slot = self.lock();
            match &slot.phase {
                Phase::Scheduled { generation: g, .. } if *g == generation => {}
                _ => return,
            }
            slot.phase = Phase::Idle;
        }
        tracing::trace!(field = %self.field, generation, "debounce fired");
        self.deliver(value);
    }
}

/// One debounced input. Not `Clone`; share via `Arc` if needed.
pub struct DebounceGateway {
    shared: Arc<Shared>,
}

impl DebounceGateway {
    pub fn new(config: DebounceConfig, sink: impl SettledSink + 'static) -> Self {
        Self::with_parts("input", config, Arc::new(sink), Arc::new(DeskMetrics::default()))
    }

    /// Gateway labelled `field`, reporting into shared metrics.
    pub fn with_parts(
        field: impl Into<String>,
        config: DebounceConfig,
        sink: Arc<dyn SettledSink>,
        metrics: Arc<DeskMetrics>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                field: field.into(),
                slot: Mutex::new(Slot {
                    delay: config.delay(),
                    generation: 0,
                    phase: Phase::Idle,
                }),
                sink,
                metrics,
            }),
        }
    }

    pub fn field(&self) -> &str {
        &self.shared.field
    }

    pub fn state(&self) -> GatewayState {
        match self.shared.lock().phase {
            Phase::Idle => GatewayState::Idle,
            Phase::Scheduled { .. } => GatewayState::Scheduled,
            Phase::Disposed => GatewayState::Disposed,
        }
    }

    pub fn delay(&self) -> Duration {
        self.shared.lock().delay
    }

    /// Change the quiet period. A pending emission keeps its original deadline.
    pub fn configure(&self, delay_ms: i64) -> Result<()> {
        let mut slot = self.shared.lock();
        if matches!(slot.phase, Phase::Disposed) {
            return Err(DeskError::Disposed);
        }
        slot.delay = DebounceConfig::new(delay_ms)?.delay();
        tracing::debug!(field = %self.shared.field, delay_ms, "debounce reconfigured");
        Ok(())
    }

    /// Record a new candidate value.
    ///
    /// With a zero delay the sink runs before this returns. Otherwise any
    /// pending emission is superseded and a new one is scheduled; that path
    /// needs a tokio runtime on the calling thread.
    pub fn submit(&self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let shared = &self.shared;
        let mut slot = shared.lock();
        if matches!(slot.phase, Phase::Disposed) {
            return Err(DeskError::Disposed);
        }

        let runtime = if slot.delay.is_zero() {
            None
        } else {
            Some(Handle::try_current().map_err(|_| {
                DeskError::Internal("no async runtime to schedule debounce timer".into())
            })?)
        };

        shared.metrics.debounce(&shared.field, EV_SUBMITTED);
        if let Phase::Scheduled { generation, task } = std::mem::replace(&mut slot.phase, Phase::Idle) {
            task.abort();
            shared.metrics.debounce(&shared.field, EV_SUPERSEDED);
            tracing::debug!(field = %shared.field, generation, "pending emission superseded");
        }
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        let Some(runtime) = runtime else {
            drop(slot);
            shared.deliver(value);
            return Ok(());
        };

        let deadline = Instant::now() + slot.delay;
        let task_shared = Arc::clone(shared);
        let task = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task_shared.fire(generation, value);
        });
        slot.phase = Phase::Scheduled { generation, task };
        tracing::debug!(field = %shared.field, generation, delay_ms = slot.delay.as_millis() as u64, "emission scheduled");
        Ok(())
    }

    /// Drop the pending emission, if any. Returns whether one was dropped.
    pub fn cancel_pending(&self) -> bool {
        let mut slot = self.shared.lock();
        match std::mem::replace(&mut slot.phase, Phase::Idle) {
            Phase::Scheduled { generation, task } => {
                task.abort();
                self.shared.metrics.debounce(&self.shared.field, EV_CANCELED);
                tracing::debug!(field = %self.shared.field, generation, "pending emission canceled");
                true
            }
            other => {
                slot.phase = other;
                false
            }
        }
    }

    /// Cancel pending work and refuse further input. Idempotent.
    pub fn dispose(&self) {
        let mut slot = self.shared.lock();
        match std::mem::replace(&mut slot.phase, Phase::Disposed) {
            Phase::Disposed => return,
            Phase::Scheduled { task, .. } => {
                task.abort();
                self.shared.metrics.debounce(&self.shared.field, EV_CANCELED);
            }
            Phase::Idle => {}
        }
        tracing::info!(field = %self.shared.field, "debounce gateway disposed");
    }
}

impl Drop for DebounceGateway {
    fn drop(&mut self) {
        let mut slot = self.shared.lock();
        if let Phase::Scheduled { task, .. } = std::mem::replace(&mut slot.phase, Phase::Disposed) {
            task.abort();
        }
    }
}
