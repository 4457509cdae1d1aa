//! Timer driver for the typing state machine
//!
//! Each animator owns one Tokio task that sleeps for the phase delay, applies
//! `step`, and hands any changed text to the update callback. The callback
//! sits in a mutex-guarded slot; `stop` empties the slot under the lock and
//! aborts the task, so once it returns no further update can be delivered.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{step, AnimatorError, AnimatorState, PhraseList, Timings};

type UpdateFn = Box<dyn FnMut(&str) + Send + 'static>;

/// Callback slot shared between the animator handle and its task
#[derive(Clone)]
struct Sink(Arc<Mutex<Option<UpdateFn>>>);

impl Sink {
    fn new(on_update: UpdateFn) -> Self {
        Self(Arc::new(Mutex::new(Some(on_update))))
    }

    fn lock(&self) -> MutexGuard<'_, Option<UpdateFn>> {
        // The slot holds no invariant a panicking callback could break
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Deliver `text`; returns false once the sink has been closed
    fn emit(&self, text: &str) -> bool {
        match self.lock().as_mut() {
            Some(on_update) => {
                on_update(text);
                true
            }
            None => false,
        }
    }

    /// Drop the callback; returns true if it was still installed
    fn close(&self) -> bool {
        self.lock().take().is_some()
    }
}

pub struct TypingAnimator {
    sink: Sink,
    task: Option<JoinHandle<()>>,
}

impl TypingAnimator {
    /// Start cycling through `phrases`, calling `on_update` on every change.
    ///
    /// `on_update` receives the initial empty text before this returns. Must be
    /// called from within a Tokio runtime.
    pub fn start<F>(phrases: Vec<String>, timings: Timings, on_update: F) -> Result<Self, AnimatorError>
    where
        F: FnMut(&str) + Send + 'static,
    {
        let phrases = PhraseList::new(phrases)?;
        let sink = Sink::new(Box::new(on_update));

        let state = AnimatorState::default();
        sink.emit(state.displayed(&phrases));

        tracing::info!(
            "Starting typing animator ({} phrases, type {}ms, delete {}ms, pause {}ms)",
            phrases.len(),
            timings.typing.as_millis(),
            timings.deleting.as_millis(),
            timings.pause.as_millis(),
        );

        let task = tokio::spawn(run(phrases, timings, state, sink.clone()));

        Ok(Self {
            sink,
            task: Some(task),
        })
    }

    /// Start an animator whose updates are published to a watch channel.
    ///
    /// The channel keeps only the latest text, so a reader slower than the
    /// tick rate skips intermediate prefixes. Use `start` to see every update.
    pub fn start_watch(
        phrases: Vec<String>,
        timings: Timings,
    ) -> Result<(Self, watch::Receiver<String>), AnimatorError> {
        let (tx, rx) = watch::channel(String::new());
        let animator = Self::start(phrases, timings, move |text| {
            tx.send_replace(text.to_string());
        })?;
        Ok((animator, rx))
    }

    /// Stop the animation. Safe to call more than once.
    pub fn stop(&mut self) {
        let was_running = self.sink.close();

        if let Some(task) = self.task.take() {
            task.abort();
        }

        if was_running {
            tracing::info!("Typing animator stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.sink.lock().is_some()
    }
}

impl Drop for TypingAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One-shot delay re-armed after every transition
async fn run(phrases: PhraseList, timings: Timings, mut state: AnimatorState, sink: Sink) {
    loop {
        tokio::time::sleep(timings.delay_for(state.phase)).await;

        let (next, text) = step(state, &phrases);
        if next.index != state.index {
            tracing::debug!("Advancing to phrase {}: {:?}", next.index, phrases.get(next.index));
        } else if next.phase != state.phase {
            tracing::debug!("Typing phase {:?} -> {:?}", state.phase, next.phase);
        }
        state = next;

        if let Some(text) = text {
            if !sink.emit(text) {
                return;
            }
        }
    }
}
