//! Cooperative dispatch.
//!
//! The whole application runs on one thread of control: activation checks,
//! goal status updates, and scan delivery all make progress only when a
//! waiting loop hands control back to the [`Spinner`]. `spin_some` runs
//! every registered task exactly once, so a task must do a bounded amount
//! of work per call and never block.

use std::sync::mpsc::Receiver;

/// Single-threaded "run any ready work once" dispatcher.
#[derive(Default)]
pub struct Spinner {
    tasks: Vec<Box<dyn FnMut()>>,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task invoked once per spin.
    pub fn add_task(&mut self, task: impl FnMut() + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Register a subscription: each spin drains all messages currently
    /// queued on `rx` and invokes `callback` per message, in arrival order.
    pub fn subscribe<T: 'static>(&mut self, rx: Receiver<T>, mut callback: impl FnMut(T) + 'static) {
        self.add_task(move || {
            while let Ok(msg) = rx.try_recv() {
                callback(msg);
            }
        });
    }

    /// Run every registered task once.
    pub fn spin_some(&mut self) {
        for task in &mut self.tasks {
            task();
        }
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
