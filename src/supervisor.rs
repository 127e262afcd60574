//! Fault boundary for the page body.
//!
//! `guard` runs a render closure, catching both returned errors and
//! panics. The first fault is logged and latched; until `retry` clears it
//! every `guard` call short-circuits so the caller keeps showing its
//! fallback. There is no automatic retry.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("missing content: {0}")]
    MissingContent(&'static str),
    #[error("invalid content in {section}: {reason}")]
    InvalidContent { section: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub context: String,
    pub message: String,
    /// Render generation the fault happened in.
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct Supervisor {
    fault: RefCell<Option<Fault>>,
    generation: Cell<u64>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard<T>(
        &self,
        context: &str,
        render: impl FnOnce() -> Result<T, RenderError>,
    ) -> Result<T, Fault> {
        if let Some(fault) = self.fault.borrow().as_ref() {
            return Err(fault.clone());
        }

        let message = match panic::catch_unwind(AssertUnwindSafe(render)) {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(&*payload),
        };

        let fault = Fault {
            context: context.to_string(),
            message,
            generation: self.generation.get(),
        };
        tracing::error!(
            context = %fault.context,
            generation = fault.generation,
            "Portfolio error: {}",
            fault.message
        );
        *self.fault.borrow_mut() = Some(fault.clone());
        Err(fault)
    }

    #[cfg(test)]
    pub fn has_fault(&self) -> bool {
        self.fault.borrow().is_some()
    }

    /// Clear the fault and start a fresh render generation.
    pub fn retry(&self) -> u64 {
        self.fault.borrow_mut().take();
        let next = self.generation.get() + 1;
        self.generation.set(next);
        tracing::info!(generation = next, "Retrying page render");
        next
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_render_passes_through() {
        let sup = Supervisor::new();
        assert_eq!(sup.guard("page", || Ok(42)), Ok(42));
        assert!(!sup.has_fault());
    }

    #[test]
    fn test_error_latches_fallback() {
        let sup = Supervisor::new();
        let err = sup
            .guard::<()>("page", || Err(RenderError::MissingContent("projects")))
            .unwrap_err();
        assert_eq!(err.context, "page");
        assert!(err.message.contains("projects"));

        // While faulted the closure is not even run.
        let mut ran = false;
        assert!(sup.guard("page", || {
            ran = true;
            Ok(())
        })
        .is_err());
        assert!(!ran);
    }

    #[test]
    fn test_panic_is_caught() {
        let sup = Supervisor::new();
        let fault = sup.guard::<()>("hero", || panic!("boom")).unwrap_err();
        assert_eq!(fault.message, "boom");
        assert!(sup.has_fault());
    }

    #[test]
    fn test_retry_rerenders_subtree() {
        let sup = Supervisor::new();
        let _ = sup.guard::<()>("page", || panic!("first render fails"));
        assert_eq!(sup.retry(), 1);
        assert!(!sup.has_fault());
        assert_eq!(sup.guard("page", || Ok("rendered")), Ok("rendered"));
        assert_eq!(sup.generation(), 1);
    }

    #[test]
    fn test_fault_records_generation() {
        let sup = Supervisor::new();
        sup.retry();
        sup.retry();
        let fault = sup
            .guard::<()>("page", || {
                Err(RenderError::InvalidContent { section: "about", reason: "empty".into() })
            })
            .unwrap_err();
        assert_eq!(fault.generation, 2);
        assert_eq!(fault.message, "invalid content in about: empty");
    }
}
