//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (RNG seeding)
//! - DOM event subscriptions

/// Milliseconds since the Unix epoch, used to seed a run
#[cfg(target_arch = "wasm32")]
pub fn now_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub use subscription::{Subscription, listen};

#[cfg(target_arch = "wasm32")]
mod subscription {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget};

    /// A registered event listener. Dropping it removes the listener.
    pub struct Subscription {
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    }

    impl Drop for Subscription {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
            log::debug!("Unsubscribed from {}", self.event);
        }
    }

    /// Register `handler` for `event` on `target`
    pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Subscription, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Subscription {
            target: target.clone(),
            event,
            closure,
        })
    }
}
