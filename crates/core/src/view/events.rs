//! Ordered multi-subscriber event dispatch
//!
//! Listeners receive a mutable context alongside each event, so a listener
//! can update application state without reaching for globals. They run in
//! the order they subscribed.

use std::fmt;

/// State changes the space view reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Participants or triangles changed
    TrianglesUpdated,
    /// UI language switched to this code (`"en"`, `"fr"`, ...)
    LanguageChanged(String),
}

/// Returned by [`EventDispatcher::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<C, E> = Box<dyn FnMut(&mut C, &E)>;

/// Ordered list of listeners over a context `C` and event type `E`
pub struct EventDispatcher<C, E> {
    listeners: Vec<(ListenerId, Listener<C, E>)>,
    next_id: u64,
}

impl<C, E> EventDispatcher<C, E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a listener; it runs after every listener subscribed before it.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &E) + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it wasn't subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() < before
    }

    /// Invoke every listener in subscription order; returns how many ran.
    pub fn dispatch(&mut self, ctx: &mut C, event: &E) -> usize {
        for (_, listener) in &mut self.listeners {
            listener(ctx, event);
        }
        self.listeners.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<C, E> Default for EventDispatcher<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> fmt::Debug for EventDispatcher<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let mut bus: EventDispatcher<Vec<&'static str>, AppEvent> = EventDispatcher::new();
        bus.subscribe(|log, _| log.push("map"));
        bus.subscribe(|log, _| log.push("space"));
        bus.subscribe(|log, _| log.push("label"));

        let mut log = Vec::new();
        assert_eq!(bus.dispatch(&mut log, &AppEvent::TrianglesUpdated), 3);
        assert_eq!(log, vec!["map", "space", "label"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus: EventDispatcher<u32, AppEvent> = EventDispatcher::new();
        let first = bus.subscribe(|n, _| *n += 1);
        bus.subscribe(|n, _| *n += 10);

        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));

        let mut n = 0;
        bus.dispatch(&mut n, &AppEvent::TrianglesUpdated);
        assert_eq!(n, 10);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_listener_sees_event_payload() {
        let mut bus: EventDispatcher<String, AppEvent> = EventDispatcher::default();
        bus.subscribe(|lang, event| {
            if let AppEvent::LanguageChanged(code) = event {
                lang.clone_from(code);
            }
        });

        let mut lang = String::from("en");
        bus.dispatch(&mut lang, &AppEvent::LanguageChanged("de".into()));
        assert_eq!(lang, "de");
        assert!(!bus.is_empty());
    }
}
