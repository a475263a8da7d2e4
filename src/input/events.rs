//! Notifications raised by the input manager

/// Something observable happened to the set of configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputManagerEvent {
    /// The active configuration changed
    ConfigurationChanged { name: String },
    /// A configuration was modified at runtime
    ConfigurationDirty { name: String },
    /// Configurations were replaced from a loader
    Loaded,
    /// Configurations were handed to a saver
    Saved,
}

/// Receiver for [`InputManagerEvent`]s
///
/// Listeners are called synchronously, in registration order, at the point the
/// event occurs. Closures taking `&InputManagerEvent` implement this trait.
pub trait InputListener {
    fn on_event(&mut self, event: &InputManagerEvent);
}

impl<F> InputListener for F
where
    F: FnMut(&InputManagerEvent),
{
    fn on_event(&mut self, event: &InputManagerEvent) {
        self(event)
    }
}

/// Token returned by `subscribe`; pass it back to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "dropping the token makes the listener impossible to unsubscribe"]
pub struct Subscription(u64);

/// Ordered list of listeners keyed by subscription
#[derive(Default)]
pub(crate) struct EventDispatcher {
    next_id: u64,
    listeners: Vec<(Subscription, Box<dyn InputListener>)>,
}

impl EventDispatcher {
    pub fn subscribe(&mut self, listener: Box<dyn InputListener>) -> Subscription {
        let token = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((token, listener));
        token
    }

    /// Returns false if the token was unknown (already unsubscribed)
    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != token);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &InputManagerEvent) {
        for (_, listener) in &mut self.listeners {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}
