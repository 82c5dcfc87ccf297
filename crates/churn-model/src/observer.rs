//! Property-changed observer list.

use core::fmt;

use smallvec::SmallVec;

/// Unique identifier for a subscription on one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    /// Create a new subscription ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Bindable properties shared by every tile model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Text,
    StrokeThickness,
}

impl Property {
    /// Name used in change notifications.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::StrokeThickness => "stroke_thickness",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload delivered to subscribers after a property changed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChanged {
    pub property: Property,
}

impl PropertyChanged {
    /// Name of the property that changed.
    #[must_use]
    pub const fn property_name(&self) -> &'static str {
        self.property.name()
    }
}

/// Boxed change handler.
pub type PropertyHandler = Box<dyn Fn(&PropertyChanged) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    handler: PropertyHandler,
}

/// Subscribers of one model instance.
///
/// Dispatch is synchronous and in subscription order. Handlers must not
/// reach back into the model that is notifying them.
#[derive(Default)]
pub struct ChangeObservers {
    // Almost always zero or one subscriber (the binding layer).
    subscribers: SmallVec<[Subscriber; 1]>,
    next_id: u32,
}

impl ChangeObservers {
    /// Create an empty observer list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    pub fn add(&mut self, handler: PropertyHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, handler });
        id
    }

    /// Remove a handler. Returns `false` if the id was not subscribed.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.iter().position(|s| s.id == id) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Call every handler with `event`.
    pub fn notify(&self, event: &PropertyChanged) {
        for subscriber in &self.subscribers {
            (subscriber.handler)(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for ChangeObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeObservers")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
