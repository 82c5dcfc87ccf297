//! The two tile model variants.
//!
//! Both expose the same bindable surface. Only [`NotifyingTile`] implements
//! [`NotifyOnChange`]; a binding layer that cannot subscribe to a model has
//! to fall back to its own bookkeeping, which is where retention comes from.

use crate::observer::{
    ChangeObservers, Property, PropertyChanged, PropertyHandler, SubscriptionId,
};

/// Default tile caption.
pub const DEFAULT_TEXT: &str = "Tile";

/// Default stroke thickness.
pub const DEFAULT_STROKE_THICKNESS: f64 = 2.0;

/// Change-notification capability.
pub trait NotifyOnChange {
    /// Subscribe to property-changed events.
    fn subscribe(&mut self, handler: PropertyHandler) -> SubscriptionId;

    /// Drop a subscription. Returns `false` if it was not active.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Number of active subscriptions.
    fn subscriber_count(&self) -> usize;
}

/// Bindable tile data.
pub trait TileModel: Send + 'static {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: &str);

    fn stroke_thickness(&self) -> f64;

    fn set_stroke_thickness(&mut self, thickness: f64);

    /// Capability query: the model's notification surface, if it has one.
    fn notifier(&mut self) -> Option<&mut dyn NotifyOnChange> {
        None
    }
}

/// Tile model without change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainTile {
    text: String,
    stroke_thickness: f64,
}

impl Default for PlainTile {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
        }
    }
}

impl PlainTile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileModel for PlainTile {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn stroke_thickness(&self) -> f64 {
        self.stroke_thickness
    }

    fn set_stroke_thickness(&mut self, thickness: f64) {
        self.stroke_thickness = thickness;
    }
}

/// Tile model that raises a property-changed event on every real change.
#[derive(Debug)]
pub struct NotifyingTile {
    text: String,
    stroke_thickness: f64,
    observers: ChangeObservers,
}

impl Default for NotifyingTile {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
            observers: ChangeObservers::new(),
        }
    }
}

impl NotifyingTile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn raise(&self, property: Property) {
        self.observers.notify(&PropertyChanged { property });
    }
}

impl TileModel for NotifyingTile {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        text.clone_into(&mut self.text);
        self.raise(Property::Text);
    }

    fn stroke_thickness(&self) -> f64 {
        self.stroke_thickness
    }

    #[allow(clippy::float_cmp)]
    fn set_stroke_thickness(&mut self, thickness: f64) {
        if self.stroke_thickness == thickness {
            return;
        }
        self.stroke_thickness = thickness;
        self.raise(Property::StrokeThickness);
    }

    fn notifier(&mut self) -> Option<&mut dyn NotifyOnChange> {
        Some(self)
    }
}

impl NotifyOnChange for NotifyingTile {
    fn subscribe(&mut self, handler: PropertyHandler) -> SubscriptionId {
        self.observers.add(handler)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording_handler(log: &Arc<Mutex<Vec<&'static str>>>) -> PropertyHandler {
        let log = log.clone();
        Box::new(move |event| log.lock().push(event.property_name()))
    }

    #[test]
    fn test_defaults() {
        let plain = PlainTile::new();
        let notifying = NotifyingTile::new();

        assert_eq!(plain.text(), "Tile");
        assert_eq!(notifying.text(), "Tile");
        assert!((plain.stroke_thickness() - 2.0).abs() < f64::EPSILON);
        assert!((notifying.stroke_thickness() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_value_does_not_notify() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tile = NotifyingTile::new();
        tile.subscribe(recording_handler(&log));

        tile.set_text("Tile");
        tile.set_stroke_thickness(2.0);

        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_changed_value_notifies_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tile = NotifyingTile::new();
        tile.subscribe(recording_handler(&log));

        tile.set_text("X");

        assert_eq!(*log.lock(), vec!["text"]);
        assert_eq!(tile.text(), "X");

        tile.set_stroke_thickness(4.5);
        assert_eq!(*log.lock(), vec!["text", "stroke_thickness"]);
    }

    #[test]
    fn test_nan_write_always_notifies() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tile = NotifyingTile::new();
        tile.subscribe(recording_handler(&log));

        tile.set_stroke_thickness(f64::NAN);
        tile.set_stroke_thickness(f64::NAN);

        assert_eq!(*log.lock(), vec!["stroke_thickness", "stroke_thickness"]);
        assert!(tile.stroke_thickness().is_nan());
    }

    #[test]
    fn test_unsubscribed_handler_is_silent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tile = NotifyingTile::new();
        let id = tile.subscribe(recording_handler(&log));

        assert!(tile.unsubscribe(id));
        tile.set_text("Y");

        assert!(log.lock().is_empty());
        assert_eq!(tile.subscriber_count(), 0);
    }

    #[test]
    fn test_plain_has_no_notifier() {
        let mut plain = PlainTile::new();
        assert!(plain.notifier().is_none());

        plain.set_text("Tile");
        plain.set_text("Z");
        assert_eq!(plain.text(), "Z");
    }

    #[test]
    fn test_notifying_exposes_notifier() {
        let mut tile = NotifyingTile::new();
        let notifier = tile.notifier().expect("notifying tile has a notifier");
        let id = notifier.subscribe(Box::new(|_| {}));

        assert_eq!(notifier.subscriber_count(), 1);
        assert!(notifier.unsubscribe(id));
    }
}
