//! Row Gestures
//!
//! Clickable affordances on a row and the handler table they dispatch through.

use std::collections::HashMap;
use std::rc::Rc;

/// A click on one of a row's controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Swap,
    Delete,
    Highlight,
}

impl Gesture {
    /// Render order of the row controls
    pub const ALL: [Gesture; 3] = [Gesture::Swap, Gesture::Delete, Gesture::Highlight];

    /// CSS class of the control element
    pub fn class(&self) -> &'static str {
        match self {
            Gesture::Swap => "swap",
            Gesture::Delete => "delete",
            Gesture::Highlight => "highlight",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Swap => "[swap]",
            Gesture::Delete => "[delete]",
            Gesture::Highlight => "[highlight]",
        }
    }
}

/// Gesture → handler lookup, fixed at construction
#[derive(Clone, Default)]
pub struct GestureTable {
    handlers: HashMap<Gesture, Rc<dyn Fn()>>,
}

impl GestureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, gesture: Gesture, handler: impl Fn() + 'static) -> Self {
        self.handlers.insert(gesture, Rc::new(handler));
        self
    }

    /// Run the handler bound to `gesture`. Returns false if none is bound.
    pub fn dispatch(&self, gesture: Gesture) -> bool {
        match self.handlers.get(&gesture) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}
