//! Item Presenter
//!
//! Per-row state machine behind `ItemView`. Attached rows follow their item;
//! a detached row ignores everything.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use list_model::{Item, ItemEvent, ItemFields, ItemId, SubscriptionId};

use super::gesture::{Gesture, GestureTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPhase {
    Attached,
    Detached,
}

/// Everything a row needs to draw itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    pub id: ItemId,
    pub fields: ItemFields,
    /// Set-only highlight marker
    pub highlighted: bool,
    pub phase: RowPhase,
}

type Sink = Rc<dyn Fn(&RowState)>;
type DetachHook = Box<dyn FnOnce(ItemId)>;

struct PresenterInner {
    item: Item,
    state: RefCell<RowState>,
    subscription: Cell<Option<SubscriptionId>>,
    gestures: GestureTable,
    sink: RefCell<Option<Sink>>,
    on_detach: RefCell<Option<DetachHook>>,
}

/// Shared handle to one row presenter
#[derive(Clone)]
pub struct ItemPresenter {
    inner: Rc<PresenterInner>,
}

impl ItemPresenter {
    /// Bind to `item`, subscribe to its notifications and render once
    pub fn new(item: Item) -> Self {
        let state = RowState {
            id: item.id(),
            fields: item.get(),
            highlighted: false,
            phase: RowPhase::Attached,
        };

        let inner = Rc::new_cyclic(|weak: &Weak<PresenterInner>| PresenterInner {
            item: item.clone(),
            state: RefCell::new(state),
            subscription: Cell::new(None),
            gestures: GestureTable::new()
                .bind(Gesture::Swap, with_presenter(weak, PresenterInner::swap))
                .bind(Gesture::Delete, with_presenter(weak, PresenterInner::delete))
                .bind(Gesture::Highlight, with_presenter(weak, PresenterInner::highlight)),
            sink: RefCell::new(None),
            on_detach: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let subscription = item.subscribe(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_item_event(event);
            }
        });
        inner.subscription.set(Some(subscription));
        log::debug!("[ROW] attached {}", item.id());

        inner.render();
        Self { inner }
    }

    pub fn id(&self) -> ItemId {
        self.inner.item.id()
    }

    pub fn item(&self) -> &Item {
        &self.inner.item
    }

    pub fn state(&self) -> RowState {
        self.inner.state.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    /// Handle a user gesture. Returns false once the row is detached.
    pub fn dispatch(&self, gesture: Gesture) -> bool {
        if !self.is_attached() {
            log::debug!("[ROW] {:?} ignored on detached {}", gesture, self.id());
            return false;
        }
        self.inner.gestures.dispatch(gesture)
    }

    /// Detach without touching the item, e.g. when it left the collection
    /// some other way. No-op once detached.
    pub fn release(&self) {
        if self.is_attached() {
            self.inner.detach();
        }
    }

    /// Install the render target and push the current state to it
    pub fn set_sink(&self, sink: impl Fn(&RowState) + 'static) {
        *self.inner.sink.borrow_mut() = Some(Rc::new(sink));
        self.inner.render();
    }

    pub fn clear_sink(&self) {
        self.inner.sink.borrow_mut().take();
    }

    /// Called once, with the item id, when the row detaches
    pub fn on_detach(&self, hook: impl FnOnce(ItemId) + 'static) {
        *self.inner.on_detach.borrow_mut() = Some(Box::new(hook));
    }
}

/// Gesture handler that forwards to a presenter method while it is alive
fn with_presenter(weak: &Weak<PresenterInner>, method: fn(&PresenterInner)) -> impl Fn() + 'static {
    let weak = weak.clone();
    move || {
        if let Some(inner) = weak.upgrade() {
            method(inner.as_ref());
        }
    }
}

impl PresenterInner {
    fn is_attached(&self) -> bool {
        self.state.borrow().phase == RowPhase::Attached
    }

    fn render(&self) {
        let state = self.state.borrow().clone();
        let sink = self.sink.borrow().clone();
        if let Some(sink) = sink {
            sink(&state);
        }
    }

    fn on_item_event(&self, event: &ItemEvent) {
        if !self.is_attached() {
            return;
        }
        match event {
            ItemEvent::Changed { current, .. } => {
                {
                    let mut state = self.state.borrow_mut();
                    state.fields = current.clone();
                    state.highlighted = true;
                }
                self.render();
            }
            ItemEvent::Removed => self.detach(),
        }
    }

    fn swap(&self) {
        let fields = self.item.get();
        self.item.set(fields.swapped().into());
    }

    fn delete(&self) {
        self.item.destroy();
    }

    fn highlight(&self) {
        let changed = {
            let mut state = self.state.borrow_mut();
            !std::mem::replace(&mut state.highlighted, true)
        };
        if changed {
            self.render();
        }
    }

    fn detach(&self) {
        self.state.borrow_mut().phase = RowPhase::Detached;
        if let Some(id) = self.subscription.take() {
            self.item.unsubscribe(id);
        }
        log::debug!("[ROW] detached {}", self.item.id());
        self.render();
        let hook = self.on_detach.borrow_mut().take();
        if let Some(hook) = hook {
            hook(self.item.id());
        }
    }
}

impl Drop for PresenterInner {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.item.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_model::{ItemCollection, ItemPatch};

    fn presenter_with_renders() -> (Item, ItemPresenter, Rc<RefCell<Vec<RowState>>>) {
        let item = Item::with_fields(ItemId(1), ItemFields::new("hello", "world1"));
        let presenter = ItemPresenter::new(item.clone());
        let renders = Rc::new(RefCell::new(Vec::new()));
        let r = renders.clone();
        presenter.set_sink(move |s| r.borrow_mut().push(s.clone()));
        (item, presenter, renders)
    }

    #[test]
    fn test_renders_on_construction() {
        let (_item, presenter, renders) = presenter_with_renders();
        let state = presenter.state();
        assert_eq!(state.fields, ItemFields::new("hello", "world1"));
        assert!(!state.highlighted);
        assert_eq!(state.phase, RowPhase::Attached);
        assert_eq!(renders.borrow().len(), 1);
    }

    #[test]
    fn test_swap_exchanges_and_highlights() {
        let (item, presenter, renders) = presenter_with_renders();

        assert!(presenter.dispatch(Gesture::Swap));

        assert_eq!(item.get(), ItemFields::new("world1", "hello"));
        let last = renders.borrow().last().cloned().unwrap();
        assert_eq!(last.fields, ItemFields::new("world1", "hello"));
        assert!(last.highlighted);
    }

    #[test]
    fn test_swap_twice_restores_but_stays_highlighted() {
        let (item, presenter, _renders) = presenter_with_renders();

        presenter.dispatch(Gesture::Swap);
        presenter.dispatch(Gesture::Swap);

        assert_eq!(item.get(), ItemFields::new("hello", "world1"));
        assert!(presenter.state().highlighted);
    }

    #[test]
    fn test_external_change_rerenders() {
        let (item, presenter, _renders) = presenter_with_renders();
        item.set(ItemPatch::part1("hi"));
        assert_eq!(presenter.state().fields.part1, "hi");
        assert!(presenter.state().highlighted);
    }

    #[test]
    fn test_highlight_gesture_is_set_only() {
        let (item, presenter, renders) = presenter_with_renders();

        presenter.dispatch(Gesture::Highlight);
        presenter.dispatch(Gesture::Highlight);

        assert!(presenter.state().highlighted);
        assert_eq!(item.get(), ItemFields::new("hello", "world1"));
        // initial render + one highlight render
        assert_eq!(renders.borrow().len(), 2);
    }

    #[test]
    fn test_delete_detaches_and_notifies_once() {
        let (item, presenter, renders) = presenter_with_renders();
        let detached = Rc::new(RefCell::new(Vec::new()));
        let d = detached.clone();
        presenter.on_detach(move |id| d.borrow_mut().push(id));

        assert!(presenter.dispatch(Gesture::Delete));

        assert!(item.is_destroyed());
        assert!(!presenter.is_attached());
        assert_eq!(*detached.borrow(), vec![ItemId(1)]);
        assert_eq!(renders.borrow().last().unwrap().phase, RowPhase::Detached);
        assert_eq!(item.subscriber_count(), 0);
    }

    #[test]
    fn test_detached_is_terminal() {
        let (item, presenter, renders) = presenter_with_renders();
        presenter.dispatch(Gesture::Delete);
        let count = renders.borrow().len();

        assert!(!presenter.dispatch(Gesture::Swap));
        assert!(!presenter.dispatch(Gesture::Highlight));
        assert!(!presenter.dispatch(Gesture::Delete));
        item.set(ItemPatch::part1("late"));

        assert_eq!(renders.borrow().len(), count);
        assert_eq!(presenter.state().fields.part1, "hello");
    }

    #[test]
    fn test_delete_removes_from_collection() {
        let collection = ItemCollection::new();
        let item = Item::new(ItemId(1));
        collection.add(item.clone());
        let presenter = ItemPresenter::new(item);

        presenter.dispatch(Gesture::Delete);

        assert!(collection.is_empty());
    }

    #[test]
    fn test_release_detaches_without_destroying() {
        let (item, presenter, renders) = presenter_with_renders();
        let detached = Rc::new(RefCell::new(Vec::new()));
        let d = detached.clone();
        presenter.on_detach(move |id| d.borrow_mut().push(id));

        presenter.release();
        presenter.release();

        assert!(!item.is_destroyed());
        assert!(!presenter.is_attached());
        assert_eq!(*detached.borrow(), vec![ItemId(1)]);
        assert_eq!(renders.borrow().last().unwrap().phase, RowPhase::Detached);
        assert_eq!(item.subscriber_count(), 0);

        item.set(ItemPatch::part1("after release"));
        assert_eq!(presenter.state().fields.part1, "hello");
    }

    #[test]
    fn test_dropping_presenter_unsubscribes() {
        let item = Item::new(ItemId(1));
        let presenter = ItemPresenter::new(item.clone());
        assert_eq!(item.subscriber_count(), 1);
        drop(presenter);
        assert_eq!(item.subscriber_count(), 0);
    }

    #[test]
    fn test_cleared_sink_receives_nothing() {
        let (item, presenter, renders) = presenter_with_renders();
        presenter.clear_sink();
        item.set(ItemPatch::part2("quiet"));
        assert_eq!(renders.borrow().len(), 1);
        assert_eq!(presenter.state().fields.part2, "quiet");
    }
}
