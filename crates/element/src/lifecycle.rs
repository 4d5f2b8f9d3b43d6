//! Lifecycle controller.
//!
//! Registered pipelines are subscribed on every connect and torn down on every
//! disconnect, so subscriptions only exist while the host is in the document.
//! Attribute change notifications are routed back into property cells here
//! too.

use crate::codec::decode;
use crate::host::Host;
use crate::log::debug_log;
use crate::table::PropertyTable;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::mem;
use wisp_core::Result;
use wisp_reactive::{Stream, Subject, Subscription, SubscriptionSet};

type Pipeline = Rc<dyn Fn() -> Subscription>;

/// Binds reactive pipelines to a host's connect/disconnect signals.
pub struct LifecycleController<H> {
    host: Rc<H>,
    table: PropertyTable<H>,
    pipelines: RefCell<Vec<Pipeline>>,
    active: RefCell<SubscriptionSet>,
    connected: Cell<bool>,
    on_connect: Subject<()>,
    on_disconnect: Subject<()>,
}

impl<H: Host> LifecycleController<H> {
    pub fn new(host: Rc<H>, table: PropertyTable<H>) -> Self {
        Self {
            host,
            table,
            pipelines: RefCell::new(Vec::new()),
            active: RefCell::new(SubscriptionSet::new()),
            connected: Cell::new(false),
            on_connect: Subject::new(),
            on_disconnect: Subject::new(),
        }
    }

    /// Registers a pipeline for every future connect.
    ///
    /// A pipeline registered while connected stays idle until the next
    /// connect.
    pub fn register<T: Clone + 'static>(&self, pipeline: Stream<T>) {
        self.pipelines
            .borrow_mut()
            .push(Rc::new(move || pipeline.subscribe(|_| {})));
    }

    /// Subscribes every registered pipeline, then signals `connected`.
    ///
    /// Connecting while connected first tears down the current subscriptions.
    pub fn connect(&self) {
        if self.connected.get() {
            self.teardown();
        }
        self.connected.set(true);

        let pipelines: Vec<Pipeline> = self.pipelines.borrow().clone();
        debug_log!("[wisp] connect: {} pipelines", pipelines.len());
        for pipeline in pipelines {
            let subscription = pipeline();
            if self.connected.get() {
                self.active.borrow_mut().add(subscription);
            } else {
                // a pipeline disconnected the host while subscribing
                subscription.unsubscribe();
            }
        }

        self.on_connect.next(());
    }

    /// Signals `disconnected`, then unsubscribes everything subscribed on
    /// connect. Does nothing while disconnected.
    pub fn disconnect(&self) {
        if !self.connected.replace(false) {
            return;
        }
        self.on_disconnect.next(());
        debug_log!("[wisp] disconnect: {} subscriptions", self.active.borrow().len());
        self.teardown();
    }

    fn teardown(&self) {
        let mut active = mem::take(&mut *self.active.borrow_mut());
        active.clear();
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// Emits on every connect.
    pub fn connected(&self) -> Stream<()> {
        self.on_connect.stream()
    }

    /// Emits on every disconnect.
    pub fn disconnected(&self) -> Stream<()> {
        self.on_disconnect.stream()
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.borrow().len()
    }

    /// Number of live subscriptions.
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    /// Handles an attribute change reported by the host.
    ///
    /// `new` is `None` when the attribute was removed. Returns `false` when no
    /// property is bound to the attribute.
    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) -> Result<bool> {
        let entry = match self.table.resolve_attribute(name) {
            Some(entry) => entry,
            None => {
                debug_log!("[wisp] ignoring attribute {}", name);
                return Ok(false);
            }
        };
        debug_log!("[wisp] attribute {}: {:?} -> {:?}", name, old, new);

        let value = decode(new, name, entry.definition(), &self.host.origin())?;
        entry.cell().set(value);
        Ok(true)
    }
}
