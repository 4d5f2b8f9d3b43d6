//! Template binding.
//!
//! A bound template re-renders the whole element on every change event and on
//! every manual update, from a snapshot of all property values.

use crate::host::Host;
use crate::lifecycle::LifecycleController;
use crate::listener::ChangeEvent;
use crate::log::debug_log;
use crate::table::PropertyTable;
use alloc::rc::Rc;
use alloc::vec::Vec;
use serde::ser::{Serialize, SerializeMap, Serializer};
use wisp_core::{JsonValue, Value};
use wisp_reactive::Stream;

/// Injected function placing a render result into a render target.
pub type Renderer<H, R> = Rc<dyn Fn(R, <H as Host>::Target)>;

/// Every property's value at one point in time, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    values: Vec<(Rc<str>, Value)>,
}

impl Snapshot {
    pub(crate) fn new(values: Vec<(Rc<str>, Value)>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (&**n, v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts to a JSON object keyed by property name.
    ///
    /// `serde_json`'s map keeps its keys sorted, so the object is in name
    /// order. Serialize the snapshot itself to keep schema order.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(&**name, value)?;
        }
        map.end()
    }
}

/// Builds the render pipeline for a template.
///
/// Each change event or `updates` emission reads a fresh snapshot, calls
/// `render_fn` with it and hands the result and the host's render target to
/// `renderer`. Nothing happens until the returned stream is subscribed.
pub fn render_pipeline<H, R, F>(
    table: &PropertyTable<H>,
    host: &Rc<H>,
    changes: &Stream<ChangeEvent>,
    updates: &Stream<()>,
    render_fn: F,
    renderer: Renderer<H, R>,
) -> Stream<()>
where
    H: Host,
    R: 'static,
    F: Fn(&Snapshot) -> R + 'static,
{
    let table = table.clone();
    let host = host.clone();
    changes
        .map(|_| ())
        .merge_with(updates)
        .map(move |()| {
            let snapshot = table.snapshot();
            debug_log!("[wisp] render {:?}", snapshot);
            let result = render_fn(&snapshot);
            renderer(result, host.render_target());
        })
}

/// Registers a template with the lifecycle controller.
///
/// The template renders only while the host is connected.
pub fn bind_template<H, R, F>(
    controller: &LifecycleController<H>,
    table: &PropertyTable<H>,
    host: &Rc<H>,
    changes: &Stream<ChangeEvent>,
    updates: &Stream<()>,
    render_fn: F,
    renderer: Renderer<H, R>,
) where
    H: Host,
    R: 'static,
    F: Fn(&Snapshot) -> R + 'static,
{
    controller.register(render_pipeline(table, host, changes, updates, render_fn, renderer));
}
