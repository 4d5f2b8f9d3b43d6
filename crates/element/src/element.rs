//! Element handle.
//!
//! `setup` wires the property registry, change listener, lifecycle controller
//! and template binder together for one host element.

use crate::definition::Schema;
use crate::host::Host;
use crate::lifecycle::LifecycleController;
use crate::listener::{listen, ChangeEvent};
use crate::table::PropertyTable;
use crate::template::{bind_template, Renderer, Snapshot};
use alloc::rc::Rc;
use wisp_core::{Result, Value};
use wisp_reactive::{Stream, Subject};

/// Reactive state of one host element.
///
/// The embedder forwards the host's lifecycle callbacks to [`connect`],
/// [`disconnect`] and [`attribute_changed`]. Dropping a connected element
/// disconnects it first, releasing the observers that hold the host.
///
/// [`connect`]: Element::connect
/// [`disconnect`]: Element::disconnect
/// [`attribute_changed`]: Element::attribute_changed
pub struct Element<H: Host, R> {
    host: Rc<H>,
    table: PropertyTable<H>,
    lifecycle: LifecycleController<H>,
    changes: Stream<ChangeEvent>,
    updates: Subject<()>,
    renderer: Renderer<H, R>,
}

/// Installs `schema` on `host` and returns the element handle.
///
/// The change stream is registered with the lifecycle controller, so property
/// effects run while the element is connected even without a template.
///
/// ```rust
/// use std::rc::Rc;
/// use wisp_element::{prop, setup, MemoryHost, MemoryRoot, Schema};
///
/// let host = Rc::new(MemoryHost::new());
/// let schema = Schema::new().property("count", prop(0));
/// let element = setup(host.clone(), schema, |html: String, target: MemoryRoot| {
///     target.set_content(html)
/// })
/// .unwrap();
///
/// element.bind_template(|s| format!("<b>{}</b>", s.get("count").unwrap().to_display_string()));
/// element.connect();
/// element.set("count", 2).unwrap();
/// assert_eq!(host.rendered().as_deref(), Some("<b>2</b>"));
/// ```
pub fn setup<H, R, G>(host: Rc<H>, schema: Schema<H>, renderer: G) -> Result<Element<H, R>>
where
    H: Host,
    R: 'static,
    G: Fn(R, H::Target) + 'static,
{
    let table = PropertyTable::install(&*host, schema)?;
    let changes = listen(&table, &host);
    let lifecycle = LifecycleController::new(host.clone(), table.clone());
    lifecycle.register(changes.clone());

    Ok(Element {
        host,
        table,
        lifecycle,
        changes,
        updates: Subject::new(),
        renderer: Rc::new(renderer),
    })
}

impl<H: Host, R: 'static> Element<H, R> {
    /// Registers a pipeline that is live only while connected.
    pub fn register<T: Clone + 'static>(&self, pipeline: Stream<T>) {
        self.lifecycle.register(pipeline);
    }

    /// Renders `render_fn`'s result through the renderer on every change and
    /// every [`update`](Element::update) while connected.
    pub fn bind_template<F>(&self, render_fn: F)
    where
        F: Fn(&Snapshot) -> R + 'static,
    {
        bind_template(
            &self.lifecycle,
            &self.table,
            &self.host,
            &self.changes,
            &self.updates.stream(),
            render_fn,
            self.renderer.clone(),
        );
    }

    /// The raw change event stream.
    pub fn changes(&self) -> Stream<ChangeEvent> {
        self.changes.clone()
    }

    pub fn connected(&self) -> Stream<()> {
        self.lifecycle.connected()
    }

    pub fn disconnected(&self) -> Stream<()> {
        self.lifecycle.disconnected()
    }

    /// Forces a render of every bound template.
    pub fn update(&self) {
        self.updates.next(());
    }

    #[inline]
    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    #[inline]
    pub fn props(&self) -> &PropertyTable<H> {
        &self.table
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.table.get(name)
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.table.set(name, value)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.table.snapshot()
    }

    pub fn connect(&self) {
        self.lifecycle.connect();
    }

    pub fn disconnect(&self) {
        self.lifecycle.disconnect();
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.lifecycle.is_connected()
    }

    /// Forwards a host attribute change. See
    /// [`LifecycleController::attribute_changed`].
    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) -> Result<bool> {
        self.lifecycle.attribute_changed(name, old, new)
    }

    pub fn lifecycle(&self) -> &LifecycleController<H> {
        &self.lifecycle
    }
}

impl<H: Host, R> Drop for Element<H, R> {
    fn drop(&mut self) {
        self.lifecycle.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::prop;
    use crate::effect::reflect_attribute;
    use crate::memory::MemoryRoot;
    use crate::MemoryHost;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Renders = Rc<RefCell<Vec<String>>>;

    fn element(host: MemoryHost, schema: Schema<MemoryHost>) -> (Element<MemoryHost, String>, Renders) {
        let renders: Renders = Rc::new(RefCell::new(Vec::new()));
        let sink = renders.clone();
        let el = setup(Rc::new(host), schema, move |html: String, target: MemoryRoot| {
            target.set_content(html.clone());
            sink.borrow_mut().push(html);
        })
        .unwrap();
        (el, renders)
    }

    #[test]
    fn test_setup_exposes_properties() {
        let (el, _) = element(MemoryHost::new(), Schema::new().property("n", prop(1)));
        assert_eq!(el.get("n"), Some(Value::from(1)));
        assert_eq!(el.host().property("n"), Some(Value::from(1)));
        assert_eq!(el.lifecycle().pipeline_count(), 1);
    }

    #[test]
    fn test_template_renders_only_while_connected() {
        let (el, renders) = element(MemoryHost::new(), Schema::new().property("n", prop(1)));
        el.bind_template(|s| s.get("n").map(Value::to_display_string).unwrap_or_default());

        el.set("n", 2).unwrap();
        assert!(renders.borrow().is_empty());

        el.connect();
        assert_eq!(*renders.borrow(), ["2"]);

        el.set("n", 3).unwrap();
        el.disconnect();
        el.set("n", 4).unwrap();
        el.update();

        assert_eq!(*renders.borrow(), ["2", "3"]);
    }

    #[test]
    fn test_update_forces_render() {
        let (el, renders) = element(MemoryHost::new(), Schema::new().property("n", prop(1)));
        el.bind_template(|s| format!("{}", s.len()));
        el.connect();
        renders.borrow_mut().clear();

        el.update();
        el.update();
        assert_eq!(renders.borrow().len(), 2);
    }

    #[test]
    fn test_effects_run_without_template() {
        let host = MemoryHost::new();
        let (el, _) = element(
            host,
            Schema::new().property("open", prop(false).effect_with(reflect_attribute())),
        );

        el.set("open", true).unwrap();
        assert!(!el.host().has_attribute("open"));

        el.connect();
        el.set("open", false).unwrap();
        el.set("open", true).unwrap();
        assert!(el.host().has_attribute("open"));
    }

    #[test]
    fn test_attribute_round_trip_through_reflection() {
        let (el, _) = element(
            MemoryHost::new().with_attribute("size", "3"),
            Schema::new().property("size", prop(0).effect_with(reflect_attribute())),
        );
        el.connect();
        assert_eq!(el.get("size"), Some(Value::from(3)));

        el.set("size", 8).unwrap();
        assert_eq!(el.host().get_attribute("size").as_deref(), Some("8"));

        el.attribute_changed("size", Some("8"), Some("11")).unwrap();
        assert_eq!(el.get("size"), Some(Value::from(11)));
        assert_eq!(el.host().get_attribute("size").as_deref(), Some("11"));
    }

    #[test]
    fn test_dropping_connected_element_releases_host() {
        let (el, _) = element(MemoryHost::new(), Schema::new().property("n", prop(1)));
        el.bind_template(|s| format!("{}", s.len()));
        el.connect();
        let host = Rc::downgrade(el.host());

        drop(el);
        assert!(host.upgrade().is_none());
    }
}
