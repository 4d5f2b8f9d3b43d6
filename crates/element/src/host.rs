//! Host element abstraction.
//!
//! The element layer never talks to the DOM directly. Everything it needs from
//! the custom element it is attached to goes through the `Host` trait, so the
//! same property machinery runs against a browser element (`WebHost`) or an
//! in-memory one (`MemoryHost`).

use alloc::rc::Rc;
use alloc::string::String;
use wisp_core::Value;
use wisp_reactive::ReactiveCell;

/// The element that owns a set of reactive properties.
///
/// Methods take `&self`; implementations use interior mutability the same way
/// DOM elements do.
pub trait Host: 'static {
    /// Where rendered output goes: the shadow root if present, else the host.
    type Target: Clone + 'static;

    /// Returns the attribute's text, or `None` if it is absent.
    fn get_attribute(&self, name: &str) -> Option<String>;

    /// Sets an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Removes an attribute. Removing an absent attribute does nothing.
    fn remove_attribute(&self, name: &str);

    /// Returns whether the attribute is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Returns a value already set on the host under `name` before any
    /// accessor was installed.
    fn own_property(&self, name: &str) -> Option<Value>;

    /// Exposes a property on the host. Reads and writes of the property must
    /// go through the accessor from now on.
    fn install_accessor(&self, accessor: PropertyAccessor);

    /// Origin of the host's document, used to resolve relative URLs.
    fn origin(&self) -> String;

    /// Returns the render target.
    fn render_target(&self) -> Self::Target;
}

/// Getter/setter pair backed by a property's reactive cell.
#[derive(Clone)]
pub struct PropertyAccessor {
    name: Rc<str>,
    cell: ReactiveCell<Value>,
}

impl PropertyAccessor {
    pub(crate) fn new(name: Rc<str>, cell: ReactiveCell<Value>) -> Self {
        Self { name, cell }
    }

    /// Property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the property's current value.
    pub fn get(&self) -> Value {
        self.cell.get()
    }

    /// Writes the property, notifying its observers.
    pub fn set(&self, value: Value) {
        self.cell.set(value);
    }
}

impl core::fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("name", &self.name)
            .field("value", &self.cell.get())
            .finish()
    }
}
