//! Property registry.
//!
//! `PropertyTable::install` turns a schema into one reactive cell per property,
//! seeds each cell and exposes it on the host through an accessor. The table
//! is frozen once built: values change, entries never do.

use crate::codec::decode;
use crate::definition::{PropertyDefinition, Schema};
use crate::host::{Host, PropertyAccessor};
use crate::log::debug_log;
use crate::template::Snapshot;
use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashMap;
use wisp_core::{Error, Result, Value};
use wisp_reactive::ReactiveCell;

/// One property of an installed table.
pub struct PropertyEntry<H> {
    name: Rc<str>,
    attribute: Rc<str>,
    cell: ReactiveCell<Value>,
    definition: PropertyDefinition<H>,
}

impl<H: Host> PropertyEntry<H> {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_rc(&self) -> Rc<str> {
        self.name.clone()
    }

    /// Attribute the property is bound to.
    #[inline]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The cell holding the property's value.
    #[inline]
    pub fn cell(&self) -> &ReactiveCell<Value> {
        &self.cell
    }

    #[inline]
    pub fn definition(&self) -> &PropertyDefinition<H> {
        &self.definition
    }
}

/// Where a property's seed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    /// A value already set on the host
    OwnProperty,
    /// The bound attribute
    Attribute,
    /// The declared default
    Default,
}

struct TableInner<H> {
    entries: Vec<PropertyEntry<H>>,
    index: HashMap<Rc<str>, usize>,
}

/// Frozen mapping from property name to cell and definition.
///
/// Clones share the same table.
pub struct PropertyTable<H> {
    inner: Rc<TableInner<H>>,
}

impl<H> Clone for PropertyTable<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: Host> PropertyTable<H> {
    /// Installs every property of `schema` on `host`.
    ///
    /// Each cell is seeded from the host's own value for the property if it
    /// has one, else from the bound attribute if present, else from the
    /// declared default.
    pub fn install(host: &H, schema: Schema<H>) -> Result<Self> {
        let origin = host.origin();
        let mut entries = Vec::with_capacity(schema.len());
        let mut index = HashMap::with_capacity(schema.len());

        for (name, definition) in schema.into_entries() {
            let attribute: Rc<str> = Rc::from(definition.attribute_for(&name));
            let (seed, source) = seed_value(host, &name, &attribute, &definition, &origin)?;
            debug_log!("[wisp] install {} = {:?} ({:?})", name, seed, source);

            let name: Rc<str> = Rc::from(name);
            let cell = ReactiveCell::new(seed);
            host.install_accessor(PropertyAccessor::new(name.clone(), cell.clone()));

            index.insert(name.clone(), entries.len());
            entries.push(PropertyEntry {
                name,
                attribute,
                cell,
                definition,
            });
        }

        Ok(Self {
            inner: Rc::new(TableInner { entries, index }),
        })
    }

    /// Returns the entry for `name`.
    pub fn entry(&self, name: &str) -> Option<&PropertyEntry<H>> {
        self.inner
            .index
            .get(name)
            .map(|&idx| &self.inner.entries[idx])
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entry(name).map(|entry| entry.cell.get())
    }

    /// Writes `value` into the cell for `name`.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let entry = self
            .entry(name)
            .ok_or_else(|| Error::unknown_property(name))?;
        entry.cell.set(value.into());
        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    /// Entries in schema order.
    pub fn entries(&self) -> impl Iterator<Item = &PropertyEntry<H>> {
        self.inner.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.entries.iter().map(|entry| entry.name())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Finds the property bound to `attribute`.
    ///
    /// A property named like the attribute wins over one that binds the
    /// attribute explicitly.
    pub fn resolve_attribute(&self, attribute: &str) -> Option<&PropertyEntry<H>> {
        self.entry(attribute).or_else(|| {
            self.inner
                .entries
                .iter()
                .find(|entry| entry.definition.explicit_attribute() == Some(attribute))
        })
    }

    /// Reads every property's current value in schema order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.inner
                .entries
                .iter()
                .map(|entry| (entry.name.clone(), entry.cell.get()))
                .collect(),
        )
    }
}

fn seed_value<H: Host>(
    host: &H,
    name: &str,
    attribute: &str,
    definition: &PropertyDefinition<H>,
    origin: &str,
) -> Result<(Value, SeedSource)> {
    if let Some(value) = host.own_property(name) {
        return Ok((value, SeedSource::OwnProperty));
    }
    match host.get_attribute(attribute) {
        Some(text) => Ok((
            decode(Some(&text), attribute, definition, origin)?,
            SeedSource::Attribute,
        )),
        None => Ok((definition.default_value().clone(), SeedSource::Default)),
    }
}
