//! Change listener.
//!
//! Merges every property cell of a table into one stream of change events.

use crate::effect::EffectContext;
use crate::host::Host;
use crate::table::{PropertyEntry, PropertyTable};
use alloc::rc::Rc;
use alloc::vec::Vec;
use wisp_core::Value;
use wisp_reactive::Stream;

/// A deduplicated, effect-applied property change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub name: Rc<str>,
    pub value: Value,
}

impl ChangeEvent {
    pub fn new(name: impl Into<Rc<str>>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Returns the change stream of `table`.
///
/// Every subscription first sees each property's current value, in schema
/// order, then one event per write that differs from the previous value of
/// the same property. Properties with an effect run it on each such value
/// before the event is emitted; an effect returning `None` swallows the event.
pub fn listen<H: Host>(table: &PropertyTable<H>, host: &Rc<H>) -> Stream<ChangeEvent> {
    let streams: Vec<Stream<ChangeEvent>> = table
        .entries()
        .map(|entry| property_stream(entry, host))
        .collect();
    Stream::merge(streams)
}

fn property_stream<H: Host>(entry: &PropertyEntry<H>, host: &Rc<H>) -> Stream<ChangeEvent> {
    let name = entry.name_rc();
    let distinct = entry.cell().stream().distinct_until_changed();

    let applied = match entry.definition().effect_handle() {
        Some(effect) => {
            let host = host.clone();
            let name = name.clone();
            let attribute: Rc<str> = Rc::from(entry.attribute());
            let converter = entry.definition().resolved_converter();
            distinct.filter_map(move |value| {
                let cx = EffectContext {
                    host: &*host,
                    name: &name,
                    attribute: &attribute,
                    converter: &converter,
                };
                effect.apply(&cx, value)
            })
        }
        None => distinct,
    };

    applied.map(move |value| ChangeEvent {
        name: name.clone(),
        value,
    })
}
