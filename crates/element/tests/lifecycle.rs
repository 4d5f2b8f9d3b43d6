//! End-to-end behaviour of elements across connect/disconnect cycles.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wisp_element::{
    decode, prop, reflect_attribute, setup, Converter, Element, Host, MemoryHost, MemoryRoot,
    PropertyTable, Schema, Snapshot, Stream, Subject, Value,
};

type Renders = Rc<RefCell<Vec<String>>>;

fn render_abc(s: &Snapshot) -> String {
    let field = |name: &str| {
        s.get(name)
            .filter(|v| !v.is_null())
            .map(Value::to_display_string)
            .unwrap_or_default()
    };
    format!("a={} b={} c={}", field("a"), field("b"), field("c"))
}

fn abc_element(host: MemoryHost) -> (Element<MemoryHost, String>, Renders) {
    let renders: Renders = Rc::new(RefCell::new(Vec::new()));
    let sink = renders.clone();
    let schema = Schema::new()
        .property("a", prop(0))
        .property("b", prop(0))
        .property("c", prop(Value::Null).converter(Converter::Number));
    let element = setup(Rc::new(host), schema, move |html: String, target: MemoryRoot| {
        target.set_content(html.clone());
        sink.borrow_mut().push(html);
    })
    .unwrap();
    (element, renders)
}

#[test]
fn test_defaults_without_host_values() {
    let (element, _) = abc_element(MemoryHost::new());
    assert_eq!(element.get("a"), Some(Value::from(0)));
    assert_eq!(element.get("b"), Some(Value::from(0)));
    assert_eq!(element.get("c"), Some(Value::Null));
}

#[test]
fn test_existing_host_values_take_precedence() {
    let host = MemoryHost::new()
        .with_property("a", 1)
        .with_property("b", 2)
        .with_property("c", 3)
        .with_attribute("a", "10")
        .with_attribute("c", "30");
    let (element, _) = abc_element(host);

    assert_eq!(element.get("a"), Some(Value::from(1)));
    assert_eq!(element.get("b"), Some(Value::from(2)));
    assert_eq!(element.get("c"), Some(Value::from(3)));
    assert_eq!(element.host().property("c"), Some(Value::from(3)));
}

#[test]
fn test_attributes_seed_when_no_host_value() {
    let (element, _) = abc_element(MemoryHost::new().with_attribute("c", "30"));
    assert_eq!(element.get("c"), Some(Value::from(30)));
}

#[test]
fn test_pipeline_sees_only_connected_changes() {
    let (element, _) = abc_element(MemoryHost::new());
    let source: Subject<i32> = Subject::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    element.register(source.stream().inspect(move |v| sink.borrow_mut().push(*v)));

    source.next(1);
    element.connect();
    source.next(2);
    element.disconnect();
    source.next(3);

    assert_eq!(*seen.borrow(), vec![2]);
}

#[test]
fn test_change_stream_pipeline_sees_only_connected_changes() {
    let (element, _) = abc_element(MemoryHost::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    element.register(
        element
            .changes()
            .filter(|event| &*event.name == "a")
            .inspect(move |event| sink.borrow_mut().push(event.value.clone())),
    );

    element.set("a", 1).unwrap();
    element.connect();
    seen.borrow_mut().clear();

    element.set("a", 2).unwrap();
    element.disconnect();
    element.set("a", 3).unwrap();

    assert_eq!(*seen.borrow(), vec![Value::from(2)]);
}

#[test]
fn test_boolean_flag_decoding() {
    let schema: Schema<MemoryHost> = Schema::new().property("flag", prop(false).attribute("foo"));
    let def = schema.get("flag").unwrap();

    for text in ["", "false", "0", "anything"] {
        assert_eq!(decode(Some(text), "foo", def, "null"), Ok(Value::Boolean(true)));
    }
    assert_eq!(decode(None, "foo", def, "null"), Ok(Value::Boolean(false)));
}

#[test]
fn test_template_renders_on_change_while_connected() {
    let (element, renders) = abc_element(MemoryHost::new().with_property("c", 3));
    element.bind_template(render_abc);

    element.connect();
    let after_connect = renders.borrow().len();

    element.set("a", 5).unwrap();
    assert_eq!(renders.borrow().len(), after_connect + 1);
    assert_eq!(renders.borrow().last().unwrap(), "a=5 b=0 c=3");

    element.disconnect();
    element.set("b", 7).unwrap();
    assert_eq!(renders.borrow().len(), after_connect + 1);
    assert_eq!(element.host().rendered().as_deref(), Some("a=5 b=0 c=3"));
}

#[test]
fn test_reconnect_renders_current_state() {
    let (element, renders) = abc_element(MemoryHost::new());
    element.bind_template(render_abc);

    element.connect();
    element.disconnect();
    element.set("b", 7).unwrap();
    renders.borrow_mut().clear();

    element.connect();
    assert!(renders.borrow().iter().all(|html| html == "a=0 b=7 c="));
    assert!(!renders.borrow().is_empty());
}

#[test]
fn test_manual_update_renders_without_change() {
    let (element, renders) = abc_element(MemoryHost::new().with_shadow_root());
    element.bind_template(render_abc);
    element.connect();
    renders.borrow_mut().clear();

    element.update();
    assert_eq!(*renders.borrow(), vec!["a=0 b=0 c=".to_string()]);
    assert!(element.host().render_target().is_shadow());
}

#[test]
fn test_signal_streams() {
    let (element, _) = abc_element(MemoryHost::new());
    let connects = Rc::new(Cell::new(0));
    let disconnects = Rc::new(Cell::new(0));

    let c = connects.clone();
    element.connected().subscribe(move |_| c.set(c.get() + 1));
    let d = disconnects.clone();
    element.disconnected().subscribe(move |_| d.set(d.get() + 1));

    for _ in 0..3 {
        element.connect();
        element.disconnect();
    }
    assert_eq!((connects.get(), disconnects.get()), (3, 3));
}

#[test]
fn test_reflected_attribute_follows_property() {
    let host = MemoryHost::new();
    let schema = Schema::new()
        .property("open", prop(false).attribute("is-open").effect_with(reflect_attribute()))
        .property("when", prop(Value::Date(0.0)).effect_with(reflect_attribute()));
    let element = setup(Rc::new(host), schema, |_: (), _: MemoryRoot| {}).unwrap();
    element.connect();

    assert!(!element.host().has_attribute("is-open"));
    assert_eq!(
        element.host().get_attribute("when").as_deref(),
        Some("1970-01-01T00:00:00.000Z")
    );

    element.host().set_property("open", true);
    assert_eq!(element.host().get_attribute("is-open").as_deref(), Some(""));
}

#[test]
fn test_unknown_attribute_is_ignored() {
    let (element, renders) = abc_element(MemoryHost::new());
    element.bind_template(render_abc);
    element.connect();
    let before = renders.borrow().len();

    assert_eq!(element.attribute_changed("style", None, Some("color: red")), Ok(false));
    assert_eq!(renders.borrow().len(), before);
}

#[test]
fn test_property_cell_stream_operators() {
    let host = Rc::new(MemoryHost::new());
    let table = PropertyTable::install(&*host, Schema::new().property("n", prop(1))).unwrap();
    let doubled: Stream<f64> = table
        .entry("n")
        .unwrap()
        .cell()
        .stream()
        .filter_map(|v| v.as_f64().map(|n| n * 2.0));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let _sub = doubled.subscribe(move |v| sink.borrow_mut().push(v));
    table.set("n", 4).unwrap();

    assert_eq!(*seen.borrow(), vec![2.0, 8.0]);
}
