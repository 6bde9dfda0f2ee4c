use as2_class_detector::{
    ClassDetector, ClassItem, CollectedDiagnostics, DetectionReport, DetectorOptions,
    FunctionItem, InterfaceItem, Item, Severity,
};

mod batch;
mod interfaces;
#[cfg(feature = "serde")]
mod serde_output;

// --- Idiom builders ---

/// `_global.a.b` for `["a", "b"]`.
fn global(path: &[&str]) -> Item {
    path.iter()
        .fold(Item::var("_global"), |object, member| Item::member(object, *member))
}

/// `a.b` for `["a", "b"]`, the root-stripped form.
fn plain(path: &[&str]) -> Item {
    let (first, rest) = path.split_first().expect("non-empty path");
    rest.iter()
        .fold(Item::var(*first), |object, member| Item::member(object, *member))
}

fn segments(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

/// `if (!_global.a.b) { _global.a.b = new Object(); }`
fn namespace_guard(path: &[&str]) -> Item {
    let (last, parent) = path.split_last().expect("non-empty path");
    Item::if_then(
        Item::not(global(path)),
        vec![Item::set_member(global(parent), *last, Item::new_object("Object", vec![]))],
        vec![],
    )
}

fn class_guard(path: &[&str], body: Vec<Item>, on_false: Vec<Item>) -> Item {
    Item::if_then(Item::not(global(path)), body, on_false)
}

/// Package guards, each followed by `§§pop()`, then the class guard and its
/// trailing `§§pop()`.
fn guarded(path: &[&str], body: Vec<Item>) -> Vec<Item> {
    guarded_with_else(path, body, vec![])
}

fn guarded_with_else(path: &[&str], body: Vec<Item>, on_false: Vec<Item>) -> Vec<Item> {
    let mut commands = Vec::new();
    for depth in 1..path.len() {
        commands.push(namespace_guard(&path[..depth]));
        commands.push(Item::Pop);
    }
    commands.push(class_guard(path, body, on_false));
    commands.push(Item::Pop);
    commands
}

fn function(params: &[&str], body: Vec<Item>) -> Item {
    Item::Function(FunctionItem::anonymous(
        params.iter().map(|p| p.to_string()).collect(),
        body,
    ))
}

fn constructor() -> Item {
    function(&["x"], vec![Item::Unresolved("this.x = x".into())])
}

fn method(body: &str) -> Item {
    function(&[], vec![Item::Unresolved(body.into())])
}

fn empty_function() -> Item {
    function(&[], vec![])
}

/// `rI = (rC = _global.a.C = (rC = ctor)).prototype;`
fn prototype_binding(path: &[&str], instance_reg: u32, class_reg: u32, ctor: Item) -> Item {
    let (last, parent) = path.split_last().expect("non-empty path");
    let class_write = Item::set_member(global(parent), *last, Item::store_register(class_reg, ctor));
    Item::store_register(
        instance_reg,
        Item::member(Item::temp_register(class_reg, class_write), "prototype"),
    )
}

/// `rN.name = value` through a register whose role is already known.
fn register_write(register: u32, name: &str, value: Item) -> Item {
    Item::set_member(Item::register(register), name, value)
}

/// `ASSetPropFlags(_global.a.C.prototype, null, 1)` wrapped in `§§push`.
fn prop_flags(path: &[&str]) -> Item {
    prop_flags_with(path, Item::null(), Item::integer(1))
}

fn prop_flags_with(path: &[&str], props: Item, flags: Item) -> Item {
    Item::push(Item::call_function(
        "ASSetPropFlags",
        vec![Item::member(global(path), "prototype"), props, flags],
    ))
}

/// Class body with a constructor, one instance method `foo` and the
/// closing property-flag call.
fn simple_body(path: &[&str]) -> Vec<Item> {
    vec![
        prototype_binding(path, 1, 2, constructor()),
        register_write(1, "foo", method("trace(1)")),
        prop_flags(path),
    ]
}

// --- Assertion helpers ---

fn detect(commands: &mut Vec<Item>) -> (DetectionReport, CollectedDiagnostics) {
    let sink = CollectedDiagnostics::new();
    let report = ClassDetector::default().detect(commands, "test.as", &sink);
    (report, sink)
}

fn detect_with(
    options: DetectorOptions,
    commands: &mut Vec<Item>,
) -> (DetectionReport, CollectedDiagnostics) {
    let sink = CollectedDiagnostics::new();
    let report = ClassDetector::new(options).detect(commands, "test.as", &sink);
    (report, sink)
}

fn expect_class(item: &Item) -> &ClassItem {
    match item {
        Item::Class(class) => class,
        other => panic!("expected class declaration, got {:?}", other),
    }
}

fn expect_interface(item: &Item) -> &InterfaceItem {
    match item {
        Item::Interface(interface) => interface,
        other => panic!("expected interface declaration, got {:?}", other),
    }
}

fn trait_names(class: &ClassItem) -> Vec<&str> {
    class
        .traits
        .iter()
        .map(|t| t.name.as_str_literal().expect("string trait name"))
        .collect()
}

/// Runs detection on a malformed idiom and checks nothing was rewritten.
fn assert_rejected(mut commands: Vec<Item>, severity: Severity, reason: &str) {
    let original = commands.clone();
    let (report, sink) = detect(&mut commands);
    assert_eq!(commands, original, "statements must be left untouched");
    assert_eq!(report.declarations(), 0);
    assert_eq!(report.rejected, 1);
    let entries = sink.entries();
    assert_eq!(entries.len(), 1, "one diagnostic expected: {:?}", entries);
    assert_eq!(entries[0].script, "test.as");
    assert_eq!(entries[0].severity, severity);
    assert!(
        entries[0].message.contains(reason),
        "diagnostic {:?} should mention {:?}",
        entries[0].message,
        reason
    );
}
