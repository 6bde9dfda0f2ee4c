use super::*;

use as2_class_detector::FunctionItem;

/// `_global.a.I = function () {};`
fn interface_write(path: &[&str]) -> Item {
    let (last, parent) = path.split_last().expect("non-empty path");
    Item::set_member(global(parent), *last, empty_function())
}

fn implements(path: &[&str], superclasses: Vec<Item>) -> Item {
    Item::ImplementsOp {
        subclass: Box::new(global(path)),
        superclasses,
    }
}

#[test]
fn test_interface_with_super_interfaces() {
    let path = ["events", "IDispatcher"];
    let body = vec![
        interface_write(&path),
        implements(&path, vec![plain(&["events", "IListener"])]),
    ];
    let mut commands = guarded(&path, body);
    let (report, sink) = detect(&mut commands);

    assert_eq!(report, DetectionReport { classes: 0, interfaces: 1, rejected: 0 });
    assert!(sink.is_empty());
    assert_eq!(commands.len(), 1);

    let interface = expect_interface(&commands[0]);
    assert_eq!(*interface.name, plain(&path));
    assert_eq!(interface.path, segments(&path));
    assert_eq!(interface.qualified_name(), "events.IDispatcher");
    assert_eq!(interface.superclasses, vec![plain(&["events", "IListener"])]);
}

#[test]
fn test_bare_interface() {
    let path = ["IMarker"];
    let mut commands = guarded(&path, vec![interface_write(&path)]);
    detect(&mut commands);

    let interface = expect_interface(&commands[0]);
    assert_eq!(*interface.name, Item::var("IMarker"));
    assert!(interface.superclasses.is_empty());
}

#[test]
fn test_consecutive_implements_clauses_are_concatenated() {
    let path = ["I"];
    let body = vec![
        interface_write(&path),
        implements(&path, vec![Item::var("IA")]),
        implements(&path, vec![Item::var("IB"), Item::var("IC")]),
    ];
    let mut commands = guarded(&path, body);
    detect(&mut commands);

    let interface = expect_interface(&commands[0]);
    assert_eq!(
        interface.superclasses,
        vec![Item::var("IA"), Item::var("IB"), Item::var("IC")]
    );
}

#[test]
fn test_interface_wins_over_earlier_prototype_binding() {
    let path = ["a", "IShape"];
    let body = vec![
        prototype_binding(&path, 1, 2, constructor()),
        interface_write(&path),
        implements(&path, vec![Item::var("IBase")]),
    ];
    let mut commands = guarded(&path, body);
    let (report, _) = detect(&mut commands);

    assert_eq!(report.interfaces, 1);
    assert_eq!(report.classes, 0);
    expect_interface(&commands[0]);
}

#[test]
fn test_interface_else_branch_follows_declaration() {
    let path = ["I"];
    let on_false = vec![Item::Unresolved("fallback".into())];
    let mut commands = guarded_with_else(&path, vec![interface_write(&path)], on_false.clone());
    detect(&mut commands);

    assert_eq!(commands.len(), 2);
    expect_interface(&commands[0]);
    assert_eq!(commands[1], on_false[0]);
}

#[test]
fn test_interface_rejects_non_empty_function() {
    let path = ["a", "I"];
    let body = vec![Item::set_member(global(&["a"]), "I", method("trace(1)"))];
    assert_rejected(guarded(&path, body), Severity::Warning, "not empty function");
}

#[test]
fn test_interface_rejects_named_function() {
    let path = ["I"];
    let named = Item::Function(FunctionItem {
        name: "I".into(),
        ..FunctionItem::default()
    });
    let body = vec![Item::set_member(Item::var("_global"), "I", named)];
    assert_rejected(guarded(&path, body), Severity::Warning, "not unnamed func");
}

#[test]
fn test_interface_rejects_parameters() {
    let path = ["I"];
    let body = vec![Item::set_member(Item::var("_global"), "I", function(&["x"], vec![]))];
    assert_rejected(guarded(&path, body), Severity::Warning, "not empty params");
}

#[test]
fn test_interface_rejects_non_function_value() {
    let path = ["I"];
    let body = vec![Item::set_member(Item::var("_global"), "I", Item::integer(3))];
    assert_rejected(guarded(&path, body), Severity::Severe, "unexpected node kind");
}

#[test]
fn test_interface_rejects_trailing_statements() {
    let path = ["I"];
    let body = vec![interface_write(&path), prop_flags(&path)];
    assert_rejected(guarded(&path, body), Severity::Warning, "unknown iface item: Push");
}

#[test]
fn test_interface_rejects_foreign_path() {
    let path = ["a", "I"];
    let body = vec![interface_write(&["b", "I"])];
    assert_rejected(guarded(&path, body), Severity::Warning, "wrong path in setmember");
}
