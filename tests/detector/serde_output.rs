use super::*;

use serde_json::json;

#[test]
fn test_class_declaration_serializes_for_renderers() {
    let path = ["a", "C"];
    let mut commands = guarded(&path, simple_body(&path));
    detect(&mut commands);

    let value = serde_json::to_value(&commands[0]).expect("serializable");
    let class = &value["Class"];
    assert_eq!(class["path"], json!(["a", "C"]));
    assert_eq!(class["traits_static"], json!([false, false]));
    assert_eq!(class["traits"][1]["name"], json!({ "Direct": { "String": "foo" } }));
    assert_eq!(class["extends"], json!(null));

    let back: Item = serde_json::from_value(value).expect("deserializable");
    assert_eq!(back, commands[0]);
}
