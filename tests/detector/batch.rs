use super::*;

use as2_class_detector::{detect_all, Script};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn broken_script() -> Vec<Item> {
    let path = ["pkg", "Broken"];
    let mut body = simple_body(&path);
    body.pop();
    body.push(prop_flags_with(&path, Item::integer(0), Item::integer(1)));
    guarded(&path, body)
}

#[test]
fn test_scripts_processed_in_parallel_keep_order() {
    init_tracing();
    let mut scripts: Vec<Script> = (0..16)
        .map(|i| {
            let name = format!("Class{}", i);
            let path = ["pkg", name.as_str()];
            let commands = if i == 5 {
                broken_script()
            } else {
                guarded(&path, simple_body(&path))
            };
            Script::new(format!("scripts/{}.as", i), commands)
        })
        .collect();
    let broken_before = scripts[5].commands.clone();

    let sink = CollectedDiagnostics::new();
    let reports = ClassDetector::default().detect_scripts(&mut scripts, &sink);

    assert_eq!(reports.len(), 16);
    for (i, (script, report)) in scripts.iter().zip(&reports).enumerate() {
        if i == 5 {
            assert_eq!(report.rejected, 1);
            assert_eq!(script.commands, broken_before);
        } else {
            assert_eq!(report.classes, 1, "script {}", script.path);
            let class = expect_class(&script.commands[0]);
            assert_eq!(class.qualified_name(), format!("pkg.Class{}", i));
        }
    }

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].script, "scripts/5.as");
    assert!(entries[0].message.contains("properties param not null"));
}

#[test]
fn test_detect_all_uses_tracing_sink() {
    init_tracing();
    let mut scripts = vec![
        Script::new("ok.as", guarded(&["Ok"], simple_body(&["Ok"]))),
        Script::new("broken.as", broken_script()),
    ];
    let reports = detect_all(&mut scripts);
    assert_eq!(reports[0].classes, 1);
    assert_eq!(reports[1].rejected, 1);
}
