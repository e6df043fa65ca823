use std::{sync::Arc, task::Waker};

use errnote::{hooks::Fixed, prelude::*};

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
struct DiskFull;

/// A third-party error that only relays the text of what it wraps.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Relayed(String);

fn pkg_save() -> Annotator {
    Annotator::new().caller_identity(Fixed("pkg.Save"))
}

#[test]
fn test_concrete_scenario() {
    let error = pkg_save()
        .arg("x")
        .annotate(&DiskFull, &["writing", "file"]);

    let record = Record::parse(&error.to_string()).unwrap();
    assert_eq!(record.fn_name(), "pkg.Save");
    assert_eq!(record.msg(), "writing file");
    assert_eq!(record.args(), ["\"x\""]);
    assert_eq!(record.inner(), &Inner::leaf("disk full"));
    assert_eq!(
        error.to_string(),
        r#"{"fn_name":"pkg.Save","args":["\"x\""],"msg":"writing file","inner":"disk full"}"#
    );
}

#[test]
fn test_field_names_are_stable() {
    let error = pkg_save().arg(&[1, 2]).annotate(&DiskFull, &["m"]);
    let value: serde_json::Value = serde_json::from_str(error.as_str()).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["args", "fn_name", "inner", "msg"]);
    assert_eq!(object["fn_name"], "pkg.Save");
    assert_eq!(object["args"], serde_json::json!(["[1,2]"]));
    assert_eq!(object["msg"], "m");
    assert_eq!(object["inner"], "disk full");
}

fn chain(depth: usize) -> AnnotatedError {
    let annotator = pkg_save();
    let mut error = annotator.annotate(&DiskFull, &["layer", "1"]);
    for layer in 2..=depth {
        let message = layer.to_string();
        error = annotator.annotate(&error, &["layer", &message]);
    }
    error
}

#[test]
fn test_chaining_is_lossless() {
    for depth in [1, 2, 5] {
        let error = chain(depth);
        assert_eq!(error.depth(), depth);
        assert_eq!(error.root_cause(), "disk full");

        let messages: Vec<&str> = error.layers().map(Record::msg).collect();
        let expected: Vec<String> = (1..=depth)
            .rev()
            .map(|layer| format!("layer {layer}"))
            .collect();
        assert_eq!(messages, expected);

        // Each layer's inner decodes to exactly the previous error
        if depth > 1 {
            let previous = chain(depth - 1);
            let outer = Record::parse(error.as_str()).unwrap();
            assert_eq!(outer.inner().as_record(), Some(previous.record()));
        }
    }
}

#[test]
fn test_chaining_through_foreign_errors() {
    let first = pkg_save().annotate(&DiskFull, &["one"]);
    let relayed = Relayed(first.to_string());
    let second = pkg_save().annotate(&relayed, &["two"]);

    assert_eq!(second.depth(), 2);
    assert_eq!(second.record().inner().as_record(), Some(first.record()));

    // Text that merely looks like JSON stays a leaf
    let second = pkg_save().annotate(&Relayed(r#"{"fn_name":"x"}"#.into()), &[]);
    assert_eq!(second.record().inner(), &Inner::leaf(r#"{"fn_name":"x"}"#));
}

#[test]
fn test_nil_error() {
    let error = pkg_save().annotate(ErrorSource::NIL, &[]);
    let record = Record::parse(error.as_str()).unwrap();
    assert_eq!(record.inner(), &Inner::leaf("nil err"));
    assert_eq!(record.msg(), "");
    assert_eq!(error.root_cause(), errnote::NIL_ERROR);
}

#[test]
fn test_context_carriers_are_masked() {
    let waker = Arc::new(Waker::noop().clone());
    let error = pkg_save()
        .carrier(&waker)
        .arg("after")
        .annotate(&DiskFull, &[]);
    assert_eq!(error.record().args(), ["ctx", "\"after\""]);

    let annotator = annotator![Waker::noop(), "after"];
    assert_eq!(annotator.arguments()[0], Argument::Context);
    assert_eq!(annotator.arguments()[0].as_str(), errnote::CONTEXT_ARGUMENT);
}

#[test]
fn test_render_never_fails() {
    let callback = |n: u32| n * 2;
    let rendered = render!(callback);
    assert!(!rendered.is_empty());
    assert!(rendered.starts_with("An object of type"), "{rendered}");

    let rendered = render!(f64::NAN);
    assert_eq!(rendered, "null");

    let rendered = render!(std::collections::BTreeMap::from([((1, 2), "pair")]));
    assert_eq!(rendered, r#"{(1, 2): "pair"}"#);
}

#[derive(serde::Serialize)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn test_serialize_without_debug_is_json() {
    assert_eq!(render!(Point { x: 1, y: 2 }), r#"{"x":1,"y":2}"#);

    let annotator = annotator![Point { x: 3, y: 4 }];
    assert_eq!(annotator.arguments()[0].as_str(), r#"{"x":3,"y":4}"#);
}

fn save_document(name: &str) -> Result<(), AnnotatedError> {
    let annotator = annotator![name];
    bail_annotated!(annotator, &DiskFull, "saving");
}

#[test]
fn test_macro_names_enclosing_function() {
    let error = save_document("report").unwrap_err();
    assert!(
        error.record().fn_name().ends_with("::save_document"),
        "{}",
        error.record().fn_name()
    );
    assert_eq!(error.record().args(), ["\"report\""]);
}

#[test]
fn test_direct_call_names_source_location() {
    let error = Annotator::new().annotate(&DiskFull, &[]);
    let line = line!() - 1;
    let fn_name = error.record().fn_name();
    assert!(fn_name.starts_with(&format!("{}:{line}:", file!())), "{fn_name}");

    fn read() -> Result<u32, DiskFull> {
        Err(DiskFull)
    }
    let error = read().annotate(&Annotator::new(), &["reading"]).unwrap_err();
    assert_ne!(error.record().fn_name(), errnote::UNKNOWN_FUNCTION);
    assert!(error.record().fn_name().starts_with(file!()), "{}", error.record().fn_name());
}

#[test]
fn test_result_ext() {
    fn read() -> Result<u32, DiskFull> {
        Err(DiskFull)
    }

    let annotator = pkg_save().arg(&7);
    let error = read()
        .annotate(&annotator, &["reading"])
        .annotate_with(&annotator, || "retrying")
        .unwrap_err();
    assert_eq!(error.depth(), 2);
    assert_eq!(error.record().msg(), "retrying");
    assert_eq!(error.root_cause(), "disk full");
}

#[test]
fn test_annotator_shared_across_threads() {
    let annotator = Arc::new(pkg_save().arg("shared"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let annotator = Arc::clone(&annotator);
            std::thread::spawn(move || {
                let message = i.to_string();
                annotator.annotate(&DiskFull, &[&message])
            })
        })
        .collect();

    for handle in handles {
        let error = handle.join().unwrap();
        assert_eq!(error.record().args(), ["\"shared\""]);
    }
    assert_eq!(annotator.arguments().len(), 1);
}
