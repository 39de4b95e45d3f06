//! 并发测试：多个线程同时解析、定义与访问类

mod common;

use common::*;
use mop_core::{ClassHandle, Runtime, Value};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_placeholders_share_identity() {
    let runtime = Arc::new(Runtime::new());
    let handles: Vec<ClassHandle> = (0..8)
        .map(|_| {
            let runtime = Arc::clone(&runtime);
            thread::spawn(move || runtime.class_reference(&sym("SHARED")).unwrap())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|t| t.join().unwrap())
        .collect();

    assert!(handles.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
}

#[test]
fn test_concurrent_definitions_are_consistent() {
    let runtime = Arc::new(Runtime::new());
    define(&runtime, "ROOT", &[], &["A"]);

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let runtime = Arc::clone(&runtime);
            thread::spawn(move || {
                let name = format!("LEAF-{i}");
                let class = define(&runtime, &name, &["ROOT"], &["B"]);
                let instance = runtime
                    .make_instance(&class, &[(sym("A"), int(i)), (sym("B"), int(i * 10))])
                    .unwrap();
                (class, instance)
            })
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        let (class, instance) = worker.join().unwrap();
        let i = i as i64;
        assert!(class.is_finalized());
        assert_eq!(instance.slot_value(&sym("A")).unwrap(), int(i));
        assert_eq!(instance.slot_value(&sym("B")).unwrap(), int(i * 10));
    }
    let root = runtime.find_class(&sym("ROOT")).unwrap();
    assert_eq!(root.direct_subclasses().len(), 4);
}

#[test]
fn test_readers_never_see_half_built_class() {
    let runtime = Arc::new(Runtime::new());
    let point = define(&runtime, "POINT", &[], &["X"]);

    let reader = {
        let point = point.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                let layout = point.layout().expect("finalized class lost its layout");
                assert!(layout.contains(&sym("X")));
            }
        })
    };
    for round in 0..50 {
        let extra = format!("EXTRA-{round}");
        define(&runtime, "POINT", &[], &["X", extra.as_str()]);
    }
    reader.join().unwrap();

    let value = runtime.allocate_instance(&point).unwrap();
    assert!(runtime.typep(&value, &Value::symbol("POINT")).unwrap());
}
