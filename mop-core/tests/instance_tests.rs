//! 实例与槽访问测试：分配、位置访问、命名访问与过时实例迁移

mod common;

use common::*;
use mop_core::{MopError, Runtime, Value};

#[test]
fn test_allocate_before_finalization_fails() {
    let runtime = Runtime::new();
    let child = define(&runtime, "CHILD", &["LATER"], &["A"]);
    let err = runtime.allocate_instance(&child).unwrap_err();
    assert!(matches!(err, MopError::NotFinalized { .. }));
}

#[test]
fn test_fresh_instance_slots_unbound() {
    let runtime = Runtime::new();
    let point = define(&runtime, "POINT", &[], &["X", "Y"]);
    let value = runtime.allocate_instance(&point).unwrap();
    let instance = value.as_instance().unwrap();

    assert_eq!(instance.standard_instance_access(0).unwrap(), None);
    assert!(!instance.slot_boundp(&sym("Y")).unwrap());
    let err = instance.slot_value(&sym("X")).unwrap_err();
    assert!(matches!(err, MopError::UnboundSlot { .. }));
    assert_eq!(runtime.print(&value), "#<POINT>");
    assert_eq!(runtime.type_of(&value), sym("POINT"));
}

#[test]
fn test_positional_and_named_access_agree() {
    let runtime = Runtime::new();
    let point = define(&runtime, "POINT", &[], &["X", "Y"]);
    let instance = runtime
        .make_instance(&point, &[(sym("X"), int(1)), (sym("Y"), int(2))])
        .unwrap();

    let layout = instance.layout();
    let y = layout.position_of(&sym("Y")).unwrap();
    assert_eq!(instance.standard_instance_access(y).unwrap(), Some(int(2)));

    instance.set_standard_instance_access(y, int(20)).unwrap();
    assert_eq!(instance.slot_value(&sym("Y")).unwrap(), int(20));

    let err = instance.standard_instance_access(layout.len()).unwrap_err();
    assert_eq!(err, MopError::SlotIndexOutOfRange { index: 2, len: 2 });
}

#[test]
fn test_missing_slot() {
    let runtime = Runtime::new();
    let point = define(&runtime, "POINT", &[], &["X"]);
    let instance = runtime.make_instance(&point, &[]).unwrap();
    let err = instance.set_slot_value(&sym("Z"), int(0)).unwrap_err();
    assert!(matches!(err, MopError::MissingSlot { .. }));
    assert!(!instance.slot_exists_p(&sym("Z")).unwrap());
}

#[test]
fn test_makunbound() {
    let runtime = Runtime::new();
    let point = define(&runtime, "POINT", &[], &["X"]);
    let instance = runtime.make_instance(&point, &[(sym("X"), int(5))]).unwrap();
    assert!(instance.slot_boundp(&sym("X")).unwrap());
    instance.slot_makunbound(&sym("X")).unwrap();
    assert!(!instance.slot_boundp(&sym("X")).unwrap());
}

#[test]
fn test_typep_on_instances() {
    let runtime = Runtime::new();
    define(&runtime, "SHAPE", &[], &[]);
    let circle = define(&runtime, "CIRCLE", &["SHAPE"], &["R"]);
    let value = Value::Instance(runtime.make_instance(&circle, &[]).unwrap());

    assert!(runtime.typep(&value, &Value::symbol("SHAPE")).unwrap());
    assert!(runtime.typep(&value, &Value::symbol("STANDARD-OBJECT")).unwrap());
    assert!(runtime.typep(&value, &Value::Class(circle.clone())).unwrap());
    assert!(!runtime.typep(&value, &Value::symbol("CLASS")).unwrap());
}

// ==================== 重定义后的迁移 ====================

#[test]
fn test_obsolete_instance_migrates_on_named_access() {
    let runtime = Runtime::new();
    let point = define(&runtime, "POINT", &[], &["X", "Y"]);
    let instance = runtime
        .make_instance(&point, &[(sym("X"), int(1)), (sym("Y"), int(2))])
        .unwrap();

    define(&runtime, "POINT", &[], &["Y", "Z"]);
    assert!(instance.is_obsolete());
    // 位置访问仍使用旧布局
    assert_eq!(instance.standard_instance_access(0).unwrap(), Some(int(1)));

    assert_eq!(instance.slot_value(&sym("Y")).unwrap(), int(2));
    assert!(!instance.is_obsolete());
    assert!(!instance.slot_boundp(&sym("Z")).unwrap());
    assert!(matches!(
        instance.slot_value(&sym("X")),
        Err(MopError::MissingSlot { .. })
    ));
    assert_eq!(instance.layout().slot_names(), syms(&["Y", "Z"]).as_slice());
}

#[test]
fn test_instance_of_unfinalized_class() {
    let runtime = Runtime::new();
    let point = define(&runtime, "POINT", &[], &["X"]);
    let instance = runtime.make_instance(&point, &[(sym("X"), int(1))]).unwrap();

    define(&runtime, "POINT", &["NOT-YET"], &["X"]);
    let err = instance.slot_value(&sym("X")).unwrap_err();
    assert!(matches!(err, MopError::NotFinalized { .. }));
    assert_eq!(instance.standard_instance_access(0).unwrap(), Some(int(1)));

    define(&runtime, "NOT-YET", &[], &[]);
    assert_eq!(instance.slot_value(&sym("X")).unwrap(), int(1));
}
