//! 集成测试 - 端到端加载与类型查询

mod common;

use common::{instance_of, is_a, loader_with, sym};
use mop_workspace::{ClassState, MopApiError, MopError, Value};

const CIRCLE_FIRST: &str = r#"{
    "classes": [
        { "name": "CIRCLE", "superclasses": ["SHAPE"], "slots": ["RADIUS"] }
    ]
}"#;

const SHAPE: &str = r#"{
    "classes": [ { "name": "SHAPE", "slots": ["NAME"] } ]
}"#;

const POINT_V1: &str = r#"{ "classes": [ { "name": "POINT", "slots": ["X", "Y"] } ] }"#;
const POINT_V2: &str = r#"{ "classes": [ { "name": "POINT", "slots": ["X", "Z"] } ] }"#;

const AREA: &str = r#"{
    "generic_functions": [ { "name": "AREA", "lambda_list": ["SHAPE"] } ],
    "methods": [
        { "generic_function": "AREA", "lambda_list": ["S"],
          "specializers": ["SHAPE"], "function": "area/shape" },
        { "generic_function": "AREA", "lambda_list": ["S"],
          "specializers": [{ "eql": "UNIT-CIRCLE" }], "function": "area/unit" }
    ]
}"#;

// ==================== 前向引用 ====================

#[test]
fn test_subclass_waits_for_forward_referenced_superclass() {
    let loader = loader_with(&[("circle.json", CIRCLE_FIRST), ("shape.json", SHAPE)]);
    loader.load_unit("circle.json").unwrap();

    let runtime = loader.runtime();
    let circle = runtime.find_class(&sym("CIRCLE")).unwrap();
    let shape = runtime.find_class(&sym("SHAPE")).unwrap();
    assert_eq!(circle.state(), ClassState::Unfinalized);
    assert_eq!(shape.state(), ClassState::Placeholder);
    assert!(is_a(&loader, &Value::Class(shape.clone()), "FORWARD-REFERENCED-CLASS"));

    let err = runtime.allocate_instance(&circle).unwrap_err();
    assert_eq!(err.kind(), "not-finalized");

    loader.load_unit("shape.json").unwrap();
    assert_eq!(circle.state(), ClassState::Finalized);
    // the placeholder cell became the real class
    assert!(runtime.find_class(&sym("SHAPE")).unwrap().ptr_eq(&shape));
    assert!(is_a(&loader, &Value::Class(shape), "STANDARD-CLASS"));

    let c = instance_of(&loader, "CIRCLE");
    assert!(is_a(&loader, &c, "SHAPE"));
    assert!(is_a(&loader, &c, "STANDARD-OBJECT"));
    assert!(!is_a(&loader, &c, "INTEGER"));
    let layout = circle.layout().unwrap();
    assert_eq!(layout.position_of(&sym("NAME")), Some(0));
    assert_eq!(layout.position_of(&sym("RADIUS")), Some(1));
}

// ==================== 重定义 ====================

#[test]
fn test_redefinition_migrates_instances() {
    let loader = loader_with(&[("point-v1.json", POINT_V1), ("point-v2.json", POINT_V2)]);
    loader.load_unit("point-v1.json").unwrap();

    let p = instance_of(&loader, "POINT");
    let instance = p.as_instance().unwrap();
    instance.set_slot_value(&sym("X"), Value::Integer(1)).unwrap();
    instance.set_slot_value(&sym("Y"), Value::Integer(2)).unwrap();

    loader.load_unit("point-v2.json").unwrap();
    assert!(instance.is_obsolete());

    assert_eq!(instance.slot_value(&sym("X")).unwrap(), Value::Integer(1));
    assert!(!instance.slot_boundp(&sym("Z")).unwrap());
    assert!(matches!(
        instance.slot_value(&sym("Y")),
        Err(MopError::MissingSlot { .. })
    ));
    assert!(!instance.is_obsolete());
}

// ==================== 方法对象 ====================

#[test]
fn test_method_objects_are_standard_methods() {
    let loader = loader_with(&[("shape.json", SHAPE), ("area.json", AREA)]);
    let reports = loader.load_all(&["shape.json", "area.json"]).unwrap();
    assert_eq!(reports[1].methods, 2);

    let runtime = loader.runtime();
    let area = runtime.find_generic_function(&sym("AREA")).unwrap();
    let method = area.methods()[0].clone().into_value();

    assert_eq!(runtime.type_of(&method), sym("STANDARD-METHOD"));
    assert!(is_a(&loader, &method, "METHOD"));
    assert!(!is_a(&loader, &method, "GENERIC-FUNCTION"));

    let gf = Value::GenericFunction(area);
    assert!(is_a(&loader, &gf, "GENERIC-FUNCTION"));
    assert_eq!(runtime.print(&gf), "#<STANDARD-GENERIC-FUNCTION AREA>");

    let standard_method = Value::Class(runtime.kernel().standard_method.clone());
    assert!(is_a(&loader, &standard_method, "STANDARD-CLASS"));
}

// ==================== 类型协议 ====================

#[test]
fn test_type_protocol_on_immediates() {
    let loader = loader_with(&[]);
    let runtime = loader.runtime();

    assert_eq!(runtime.type_of(&Value::Integer(3)), sym("INTEGER"));
    assert_eq!(runtime.type_of(&Value::Nil), sym("NULL"));
    assert!(is_a(&loader, &Value::Integer(3), "NUMBER"));
    assert!(is_a(&loader, &Value::Nil, "LIST"));
    assert!(is_a(&loader, &Value::string("x"), "T"));
    assert!(!is_a(&loader, &Value::symbol("X"), "NIL"));

    let integer = runtime.class_of(&Value::Integer(3));
    assert_eq!(runtime.print(&Value::Class(integer)), "#<BUILT-IN-CLASS INTEGER>");

    let err = runtime.typep(&Value::Integer(3), &Value::Integer(4)).unwrap_err();
    assert_eq!(err.kind(), "type-error");
}

#[test]
fn test_make_forward_referenced_class_boundary() {
    let loader = loader_with(&[]);
    let runtime = loader.runtime();

    let fwd = runtime
        .make_forward_referenced_class(&Value::symbol("LATER"))
        .unwrap();
    assert_eq!(runtime.print(&Value::Class(fwd.clone())), "#<FORWARD-REFERENCED-CLASS LATER>");
    assert_eq!(runtime.type_of(&Value::Class(fwd.clone())), sym("FORWARD-REFERENCED-CLASS"));
    assert!(runtime.find_class(&sym("LATER")).unwrap().ptr_eq(&fwd));

    let err = runtime
        .make_forward_referenced_class(&Value::Integer(42))
        .unwrap_err();
    assert_eq!(err.kind(), "type-error");
}

// ==================== 错误报告 ====================

#[test]
fn test_failed_unit_reports_and_releases() {
    let bad = r#"{ "classes": [ { "name": "LOOP", "superclasses": ["LOOP"] } ] }"#;
    let loader = loader_with(&[("loop.json", bad)]);
    let err = loader.load_unit("loop.json").unwrap_err();

    assert!(matches!(err, MopApiError::InUnit { .. }));
    let report = err.to_report();
    assert_eq!(report.error_kind, "cyclic-superclass");
    assert_eq!(report.unit.as_deref(), Some("loop.json"));
    assert!(loader.cache().is_empty());
    assert!(loader.runtime().find_class(&sym("LOOP")).is_none());
}
