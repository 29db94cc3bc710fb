//! End-to-end behavior of record types, lists and field views through the
//! public API.

use recordkit::{
    args, make_record_type, record_type, Behavior, DataError, Kind, Member, Record, RecordList,
    RecordType, Required, Validator,
};
use serde_json::{json, Value};

fn foo() -> RecordType {
    RecordType::builder("Foo")
        .field("a", Required)
        .field("b", json!(2))
        .field("c", Validator::one_of(["ham", "spam"]).with_default(json!("ham")))
        .build()
        .unwrap()
}

fn with_a(foo: &RecordType, a: i64) -> Record {
    foo.construct(args! { a: a }).unwrap()
}

fn a_values(list: &RecordList) -> Vec<Value> {
    list.column("as").unwrap().to_vec()
}

#[test]
fn test_instanceof() {
    let foo = RecordType::builder("Foo")
        .field("a", Validator::instance_of(Kind::Object))
        .build()
        .unwrap();
    assert!(matches!(
        foo.construct(args! { a: 1 }),
        Err(DataError::TypeMismatch { .. })
    ));
    assert!(foo.construct(args! { a: Value::Null }).is_err());
    assert!(matches!(
        foo.construct_default(),
        Err(DataError::MissingRequiredField(_))
    ));
    let f = foo.construct(args! { a: json!({}) }).unwrap();
    assert_eq!(f.get("a"), Some(&json!({})));
}

#[test]
fn test_instanceornone() {
    let foo = RecordType::builder("Foo")
        .field("a", Validator::instance_or_none(Kind::Object))
        .build()
        .unwrap();
    assert!(foo.construct(args! { a: 1 }).is_err());
    assert_eq!(foo.construct(args! { a: Value::Null }).unwrap().get("a"), Some(&Value::Null));
    assert_eq!(foo.construct(args! { a: json!({}) }).unwrap().get("a"), Some(&json!({})));
    assert_eq!(foo.construct_default().unwrap().get("a"), Some(&Value::Null));
}

#[test]
fn test_oneof() {
    let foo = RecordType::builder("Foo")
        .field("a", Validator::one_of(["a", "b", "c"]))
        .build()
        .unwrap();
    assert!(matches!(
        foo.construct(args! { a: "d" }),
        Err(DataError::InvalidEnumValue { .. })
    ));
    assert!(foo.construct(args! { a: Value::Null }).is_err());
    assert!(foo.construct_default().is_err());
    assert_eq!(foo.construct(args! { a: "a" }).unwrap().get("a"), Some(&json!("a")));
}

#[test]
fn test_oneof_with_default() {
    let foo = RecordType::builder("Foo")
        .field("a", Validator::one_of(["a", "b", "c"]).with_default(json!("c")))
        .build()
        .unwrap();
    assert!(foo.construct(args! { a: "d" }).is_err());
    assert_eq!(foo.construct_default().unwrap().get("a"), Some(&json!("c")));
    assert_eq!(foo.construct(args! { a: "a" }).unwrap().get("a"), Some(&json!("a")));
}

#[test]
fn test_length() {
    let foo = RecordType::builder("Foo")
        .field("a", Validator::length(3))
        .build()
        .unwrap();
    assert!(foo.construct_default().is_err());
    assert!(matches!(
        foo.construct(args! { a: 1 }),
        Err(DataError::NoLength { .. })
    ));
    assert!(matches!(
        foo.construct(args! { a: vec![1, 2] }),
        Err(DataError::LengthMismatch { .. })
    ));
    assert_eq!(
        foo.construct(args! { a: vec![1, 2, 3] }).unwrap().get("a"),
        Some(&json!([1, 2, 3]))
    );
}

#[test]
fn test_must_satisfy() {
    let foo = RecordType::builder("Foo")
        .field("n", Validator::must_satisfy(|v| v.as_i64().is_some_and(|n| n % 2 == 0)))
        .build()
        .unwrap();
    assert!(foo.construct(args! { n: 4 }).is_ok());
    assert!(matches!(
        foo.construct(args! { n: 3 }),
        Err(DataError::PredicateFailed { .. })
    ));
    assert!(matches!(
        foo.construct_default(),
        Err(DataError::MissingRequiredField(_))
    ));
}

#[test]
fn test_list_slice_and_view_round() {
    let foo = foo();
    let mut fs = foo.new_list();
    fs.append_new(args! { a: 1, c: "ham" }).unwrap();
    fs.append_new(args! { a: 2, c: "ham" }).unwrap();
    fs.append_new(args! { a: 3, c: "ham" }).unwrap();

    let tail = fs.slice(1..);
    assert_eq!(tail.type_name(), fs.type_name());
    assert_eq!(tail.value_type(), fs.value_type());
    assert_eq!(tail.len(), fs.len() - 1);

    fs.set_slice(..2, vec![foo.construct(args! { a: 10, c: "spam" }).unwrap()])
        .unwrap();
    assert_eq!(a_values(&fs), vec![json!(10), json!(3)]);

    fs.extend(vec![with_a(&foo, 4), with_a(&foo, 5)]).unwrap();
    fs.insert(0, with_a(&foo, 0)).unwrap();
    fs.insert_new(1, args! { a: 1 }).unwrap();
    assert_eq!(
        a_values(&fs),
        vec![json!(0), json!(1), json!(10), json!(3), json!(4), json!(5)]
    );
}

#[test]
fn test_field_view() {
    let foo = make_record_type("Foo", [("x", Member::from(Required))]).unwrap();
    let mut fs = foo
        .list_from(vec![
            foo.construct(args! { x: 1 }).unwrap(),
            foo.construct(args! { x: 2 }).unwrap(),
            foo.construct(args! { x: 3 }).unwrap(),
        ])
        .unwrap();

    let xs = fs.column("xs").unwrap();
    assert_eq!(xs.len(), 3);
    assert_eq!(xs.slice(1..).to_vec(), vec![json!(2), json!(3)]);

    fs.column_mut("xs").unwrap().set(1, 100).unwrap();
    assert_eq!(fs.get(1).unwrap().get("x"), Some(&json!(100)));
    assert_eq!(
        fs.column("xs").unwrap().to_vec(),
        vec![json!(1), json!(100), json!(3)]
    );

    fs.column_mut("xs").unwrap().set_slice(1.., [200, 300]);
    assert_eq!(
        fs.column("xs").unwrap().iter().collect::<Vec<_>>(),
        vec![&json!(1), &json!(200), &json!(300)]
    );
}

#[test]
fn test_wrong_type_rejected_everywhere() {
    let foo = foo();
    let other = foo.clone();
    let bar = RecordType::builder("Bar").field("a", json!(0)).build().unwrap();
    let stranger = bar.construct_default().unwrap();

    let mut fs = foo.list_from(vec![with_a(&other, 1)]).unwrap();
    assert!(fs.append(stranger.clone()).is_err());
    assert!(fs.insert(0, stranger.clone()).is_err());
    assert!(fs.set(0, stranger.clone()).is_err());
    assert!(fs.set_slice(.., vec![stranger.clone()]).is_err());
    assert!(fs.extend(vec![stranger]).is_err());
    assert_eq!(a_values(&fs), vec![json!(1)]);
}

#[test]
fn test_declarative_with_member_function() {
    let foo = record_type! {
        Foo {
            a = Required,
            fn bar = |rec: &Record, _: &[Value]| {
                Ok(json!(rec.get("a").and_then(Value::as_i64).unwrap_or(0) + 1))
            },
        }
    }
    .unwrap();
    let f = foo.construct(args! { a: 1 }).unwrap();
    assert_eq!(f.call("bar", &[]).unwrap(), json!(2));
    assert!(foo.construct_default().is_err());
}

#[test]
fn test_behavior_base_and_record_base() {
    let counting = Behavior::new("Counting").method("count", |rec, _| {
        Ok(json!(rec.fields().count()))
    });
    let foo = RecordType::builder("Foo")
        .base(counting)
        .field("a", json!(1))
        .field("b", json!(2))
        .build()
        .unwrap();
    assert_eq!(foo.construct_default().unwrap().call("count", &[]).unwrap(), json!(2));

    let err = RecordType::builder("Bar").base(foo).build().unwrap_err();
    assert!(matches!(err, DataError::StructuralDefinitionError(_)));
}
