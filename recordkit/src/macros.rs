//! Declarative syntax for record definitions and construction arguments.

/// Build construction arguments from `name: value` pairs.
///
/// Values go through `serde_json::Value::from`, so plain literals, strings,
/// vectors and existing `Value`s all work.
///
/// ```
/// use recordkit::args;
///
/// let args = args! { a: 1, c: "ham" };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($name:ident : $value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(
            args.insert(
                ::std::string::String::from(stringify!($name)),
                $crate::serde_json::Value::from($value),
            );
        )+
        args
    }};
}

/// Define a record type in declaration order.
///
/// `name = spec` declares a field; `fn name = closure` declares a method.
/// Expands to a [`RecordTypeBuilder`](crate::RecordTypeBuilder) chain and
/// evaluates to `DataResult<RecordType>`.
///
/// ```
/// use recordkit::{args, record_type, Required};
/// use serde_json::{json, Value};
///
/// let foo = record_type! {
///     Foo {
///         a = Required,
///         b = json!(2),
///         fn bar = |rec: &recordkit::Record, _: &[Value]| {
///             Ok(json!(rec.get("a").and_then(Value::as_i64).unwrap_or(0) + 1))
///         },
///     }
/// }
/// .unwrap();
/// let f = foo.construct(args! { a: 1 }).unwrap();
/// assert_eq!(f.call("bar", &[]).unwrap(), json!(2));
/// ```
#[macro_export]
macro_rules! record_type {
    ($name:ident { $($body:tt)* }) => {{
        let builder = $crate::RecordTypeBuilder::new(stringify!($name));
        $crate::record_type!(@members builder; $($body)*)
    }};
    (@members $builder:expr; ) => {
        $builder.build()
    };
    (@members $builder:expr; fn $method:ident = $f:expr $(, $($rest:tt)*)?) => {
        $crate::record_type!(@members $builder.method(stringify!($method), $f); $($($rest)*)?)
    };
    (@members $builder:expr; $field:ident = $spec:expr $(, $($rest:tt)*)?) => {
        $crate::record_type!(@members $builder.field(stringify!($field), $spec); $($($rest)*)?)
    };
}
