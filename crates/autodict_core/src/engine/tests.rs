use std::collections::BTreeMap;

use serde_json::json;

use crate::Object;
use crate::info::{
    Arguments, Literal, ObjectInfo, ParamInfo, Shape, Ty, TypeInfo, TypeInfoCell, Typed,
};
use crate::object::cast_ref;
use crate::prelude::*;
use crate::value::{Kind, List};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Record, Clone, PartialEq, Debug)]
struct Point {
    x: i64,
    y: i64,
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Line {
    a: Point,
    b: Point,
}

#[derive(Enumeration, Clone, Copy, PartialEq, Debug)]
enum Color {
    Red = 1,
    Black = 2,
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Meters {
    value: f64,
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Feet {
    value: f64,
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Server {
    host: String,
    #[autodict(default = 8080)]
    port: i64,
    proxy: Option<String>,
    #[autodict(default_with = Vec::new)]
    aliases: Vec<String>,
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Pair(i64, String);

/// A type without structure nor strategy.
#[derive(Clone, PartialEq, Debug)]
struct Foo(i64);

impl Typed for Foo {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>("Foo", Shape::Opaque))
    }
}

fn encode_foo(object: &dyn Object, _: &Options) -> Result<Value, Error> {
    Ok(Value::Int(cast_ref::<Foo>(object)?.0))
}

/// An attribute bag whose balance is stored under a hidden member name.
#[derive(Clone, PartialEq, Debug)]
struct Account {
    owner: String,
    balance: i64,
    extra: Map,
}

impl Typed for Account {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(|| {
            let bag = ObjectInfo::new(construct_account, account_attributes, set_account_attribute)
                .with_param(ParamInfo::positional("owner"))
                .with_param(ParamInfo::keyword("balance").with_default(|| Value::Int(0)))
                .with_annotation("balance", Ty::Int);
            TypeInfo::new::<Self>("Account", Shape::Object(bag))
        })
    }
}

fn construct_account(mut args: Arguments) -> Result<Box<dyn Object>, Error> {
    Ok(Box::new(Account {
        owner: args.take("owner")?,
        balance: args.take("balance")?,
        extra: Map::new(),
    }))
}

fn account_attributes(object: &dyn Object) -> Result<Map, Error> {
    let account = cast_ref::<Account>(object)?;
    let mut map = Map::new();
    map.insert("owner", Value::Str(account.owner.clone()));
    map.insert("_Account__balance", Value::Int(account.balance));
    for (key, value) in account.extra.iter() {
        map.insert(key, value.clone());
    }
    Ok(map)
}

fn set_account_attribute(object: &mut dyn Object, name: &str, value: Value) -> Result<(), Error> {
    let account = crate::object::cast_mut::<Account>(object)?;
    account.extra.insert(name, value);
    Ok(())
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Session {
    user: String,
    #[autodict(post_init, default = 30)]
    timeout: i64,
    #[autodict(post_init)]
    hits: i64,
}

#[derive(Record, Clone, PartialEq, Debug)]
struct Reading {
    celsius: Option<f64>,
}

/// An attribute bag spreading extra arguments.
#[derive(Clone, PartialEq, Debug)]
struct Command {
    program: String,
    args: Vec<Value>,
    env: Map,
}

impl Typed for Command {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(|| {
            let bag = ObjectInfo::new(construct_command, command_attributes, reject_attribute)
                .with_param(ParamInfo::positional("program"))
                .with_param(ParamInfo::var_positional("args"))
                .with_param(ParamInfo::var_keyword("env"));
            TypeInfo::new::<Self>("Command", Shape::Object(bag))
        })
    }
}

fn construct_command(mut args: Arguments) -> Result<Box<dyn Object>, Error> {
    Ok(Box::new(Command {
        program: args.take("program")?,
        args: args.take_var_positional(),
        env: args.take_var_keyword(),
    }))
}

fn command_attributes(object: &dyn Object) -> Result<Map, Error> {
    let command = cast_ref::<Command>(object)?;
    let mut map = Map::new();
    map.insert("program", Value::Str(command.program.clone()));
    map.insert("args", Value::from(List::from_items(Kind::LIST, command.args.clone())));
    map.insert("env", Value::Map(command.env.clone()));
    Ok(map)
}

fn reject_attribute(_: &mut dyn Object, name: &str, _: Value) -> Result<(), Error> {
    Err(Error::custom(format_args!("unexpected attribute `{name}`")))
}

/// An attribute bag without constructor parameters.
#[derive(Clone, PartialEq, Debug)]
struct Note {
    attrs: Map,
}

impl Typed for Note {
    fn type_info() -> &'static TypeInfo {
        static CELL: TypeInfoCell = TypeInfoCell::new();
        CELL.get_or_init(|| {
            let bag = ObjectInfo::new(construct_note, note_attributes, set_note_attribute);
            TypeInfo::new::<Self>("Note", Shape::Object(bag))
        })
    }
}

fn construct_note(_: Arguments) -> Result<Box<dyn Object>, Error> {
    Ok(Box::new(Note { attrs: Map::new() }))
}

fn note_attributes(object: &dyn Object) -> Result<Map, Error> {
    Ok(cast_ref::<Note>(object)?.attrs.clone())
}

fn set_note_attribute(object: &mut dyn Object, name: &str, value: Value) -> Result<(), Error> {
    crate::object::cast_mut::<Note>(object)?.attrs.insert(name, value);
    Ok(())
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register::<Point>()
        .register::<Line>()
        .register::<Color>()
        .register::<Meters>()
        .register::<Feet>()
        .register::<Account>();
    registry
}

fn tree(value: serde_json::Value) -> Value {
    Value::from(value)
}

const UNTAGGED: Options = Options::new().with_cls(false);
const LENIENT: Options = Options::new().strict(false);

// -----------------------------------------------------------------------------
// Records

#[test]
fn record_round_trip() {
    let registry = registry();
    let engine = AutoDict::new(&registry);

    let encoded = engine.encode(&Point { x: 1, y: 2 }, &Options::new()).unwrap();
    assert_eq!(encoded, tree(json!({ "x": 1, "y": 2, "@": "Point" })));

    let point: Point = engine.decode(encoded.clone(), &Options::new()).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });

    // The tag alone is enough.
    let decoded = engine.from_dict(encoded, &Ty::Any, &Options::new()).unwrap();
    assert_eq!(decoded.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
}

#[test]
fn nested_records() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let line = Line {
        a: Point { x: 0, y: 0 },
        b: Point { x: 3, y: 4 },
    };

    let encoded = engine.encode(&line, &Options::new()).unwrap();
    assert_eq!(
        encoded,
        tree(json!({
            "a": { "x": 0, "y": 0, "@": "Point" },
            "b": { "x": 3, "y": 4, "@": "Point" },
            "@": "Line",
        }))
    );
    assert_eq!(engine.decode::<Line>(encoded, &Options::new()).unwrap(), line);

    // Without tags the field types drive decoding.
    let untagged = engine.encode(&line, &UNTAGGED).unwrap();
    assert_eq!(
        untagged,
        tree(json!({ "a": { "x": 0, "y": 0 }, "b": { "x": 3, "y": 4 } }))
    );
    assert_eq!(engine.decode::<Line>(untagged, &UNTAGGED).unwrap(), line);
}

#[test]
fn records_need_no_registration() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);

    let encoded = engine.encode(&Point { x: 5, y: 6 }, &Options::new()).unwrap();
    assert_eq!(encoded, tree(json!({ "x": 5, "y": 6, "@": "Point" })));
    assert_eq!(
        engine.decode::<Point>(encoded, &Options::new()).unwrap(),
        Point { x: 5, y: 6 }
    );
}

#[test]
fn registered_names_are_tags() {
    let mut registry = Registry::empty();
    registry.register_type::<Point>(Registration::new().name("geometry.Point"));
    let engine = AutoDict::new(&registry);

    let encoded = engine.encode(&Point { x: 1, y: 1 }, &Options::new()).unwrap();
    assert_eq!(encoded.type_tag(), Some("geometry.Point"));
    let decoded = engine.from_dict(encoded, &Ty::Any, &Options::new()).unwrap();
    assert!(decoded.downcast_ref::<Point>().is_some());
}

#[test]
fn missing_fields_fall_back() {
    let registry = registry();
    let engine = AutoDict::new(&registry);

    let server: Server = engine
        .decode(tree(json!({ "host": "localhost", "extra": true })), &Options::new())
        .unwrap();
    assert_eq!(
        server,
        Server {
            host: "localhost".into(),
            port: 8080,
            proxy: None,
            aliases: Vec::new(),
        }
    );

    let err = engine
        .decode::<Server>(tree(json!({ "port": 1 })), &Options::new())
        .unwrap_err();
    assert!(
        matches!(&err, Error::MissingDefault { ty, field } if ty == "Server" && field == "host"),
        "{err}"
    );
}

#[test]
fn fields_assigned_after_construction() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);
    let session = Session {
        user: "ann".into(),
        timeout: 5,
        hits: 3,
    };

    let encoded = engine.encode(&session, &UNTAGGED).unwrap();
    assert_eq!(encoded, tree(json!({ "user": "ann", "timeout": 5, "hits": 3 })));
    assert_eq!(engine.decode::<Session>(encoded, &UNTAGGED).unwrap(), session);

    let session: Session = engine
        .decode(tree(json!({ "user": "bob", "hits": 1 })), &Options::new())
        .unwrap();
    assert_eq!(
        session,
        Session {
            user: "bob".into(),
            timeout: 30,
            hits: 1,
        }
    );

    let err = engine
        .decode::<Session>(tree(json!({ "user": "bob" })), &Options::new())
        .unwrap_err();
    assert!(
        matches!(&err, Error::MissingDefault { ty, field } if ty == "Session" && field == "hits"),
        "{err}"
    );
}

#[test]
fn errors_name_the_field_path() {
    let registry = registry();
    let engine = AutoDict::new(&registry);

    let err = engine
        .decode::<Line>(
            tree(json!({ "a": { "x": 0, "y": 0 }, "b": { "x": "oops", "y": 0 } })),
            &Options::new(),
        )
        .unwrap_err();
    assert_eq!(err.field_path(), ["b", "x"]);
    assert!(matches!(err.root(), Error::TypeMismatch { .. }), "{err}");
}

// -----------------------------------------------------------------------------
// Enumerations and tuples

#[test]
fn enumerations() {
    let registry = registry();
    let engine = AutoDict::new(&registry);

    let encoded = engine.encode(&Color::Red, &Options::new()).unwrap();
    assert_eq!(encoded, tree(json!({ "value": 1, "name": "Red", "@": "Color" })));
    assert_eq!(engine.decode::<Color>(encoded, &Options::new()).unwrap(), Color::Red);

    let err = engine
        .decode::<Color>(tree(json!({ "value": 1, "name": "Black" })), &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::InconsistentEnum { .. }), "{err}");

    let err = engine
        .decode::<Color>(tree(json!({ "value": 9, "name": "Red" })), &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEnumValue { .. }), "{err}");
}

#[test]
fn tuple_structs() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);
    let pair = Pair(1, "one".into());

    let tagged = engine.encode(&pair, &Options::new()).unwrap();
    assert_eq!(tagged, tree(json!({ "0": 1, "1": "one", "@": "Pair" })));
    assert_eq!(engine.decode::<Pair>(tagged, &Options::new()).unwrap(), pair);

    let positional = engine.encode(&pair, &UNTAGGED).unwrap();
    assert_eq!(positional.as_list().map(|list| list.kind()), Some(Kind::TUPLE));
    assert_eq!(engine.decode::<Pair>(positional, &UNTAGGED).unwrap(), pair);
}

// -----------------------------------------------------------------------------
// Strictness

#[test]
fn unregistered_types() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let foo = Value::object(Foo(1));

    let err = engine.to_dict(foo.clone(), &Options::new()).unwrap_err();
    assert!(matches!(&err, Error::UnableToDict(name) if name == "Foo"), "{err}");
    assert_eq!(engine.to_dict(foo.clone(), &LENIENT).unwrap(), foo);

    let input = tree(json!({ "a": 1 }));
    let err = engine
        .from_dict(input.clone(), &Ty::named::<Foo>(), &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnableFromDict(_)), "{err}");
    assert_eq!(
        engine.from_dict(input.clone(), &Ty::named::<Foo>(), &LENIENT).unwrap(),
        input
    );
}

#[test]
fn nested_failures_are_localized() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let items = Value::from(List::from_items(
        Kind::LIST,
        vec![Value::Int(0), Value::object(Foo(1))],
    ));

    let err = engine.to_dict(items.clone(), &Options::new()).unwrap_err();
    assert_eq!(err.field_path(), ["1"]);
    assert!(matches!(err.root(), Error::UnableToDict(_)));
    assert_eq!(engine.to_dict(items.clone(), &LENIENT).unwrap(), items);
}

#[test]
fn leniency_never_changes_successes() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let line = Line {
        a: Point { x: 1, y: 2 },
        b: Point { x: 3, y: 4 },
    };

    let strict = engine.encode(&line, &Options::new()).unwrap();
    let lenient = engine.encode(&line, &LENIENT).unwrap();
    assert_eq!(strict, lenient);
    assert_eq!(
        engine.decode::<Line>(strict, &Options::new()).unwrap(),
        engine.decode::<Line>(lenient, &LENIENT).unwrap(),
    );
}

#[test]
fn partial_registrations() {
    let mut registry = Registry::empty();
    registry.mark_encode_only::<Foo>(Registration::new().encode(encode_foo));
    let engine = AutoDict::new(&registry);

    assert_eq!(
        engine.to_dict(Value::object(Foo(3)), &Options::new()).unwrap(),
        Value::Int(3)
    );
    let err = engine
        .from_dict(Value::Int(3), &Ty::named::<Foo>(), &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnableFromDict(_)), "{err}");
}

#[test]
fn unknown_tags() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let input = tree(json!({ "x": 1, "@": "Ghost" }));

    let err = engine
        .from_dict(input.clone(), &Ty::Any, &Options::new())
        .unwrap_err();
    assert!(matches!(&err, Error::UnableFromDict(name) if name == "Ghost"), "{err}");

    // The tag is dropped, the mapping stays a mapping.
    assert_eq!(
        engine.from_dict(input.clone(), &Ty::Any, &LENIENT).unwrap(),
        tree(json!({ "x": 1 }))
    );

    // A declared type takes over.
    let point: Point = engine
        .decode(tree(json!({ "x": 1, "y": 2, "@": "Ghost" })), &Options::new())
        .unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

// -----------------------------------------------------------------------------
// Declared types

#[test]
fn unions_try_every_member() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let ty = Ty::union([Ty::Str, Ty::named::<Point>(), Ty::list(Ty::Str)]);

    let value = engine
        .from_dict(tree(json!(["a", "b"])), &ty, &Options::new())
        .unwrap();
    assert_eq!(value, tree(json!(["a", "b"])));

    let value = engine
        .from_dict(tree(json!({ "x": 1, "y": 2 })), &ty, &Options::new())
        .unwrap();
    assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));

    // Named members accept any kind and report their own failure.
    let err = engine.from_dict(Value::Int(1), &ty, &Options::new()).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "{err}");

    let leaves = Ty::union([Ty::Str, Ty::list(Ty::Str)]);
    let err = engine.from_dict(Value::Int(1), &leaves, &Options::new()).unwrap_err();
    assert!(matches!(err, Error::NoUnionMatch { found: "int", .. }), "{err}");
}

#[test]
fn integers_are_not_floats() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let numbers = Ty::union([Ty::Int, Ty::Float]);

    let value = engine.from_dict(Value::Int(1), &numbers, &Options::new()).unwrap();
    assert!(matches!(value, Value::Int(1)), "{value:?}");
    let value = engine.from_dict(Value::Float(1.5), &numbers, &Options::new()).unwrap();
    assert!(matches!(value, Value::Float(_)), "{value:?}");

    // Without an integer member, integers widen to the float member.
    let value = engine
        .from_dict(Value::Int(2), &Ty::union([Ty::Str, Ty::Float]), &Options::new())
        .unwrap();
    assert_eq!(value, Value::Int(2));

    let reading: Reading = engine
        .decode(tree(json!({ "celsius": 3 })), &Options::new())
        .unwrap();
    assert_eq!(reading, Reading { celsius: Some(3.0) });
}

#[test]
fn tags_settle_ambiguous_unions() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let ty = Ty::union([Ty::named::<Meters>(), Ty::named::<Feet>()]);

    let err = engine
        .from_dict(tree(json!({ "value": 1.5 })), &ty, &Options::new())
        .unwrap_err();
    match err {
        Error::AmbiguousUnion { matches, .. } => assert_eq!(matches, ["Meters", "Feet"]),
        other => panic!("unexpected error: {other}"),
    }

    let value = engine
        .from_dict(tree(json!({ "value": 1.5, "@": "Feet" })), &ty, &Options::new())
        .unwrap();
    assert_eq!(value.downcast_ref::<Feet>(), Some(&Feet { value: 1.5 }));
}

#[test]
fn references_resolve_by_name() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let input = tree(json!({ "x": 1, "y": 2 }));

    let value = engine
        .from_dict(input.clone(), &Ty::by_name("Point"), &UNTAGGED)
        .unwrap();
    assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));

    let err = engine
        .from_dict(input, &Ty::by_name("Nowhere"), &UNTAGGED)
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvedReference(_)), "{err}");
}

#[test]
fn literals() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);
    let ty = Ty::literal([Literal::from("debug"), Literal::from("info")]);

    let value = engine
        .from_dict(Value::Str("info".into()), &ty, &Options::new())
        .unwrap();
    assert_eq!(value, Value::Str("info".into()));

    let err = engine
        .from_dict(Value::Str("trace".into()), &ty, &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::LiteralMismatch { .. }), "{err}");
}

#[test]
fn containers_of_records() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let points = BTreeMap::from([
        ("origin".to_owned(), Point { x: 0, y: 0 }),
        ("unit".to_owned(), Point { x: 1, y: 1 }),
    ]);

    let encoded = engine.encode(&points, &UNTAGGED).unwrap();
    assert_eq!(
        encoded,
        tree(json!({ "origin": { "x": 0, "y": 0 }, "unit": { "x": 1, "y": 1 } }))
    );
    let decoded: BTreeMap<String, Point> = engine.decode(encoded, &UNTAGGED).unwrap();
    assert_eq!(decoded, points);
}

#[test]
fn container_shape_mismatch() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);
    let ty = Ty::list(Ty::Int);

    let err = engine.from_dict(Value::Int(1), &ty, &Options::new()).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "{err}");
    assert_eq!(engine.from_dict(Value::Int(1), &ty, &LENIENT).unwrap(), Value::Int(1));
}

#[test]
fn shallow_conversion() {
    let registry = registry();
    let engine = AutoDict::new(&registry);
    let shallow = Options::new().recursively(false);
    let line = Line {
        a: Point { x: 0, y: 0 },
        b: Point { x: 1, y: 1 },
    };

    let encoded = engine.encode(&line, &shallow).unwrap();
    let map = encoded.as_map().unwrap();
    assert_eq!(map.get("a"), Some(&Value::object(Point { x: 0, y: 0 })));
    assert_eq!(encoded.type_tag(), Some("Line"));

    // Items left as trees do not decode into fields.
    let tagged = engine.encode(&line, &Options::new()).unwrap();
    assert!(engine.decode::<Line>(tagged, &shallow).is_err());
}

// -----------------------------------------------------------------------------
// Attribute bags

#[test]
fn attribute_bags() {
    let registry = registry();
    let engine = AutoDict::new(&registry);

    let input = tree(json!({
        "owner": "ann",
        "_Account__balance": 5,
        "note": "vip",
        "@": "Account",
    }));
    let value = engine.from_dict(input.clone(), &Ty::Any, &Options::new()).unwrap();
    let account = value.downcast_ref::<Account>().unwrap();
    assert_eq!(account.owner, "ann");
    assert_eq!(account.balance, 5);
    assert_eq!(account.extra.get("note"), Some(&Value::Str("vip".into())));

    assert_eq!(engine.to_dict(value, &Options::new()).unwrap(), input);
}

#[test]
fn attribute_bag_defaults() {
    let registry = registry();
    let engine = AutoDict::new(&registry);

    let value = engine
        .from_dict(tree(json!({ "owner": "bob" })), &Ty::named::<Account>(), &Options::new())
        .unwrap();
    assert_eq!(value.downcast_ref::<Account>().map(|a| a.balance), Some(0));

    let err = engine
        .from_dict(tree(json!({ "balance": 1 })), &Ty::named::<Account>(), &Options::new())
        .unwrap_err();
    assert!(matches!(err, Error::MissingDefault { .. }), "{err}");
}

#[test]
fn variadic_parameters() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);
    let ty = Ty::named::<Command>();

    let input = tree(json!({
        "program": "ls",
        "args": ["-l", "/tmp"],
        "HOME": "/root",
        "_Command__user": "ann",
    }));
    let value = engine.from_dict(input, &ty, &Options::new()).unwrap();
    let command = value.downcast_ref::<Command>().unwrap();
    assert_eq!(command.program, "ls");
    assert_eq!(command.args, [Value::Str("-l".into()), Value::Str("/tmp".into())]);
    assert_eq!(command.env.len(), 2);
    assert_eq!(command.env.get("HOME"), Some(&Value::Str("/root".into())));
    assert_eq!(command.env.get("user"), Some(&Value::Str("ann".into())));

    // A mapping under the keyword parameter's own name merges into it.
    let encoded = engine.to_dict(value.clone(), &UNTAGGED).unwrap();
    let env = encoded.as_map().and_then(|map| map.get("env"));
    assert_eq!(env.map(Value::kind_name), Some("map"));
    let decoded = engine.from_dict(encoded, &ty, &Options::new()).unwrap();
    assert_eq!(decoded.downcast_ref::<Command>(), Some(command));

    let err = engine
        .from_dict(tree(json!({ "program": "ls", "args": "-l" })), &ty, &Options::new())
        .unwrap_err();
    assert_eq!(err.field_path(), ["args"]);
    assert!(matches!(err.root(), Error::TypeMismatch { .. }), "{err}");
}

#[test]
fn parameterless_attribute_bags() {
    let registry = Registry::empty();
    let engine = AutoDict::new(&registry);

    let value = engine
        .from_dict(
            tree(json!({ "title": "todo", "pinned": true })),
            &Ty::named::<Note>(),
            &Options::new(),
        )
        .unwrap();
    let note = value.downcast_ref::<Note>().unwrap();
    assert_eq!(note.attrs.len(), 2);
    assert_eq!(note.attrs.get("title"), Some(&Value::Str("todo".into())));
    assert_eq!(note.attrs.get("pinned"), Some(&Value::Bool(true)));
}
