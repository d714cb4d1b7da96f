use super::*;
use gosmith_ir::{
    Arg, ChanDir, Field, ForRange, Func, IfChain, Interface, Note, Receiver, Signature, Struct,
    TypeDecl,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn decl(decl: impl Into<Decl>) -> String {
    render_decl(&decl.into(), &mut ImportTable::new(""))
}

fn value(value: &Value) -> String {
    render_value(value, &mut ImportTable::new(""))
}

fn ty(ty: &Type) -> String {
    render_type(ty, &mut ImportTable::new(""))
}

fn stmt(stmt: impl Into<Stmt>) -> String {
    render_stmt(&stmt.into(), &mut ImportTable::new(""))
}

fn ident(name: &str) -> Value {
    Value::ident(name)
}

// Declarations

#[test]
fn self_referential_struct() {
    let node = Struct::new("Node").add_fields([
        Field::new("Value", Type::int()),
        Field::new("Next", Type::pointer_to(Type::named("", "Node"))),
    ]);
    assert_eq!(decl(node), "type Node struct {\n\tValue int\n\tNext *Node\n}");
}

#[test]
fn empty_struct_is_compact() {
    assert_eq!(decl(Struct::new("Empty")), "type Empty struct{}");
}

#[test]
fn field_tags_and_notes() {
    let user = Struct::new("User")
        .with_note(Note::line("User is an account."))
        .add_fields([
            Field::new("ID", Type::string())
                .with_tag(r#"json:"id""#)
                .with_note(Note::line("ID is unique.")),
            Field::new("Name", Type::string()).with_note(Note::block("legacy")),
            Field::embedded(Type::named("", "Base")),
        ]);
    assert_eq!(
        decl(user),
        "// User is an account.\n\
         type User struct {\n\
         \t// ID is unique.\n\
         \tID string `json:\"id\"`\n\
         \tName string /* legacy */\n\
         \tBase\n\
         }"
    );
}

#[test]
fn interface_declaration() {
    let store = Interface::new("Store").add_methods([
        Func::new("Get")
            .with_arg(Arg::new("id", Type::string()))
            .unwrap()
            .result(Type::pointer_to(Type::named("", "User")))
            .result(Type::error()),
        Func::new("Close").result(Type::error()),
    ]);
    assert_eq!(
        decl(store),
        "type Store interface {\n\tGet(id string) (*User, error)\n\tClose() error\n}"
    );
}

#[test]
fn named_and_alias_type_declarations() {
    assert_eq!(decl(TypeDecl::new("Status", Type::string())), "type Status string");
    let mut alias = TypeDecl::new("IDs", Type::slice_of(Type::int64()));
    alias.alias = true;
    assert_eq!(decl(alias), "type IDs = []int64");
}

#[test]
fn method_with_variadic_arg() {
    let join = Func::new("Join")
        .with_receiver(Receiver::new("n", Type::pointer_to(Type::named("", "Node"))))
        .with_arg(Arg::new("sep", Type::string()))
        .unwrap()
        .with_arg(Arg::variadic("parts", Type::string()))
        .unwrap()
        .result(Type::string())
        .c(Stmt::ret([ident("sep")]));
    assert_eq!(
        decl(join),
        "func (n *Node) Join(sep string, parts ...string) string {\n\treturn sep\n}"
    );
}

#[test]
fn named_results_and_doc_lines() {
    let split = Func::new("Split")
        .with_note(Note::line("Split cuts s.\nSecond line."))
        .named_result("head", Type::string())
        .named_result("err", Type::error());
    assert_eq!(
        decl(split),
        "// Split cuts s.\n// Second line.\nfunc Split() (head string, err error) {\n}"
    );
}

#[test]
fn nested_blocks_indent() {
    let f = Func::new("F").c(IfChain::new(ident("a"), [Stmt::Return(Vec::new())]));
    assert_eq!(decl(f), "func F() {\n\tif a {\n\t\treturn\n\t}\n}");
}

#[test]
fn body_notes_skip_suppressed() {
    let f = Func::new("F")
        .c(Note::line("step one"))
        .c(Note::suppressed("hidden"))
        .c(Note::block("b"));
    assert_eq!(decl(f), "func F() {\n\t// step one\n\t/* b */\n}");
}

// Function literals

#[test]
fn inline_literal() {
    let f = Func::literal()
        .result(Type::int())
        .c(Value::raw("x++"))
        .c(Stmt::ret([Value::int(1)]))
        .inline();
    assert_eq!(value(&Value::func(f)), "func() int { x++; return 1 }");
    assert_eq!(value(&Value::func(Func::literal().inline())), "func() {}");
}

#[test]
fn block_literal() {
    let f = Func::literal().c(Stmt::Return(Vec::new()));
    assert_eq!(value(&Value::func(f)), "func() {\n\treturn\n}");
}

// Expressions

#[test]
fn checked_call() {
    let x = ident("x").with_signature(Signature::new(
        vec![Type::int(), Type::string()],
        vec![Type::bool()],
    ));
    let call = x.call([Value::int(1), Value::string("a")]).unwrap();
    assert_eq!(value(&call), "x(1, \"a\")");
}

#[test]
fn spread_call() {
    let sum = Func::new("Sum")
        .with_arg(Arg::variadic("xs", Type::int()))
        .unwrap();
    let xs = Value::typed("xs", Type::slice_of(Type::int()));
    assert_eq!(value(&sum.call([xs]).unwrap()), "Sum(xs...)");
    assert_eq!(
        value(&sum.call([Value::int(1), Value::int(2)]).unwrap()),
        "Sum(1, 2)"
    );
}

#[test]
fn nested_binary_gets_parens() {
    assert_eq!(value(&ident("a").add(ident("b"))), "a + b");
    assert_eq!(value(&ident("a").add(ident("b")).mul(ident("c"))), "(a + b) * c");
    assert_eq!(value(&ident("a").and(ident("b")).or(ident("c"))), "(a && b) || c");
}

#[test]
fn comparisons_stay_flat() {
    let cond = ident("a").equal(ident("b")).and(ident("c").less(ident("d")));
    assert_eq!(value(&cond), "a == b && c < d");
}

#[test]
fn nested_comparisons_get_parens() {
    let right = ident("x").equal(ident("a").equal(ident("b")));
    assert_eq!(value(&right), "x == (a == b)");
    let left = ident("a").less(ident("b")).not_equal(ident("ok"));
    assert_eq!(value(&left), "(a < b) != ok");
}

#[test]
fn unary_operators() {
    assert_eq!(value(&ident("ok").not()), "!ok");
    assert_eq!(value(&ident("a").equal(ident("b")).not()), "!(a == b)");
    assert_eq!(value(&ident("p").deref()), "*p");
    assert_eq!(value(&ident("v").take_ptr()), "&v");
    assert_eq!(value(&ident("p").deref().dot("X").unwrap()), "(*p).X");
}

#[test]
fn casts_and_assertions() {
    let n = Value::typed("n", Type::int());
    assert_eq!(value(&n.cast(&Type::int64()).unwrap()), "int64(n)");

    let a = Type::named_with("", "A", Type::int());
    let b = Type::named_with("", "B", Type::int());
    let p = Value::typed("p", Type::pointer_to(a));
    assert_eq!(value(&p.cast(&Type::pointer_to(b)).unwrap()), "(*B)(p)");

    let v = Value::typed("v", Type::any());
    assert_eq!(value(&v.assertion(&Type::string()).unwrap()), "v.(string)");
}

#[test]
fn cast_to_same_name_from_another_package() {
    let mut imports = ImportTable::new("example.com/a");
    let x = Value::typed("x", Type::named_with("example.com/a", "ID", Type::int()));
    let cast = x.cast(&Type::named_with("example.com/b", "ID", Type::int())).unwrap();
    assert_eq!(render_value(&cast, &mut imports), "b.ID(x)");
    assert_eq!(imports.entries(), vec![("example.com/b", "b")]);
}

#[test]
fn assignments() {
    assert_eq!(value(&ident("x").set(Value::int(1)).unwrap()), "x = 1");
    let mut v = ident("v");
    let define = v.auto_set(Value::string("s"));
    assert_eq!(value(&define), "v := \"s\"");
    assert_eq!(v.ty(), Some(&Type::string()));
}

#[test]
fn index_and_selectors() {
    let items = Value::typed("items", Type::slice_of(Type::string()));
    assert_eq!(value(&items.index(Value::int(0)).unwrap()), "items[0]");
    let tuple = Value::tuple([ident("a"), ident("b")]);
    assert_eq!(value(&tuple), "a, b");
}

#[test]
fn literals() {
    assert_eq!(value(&Value::float(1.0)), "1.0");
    assert_eq!(value(&Value::float(2.5)), "2.5");
    assert_eq!(value(&Value::bool(true)), "true");
    assert_eq!(value(&Value::nil()), "nil");
    assert_eq!(value(&Value::string("a\"b\\c\n")), r#""a\"b\\c\n""#);
}

#[test]
fn non_finite_floats_use_math() {
    let mut imports = ImportTable::new("example.com/app");
    let inf = Value::float(f64::INFINITY);
    assert_eq!(render_value(&inf, &mut imports), "math.Inf(1)");
    let neg = Value::float(f64::NEG_INFINITY);
    assert_eq!(render_value(&neg, &mut imports), "math.Inf(-1)");
    assert_eq!(render_value(&Value::float(f64::NAN), &mut imports), "math.NaN()");
    assert_eq!(imports.entries(), vec![("math", "math")]);
}

#[test]
fn zero_values() {
    let user = Type::named_with("", "User", Type::structure(Vec::new()));
    assert_eq!(value(&Type::pointer_to(user.clone()).zero()), "&User{}");
    assert_eq!(value(&Type::pointer_to(Type::int()).zero()), "nil");
    assert_eq!(value(&user.zero()), "User{}");
    assert_eq!(value(&Type::array_of("4", Type::byte()).zero()), "[4]byte{}");
    assert_eq!(value(&Type::slice_of(Type::string()).zero()), "([]string)(nil)");
    assert_eq!(
        value(&Type::map_of(Type::string(), Type::int()).zero()),
        "(map[string]int)(nil)"
    );
    assert_eq!(value(&Type::string().zero()), "\"\"");
    assert_eq!(value(&Type::bool().zero()), "false");
    assert_eq!(value(&Type::float64().zero()), "0");
    assert_eq!(value(&Type::error().zero()), "nil");
    assert_eq!(value(&Type::named("ext", "Opaque").zero()), "nil");
}

// Types

#[test]
fn composite_types() {
    let node = Type::named("", "Node");
    assert_eq!(
        ty(&Type::map_of(Type::string(), Type::slice_of(Type::pointer_to(node)))),
        "map[string][]*Node"
    );
    assert_eq!(ty(&Type::chan_of(ChanDir::Recv, Type::int())), "<-chan int");
    assert_eq!(ty(&Type::chan_of(ChanDir::Send, Type::int())), "chan<- int");
    let sig = Signature::new(
        vec![Type::int(), Type::slice_of(Type::string())],
        vec![Type::error()],
    )
    .variadic();
    assert_eq!(ty(&Type::func(sig)), "func(int, ...string) error");
    assert_eq!(ty(&Type::any()), "interface{}");
    assert_eq!(
        ty(&Type::structure(vec![Field::new("A", Type::int())])),
        "struct {\n\tA int\n}"
    );
}

// Imports

#[test]
fn foreign_names_register_imports() {
    let mut imports = ImportTable::new("example.com/app");
    let id = Type::named("github.com/google/uuid", "UUID");
    assert_eq!(render_type(&id, &mut imports), "uuid.UUID");
    let own = Type::named("example.com/app", "User");
    assert_eq!(render_type(&own, &mut imports), "User");

    let call = Value::qualified("fmt", "Sprintf")
        .call([Value::string("%d"), Value::int(1)])
        .unwrap();
    assert_eq!(render_value(&call, &mut imports), "fmt.Sprintf(\"%d\", 1)");
    assert_eq!(imports.entries(), vec![("fmt", "fmt"), ("github.com/google/uuid", "uuid")]);
}

// Statements

#[test]
fn nil_check() {
    let check = IfChain::nil_check(&ident("err"), false, [Stmt::ret([ident("err")])]);
    assert_eq!(stmt(check), "if err != nil {\n\treturn err\n}");
}

#[test]
fn if_else_chain() {
    let chain = IfChain::new(ident("a"), [Stmt::ret([Value::int(1)])])
        .else_if(ident("b"), [Stmt::ret([Value::int(2)])])
        .otherwise([Stmt::ret([Value::int(3)])]);
    assert_eq!(
        stmt(chain),
        "if a {\n\treturn 1\n} else if b {\n\treturn 2\n} else {\n\treturn 3\n}"
    );
}

#[test]
fn range_loops() {
    let over_values = ForRange::new(ident("items"))
        .value(ident("item"))
        .c(ident("use").call([ident("item")]).unwrap());
    assert_eq!(
        stmt(over_values),
        "for _, item := range items {\n\tuse(item)\n}"
    );
    assert_eq!(
        stmt(ForRange::new(ident("m")).key(ident("k"))),
        "for k := range m {\n}"
    );
    assert_eq!(stmt(ForRange::new(ident("ch"))), "for range ch {\n}");
}

#[test]
fn multiple_return_values() {
    assert_eq!(stmt(Stmt::ret([ident("a"), Value::nil()])), "return a, nil");
}

#[derive(Copy, Clone, Debug)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
}

fn apply(left: &Value, op: Op, right: Value) -> Value {
    match op {
        Op::Add => left.add(right),
        Op::Sub => left.sub(right),
        Op::Mul => left.mul(right),
        Op::Div => left.div(right),
        Op::And => left.and(right),
        Op::Or => left.or(right),
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        Just(Op::Sub),
        Just(Op::Mul),
        Just(Op::Div),
        Just(Op::And),
        Just(Op::Or),
    ]
}

proptest! {
    #[test]
    fn left_fold_groups_each_nested_operand(ops in prop::collection::vec(op(), 1..8)) {
        let mut expr = ident("x0");
        for (i, op) in ops.iter().enumerate() {
            expr = apply(&expr, *op, ident(&format!("x{}", i + 1)));
        }
        let text = value(&expr);
        prop_assert_eq!(text.matches('(').count(), ops.len() - 1);
        prop_assert_eq!(text.matches(')').count(), ops.len() - 1);
    }
}
