use super::*;
use crate::decl::{Arg, Field, Func};
use crate::error::IrError;
use crate::ty::Kind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn user() -> Type {
    Type::named_with(
        "example.com/app/model",
        "User",
        Type::structure(vec![
            Field::new("Name", Type::string()),
            Field::new("Age", Type::int()),
            Field::new("Tags", Type::slice_of(Type::string())),
        ]),
    )
}

fn stringer() -> Type {
    Type::named_with(
        "fmt",
        "Stringer",
        Type::interface(vec![Func::new("String").result(Type::string())]),
    )
}

fn is_cast(value: &Value) -> bool {
    matches!(value.kind(), ValueKind::Cast { .. })
}

#[test]
fn cast_to_same_type_is_noop() {
    let v = Value::typed("n", Type::int());
    let cast = v.cast(&Type::int()).unwrap();
    assert_eq!(cast, v);
}

#[test]
fn cast_to_unimplemented_interface_fails() {
    let v = Value::typed("n", Type::int());
    let err = v.cast(&stringer()).unwrap_err();
    assert_eq!(
        err,
        IrError::NotImplemented {
            ty: "int".to_owned(),
            interface: "Stringer".to_owned(),
        }
    );
}

#[test]
fn cast_to_implemented_interface_inserts_nothing() {
    let id = Type::named_with("m", "ID", Type::int())
        .with_methods(vec![Func::new("String").result(Type::string())]);
    let v = Value::typed("id", id);
    let cast = v.cast(&stringer()).unwrap();
    assert!(!is_cast(&cast));
    assert_eq!(cast, v);
}

#[test]
fn cast_anything_to_any() {
    let v = Value::typed("u", user());
    assert_eq!(v.cast(&Type::any()).unwrap(), v);
}

#[test]
fn cast_between_numeric_kinds_inserts_node() {
    let v = Value::typed("n", Type::int());
    let cast = v.cast(&Type::float64()).unwrap();
    assert!(is_cast(&cast));
    assert_eq!(cast.ty(), Some(&Type::float64()));
}

#[test]
fn cast_between_inconvertible_kinds_fails() {
    let v = Value::typed("s", Type::string());
    assert!(matches!(
        v.cast(&Type::int()),
        Err(IrError::NotConvertible { .. })
    ));
    let b = Value::typed("b", Type::bool());
    assert!(b.cast(&Type::int()).is_err());
}

#[test]
fn cast_same_kind_different_name_inserts_node() {
    let id = Type::named_with("m", "ID", Type::int());
    let cast = Value::typed("n", Type::int()).cast(&id).unwrap();
    assert!(is_cast(&cast));
}

#[test]
fn cast_between_same_name_in_different_packages_inserts_node() {
    let a = Type::named_with("example.com/a", "ID", Type::int());
    let b = Type::named_with("example.com/b", "ID", Type::int());
    let cast = Value::typed("x", a.clone()).cast(&b).unwrap();
    assert!(is_cast(&cast));
    assert_eq!(cast.ty(), Some(&b));

    let same = Value::typed("x", a.clone()).cast(&a).unwrap();
    assert!(!is_cast(&same));
}

#[test]
fn cast_with_different_element_types_inserts_node() {
    let ids = Type::slice_of(Type::named_with("m", "ID", Type::string()));
    let v = Value::typed("xs", Type::slice_of(Type::string()));
    assert!(is_cast(&v.cast(&ids).unwrap()));
}

#[test]
fn cast_reconciles_pointer_level() {
    let v = Value::typed("u", user());
    let to_ptr = v.cast(&user().tack_ptr()).unwrap();
    assert!(matches!(
        to_ptr.kind(),
        ValueKind::Unary {
            op: UnaryOp::AddrOf,
            ..
        }
    ));
    assert!(to_ptr.is_ptr());

    let p = Value::typed("p", user().tack_ptr());
    let from_ptr = p.cast(&user()).unwrap();
    assert!(matches!(
        from_ptr.kind(),
        ValueKind::Unary {
            op: UnaryOp::Deref,
            ..
        }
    ));
}

#[test]
fn cast_skips_untyped_and_opaque() {
    let nil = Value::nil();
    assert_eq!(nil.cast(&Type::int()).unwrap(), nil);
    let opaque = Value::typed("x", Type::named("ext", "UUID"));
    assert_eq!(opaque.cast(&Type::string()).unwrap(), opaque);
}

#[test]
fn call_with_matching_args() {
    let x = Value::ident("x").with_signature(Signature::new(
        vec![Type::int(), Type::string()],
        vec![Type::bool()],
    ));
    let call = x.call([Value::int(1), Value::string("a")]).unwrap();
    assert_eq!(call.ty(), Some(&Type::bool()));
    assert!(matches!(call.kind(), ValueKind::Call { args, .. } if args.len() == 2));
}

#[test]
fn call_with_swapped_args_fails() {
    let x = Value::ident("x").with_signature(Signature::new(
        vec![Type::int(), Type::string()],
        Vec::new(),
    ));
    let err = x.call([Value::string("a"), Value::int(1)]).unwrap_err();
    assert!(matches!(err, IrError::Argument { index: 0, .. }));
}

#[test]
fn call_arity_mismatch() {
    let x = Value::ident("x").with_signature(Signature::new(vec![Type::int()], Vec::new()));
    assert_eq!(
        x.call(Vec::new()).unwrap_err(),
        IrError::ArityMismatch {
            expected: 1,
            found: 0
        }
    );
}

#[test]
fn variadic_call_checks_elements() {
    let printf = Func::new("Printf")
        .with_arg(Arg::new("format", Type::string()))
        .unwrap()
        .with_arg(Arg::variadic("args", Type::any()))
        .unwrap();
    let ok = printf.call([Value::string("%d %s"), Value::int(1), Value::string("x")]);
    assert!(ok.is_ok());
    assert!(printf.call([Value::string("plain")]).is_ok());

    let sum = Func::new("Sum")
        .with_arg(Arg::variadic("xs", Type::int()))
        .unwrap();
    assert!(matches!(
        sum.call([Value::int(1), Value::string("2")]),
        Err(IrError::VariadicMismatch { index: 1, .. })
    ));
}

#[test]
fn variadic_accepts_whole_slice() {
    let sum = Func::new("Sum")
        .with_arg(Arg::variadic("xs", Type::int()))
        .unwrap();
    let xs = Value::typed("xs", Type::slice_of(Type::int()));
    let call = sum.call([xs]).unwrap();
    assert!(matches!(call.kind(), ValueKind::Call { spread: true, .. }));
}

#[test]
fn untyped_callee_accepts_anything() {
    let call = Value::ident("f").call([Value::int(1)]).unwrap();
    assert_eq!(call.ty(), None);
}

#[test]
fn dot_resolves_field_type() {
    let u = Value::typed("u", user().tack_ptr());
    let name = u.dot("Name").unwrap();
    assert_eq!(name.ty(), Some(&Type::string()));
    assert!(matches!(
        u.dot("Email"),
        Err(IrError::UnknownField { field, .. }) if field == "Email"
    ));
}

#[test]
fn method_lookup() {
    let err = Type::error();
    let e = Value::typed("err", err);
    let call = e.method("Error").unwrap().call(Vec::new()).unwrap();
    assert_eq!(call.ty(), Some(&Type::string()));
    assert!(matches!(
        e.method("Unwrap"),
        Err(IrError::UnknownMethod { .. })
    ));
    // Method sets of decoded structs are not tracked.
    assert!(Value::typed("u", user()).method("Save").is_ok());
}

#[test]
fn index_element_types() {
    let tags = Value::typed("u", user()).dot("Tags").unwrap();
    assert_eq!(tags.index(0).unwrap().ty(), Some(&Type::string()));

    let m = Value::typed("m", Type::map_of(Type::string(), Type::int()));
    assert_eq!(m.index("k").unwrap().ty(), Some(&Type::int()));

    let s = Value::typed("s", Type::string());
    assert_eq!(s.index(0).unwrap().ty(), Some(&Type::byte()));

    assert!(Value::typed("n", Type::int()).index(0).is_err());
}

#[test]
fn index_through_pointer_derefs() {
    let p = Value::typed("p", Type::slice_of(Type::int()).tack_ptr());
    let item = p.index(1).unwrap();
    let ValueKind::Index { base, .. } = item.kind() else {
        panic!("expected index");
    };
    assert!(matches!(
        base.kind(),
        ValueKind::Unary {
            op: UnaryOp::Deref,
            ..
        }
    ));
}

#[test]
fn assertion_rules() {
    let any = Value::typed("v", Type::any());
    assert_eq!(any.assertion(&Type::int()).unwrap().ty(), Some(&Type::int()));
    let n = Value::typed("n", Type::int());
    assert!(matches!(
        n.assertion(&Type::string()),
        Err(IrError::NotAssertable { .. })
    ));
    let s = Value::typed("s", stringer());
    assert!(s.assertion(&Type::int()).is_err());
}

#[test]
fn set_casts_to_target() {
    let f = Value::typed("f", Type::float64());
    let assign = f.set(Value::int(2)).unwrap();
    let ValueKind::Assign { value, define, .. } = assign.kind() else {
        panic!("expected assignment");
    };
    assert!(!define);
    assert!(is_cast(value));
}

#[test]
fn auto_set_back_patches_type() {
    let mut x = Value::ident("x");
    let assign = x.auto_set(Value::string("hi"));
    assert_eq!(x.ty(), Some(&Type::string()));
    assert!(matches!(assign.kind(), ValueKind::Assign { define: true, .. }));
}

#[test]
fn operator_result_types() {
    let a = Value::typed("a", Type::int());
    assert_eq!(a.add(1).ty(), Some(&Type::int()));
    assert_eq!(a.greater(1).ty(), Some(&Type::bool()));
    assert_eq!(a.equal(1).and(true).ty(), Some(&Type::bool()));
    assert_eq!(a.take_ptr().ty().map(Type::kind), Some(Kind::Pointer));
    assert_eq!(a.take_ptr().deref().ty(), Some(&Type::int()));
}

#[test]
fn operands_are_not_mutated() {
    let a = Value::typed("a", Type::int());
    let before = a.clone();
    let _ = a.add(1).mul(2);
    assert_eq!(a, before);
}

#[test]
fn depth_and_parens() {
    let a = Value::ident("a");
    let b = Value::ident("b");
    assert_eq!(a.depth(), 1);

    let flat = a.add(b.clone());
    assert_eq!(flat.depth(), 2);
    assert!(flat.needs_parens());

    let cmp = a.equal(b.clone());
    assert!(!cmp.needs_parens());

    assert!(!a.not().needs_parens());
    assert!(a.add(b.clone()).not().needs_parens());
    assert!(a.deref().needs_parens());
}

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,3}".prop_map(Value::ident),
        (0i64..100).prop_map(Value::int),
    ]
}

fn arith(depth: u32) -> BoxedStrategy<Value> {
    if depth == 0 {
        return leaf_value().boxed();
    }
    (arith(depth - 1), arith(depth - 1), 0u8..4)
        .prop_map(|(l, r, op)| match op {
            0 => l.add(r),
            1 => l.sub(r),
            2 => l.mul(r),
            _ => l.div(r),
        })
        .boxed()
}

proptest! {
    #[test]
    fn depth_is_one_more_than_deepest_operand(l in arith(2), r in arith(2)) {
        let sum = l.add(r.clone());
        prop_assert_eq!(sum.depth(), 1 + l.depth().max(r.depth()));
    }

    #[test]
    fn arithmetic_over_operators_needs_parens(l in arith(1), r in arith(1)) {
        let node = l.mul(r);
        prop_assert!(node.needs_parens());
    }
}
