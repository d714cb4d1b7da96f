use super::*;
use crate::ty::Kind;
use pretty_assertions::assert_eq;

#[test]
fn variadic_must_be_last() {
    let func = Func::new("Log")
        .with_arg(Arg::variadic("args", Type::any()))
        .unwrap();
    let err = func.with_arg(Arg::new("level", Type::int())).unwrap_err();
    assert_eq!(
        err,
        IrError::VariadicNotLast {
            func: "Log".to_owned(),
            arg: "args".to_owned(),
        }
    );
}

#[test]
fn signature_reflects_args_and_results() {
    let func = Func::new("Find")
        .with_args([Arg::new("id", Type::int64()), Arg::variadic("opts", Type::string())])
        .unwrap()
        .result(Type::string())
        .result(Type::error());
    let sig = func.signature();
    assert!(sig.variadic);
    assert_eq!(sig.identity(), "(int64, ...string) (string, error)");
    assert_eq!(func.as_type().kind(), Kind::Func);
}

#[test]
fn struct_as_type_round_trips_through_decl() {
    let decl = Struct::new("Node")
        .in_package("example.com/list")
        .add_fields([
            Field::new("Value", Type::int()),
            Field::new("Next", Type::named("example.com/list", "Node").tack_ptr()),
        ])
        .with_note(Note::line("Node is a list cell."));
    let ty = decl.as_type();
    assert_eq!(ty.identity(), "Node");
    assert_eq!(ty.fields().len(), 2);
    assert_eq!(Decl::from_type(&ty), Some(Decl::Struct(decl)));
}

#[test]
fn interface_as_type() {
    let decl = Interface::new("Store").add_methods([Func::new("Close").result(Type::error())]);
    let ty = decl.as_type();
    assert!(ty.is_interface());
    assert!(ty.method("Close").is_some());
    assert!(matches!(Decl::from_type(&ty), Some(Decl::Interface(_))));
}

#[test]
fn named_non_struct_becomes_type_decl() {
    let ty = Type::named_with("m", "IDs", Type::slice_of(Type::int64()));
    let Some(Decl::Type(decl)) = Decl::from_type(&ty) else {
        panic!("expected a type declaration");
    };
    assert_eq!(decl.name, "IDs");
    assert_eq!(decl.underlying.identity(), "[]int64");
}

#[test]
fn opaque_and_anonymous_types_have_no_decl() {
    assert_eq!(Decl::from_type(&Type::named("ext", "UUID")), None);
    assert_eq!(Decl::from_type(&Type::structure(Vec::new())), None);
}

#[test]
fn literal_value_is_callable() {
    let lit = Func::literal().result(Type::int()).inline();
    let call = lit.call(Vec::new()).unwrap();
    assert_eq!(call.ty(), Some(&Type::int()));
}

#[test]
fn arg_value_is_typed() {
    let arg = Arg::new("ctx", Type::context());
    assert_eq!(arg.value().ty().map(Type::identity).as_deref(), Some("Context"));
}

#[test]
fn body_statements_append_in_order() {
    let func = Func::new("F")
        .c(Value::ident("a").add(1))
        .c(Stmt::ret([Value::nil()]));
    assert_eq!(func.body.len(), 2);
    assert!(matches!(func.body[1], Stmt::Return(_)));
}
