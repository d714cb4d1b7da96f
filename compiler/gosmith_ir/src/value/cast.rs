//! Casts, calls and type assertions.

use tracing::trace;

use super::{Value, ValueKind};
use crate::error::IrError;
use crate::ty::{Kind, Type};

impl Value {
    /// Convert this value to `target`, inserting an explicit conversion only
    /// where Go requires one.
    ///
    /// 1. Untyped or opaque on either side: returned unchanged.
    /// 2. One pointer level is added or removed to match `target`.
    /// 3. Interface target: the value must already implement it; no cast node.
    /// 4. Differing kinds, neither a struct: both directions must be
    ///    convertible; a cast node is inserted.
    /// 5. Identical package-qualified type strings: no cast node. Anything else (same kind with
    ///    a different name, differing element types, struct/non-struct pairs)
    ///    gets a cast node.
    pub fn cast(&self, target: &Type) -> Result<Value, IrError> {
        let current = match &self.ty {
            Some(ty) if !ty.is_opaque() && !target.is_opaque() => ty,
            _ => return Ok(self.clone()),
        };

        let reconciled = if target.is_ptr() && !current.is_ptr() {
            self.take_ptr()
        } else if !target.is_ptr() && current.is_ptr() {
            self.deref()
        } else {
            self.clone()
        };

        let from = current.un_ptr();
        let to = target.un_ptr();

        if to.is_interface() {
            if from.implements(&to) {
                return Ok(reconciled);
            }
            return Err(IrError::NotImplemented {
                ty: from.identity(),
                interface: to.identity(),
            });
        }

        if from.kind() != to.kind() && from.kind() != Kind::Struct && to.kind() != Kind::Struct {
            if !(from.convertible_to(&to) && to.convertible_to(&from)) {
                return Err(IrError::NotConvertible {
                    from: from.identity(),
                    to: to.identity(),
                });
            }
            return Ok(reconciled.convert(target));
        }

        if from.qualified() == to.qualified() {
            return Ok(reconciled);
        }
        trace!(from = %from, to = %to, "inserting conversion");
        Ok(reconciled.convert(target))
    }

    fn convert(self, target: &Type) -> Value {
        Value::new(
            ValueKind::Cast {
                operand: Box::new(self),
            },
            Some(target.clone()),
        )
    }

    /// Call this value with `args`.
    ///
    /// With a recorded signature the argument count must match and each
    /// argument is cast to its parameter type. When the last parameter is a
    /// slice, the arguments from that position on are checked one by one
    /// against its element type instead, unless exactly one argument of the
    /// slice type itself is supplied.
    pub fn call(&self, args: impl IntoIterator<Item = Value>) -> Result<Value, IrError> {
        let args: Vec<Value> = args.into_iter().collect();
        let Some(signature) = self.signature.as_deref() else {
            return Ok(self.make_call(args, None, false));
        };
        let params = &signature.params;

        let spread = match (params.last(), args.last()) {
            (Some(last), Some(arg)) if args.len() == params.len() => {
                arg.ty.as_ref().is_some_and(|ty| ty.qualified() == last.qualified())
            }
            _ => false,
        };
        let variadic = params.last().filter(|last| last.is_slice() && !spread);

        let checked = match variadic {
            Some(last) => check_variadic(args, params, last)?,
            None => check_exact(args, params)?,
        };
        let ty = signature.results.first().cloned();
        Ok(self.make_call(checked, ty, spread && signature.variadic))
    }

    fn make_call(&self, args: Vec<Value>, ty: Option<Type>, spread: bool) -> Value {
        Value::new(
            ValueKind::Call {
                callee: Box::new(self.clone()),
                args,
                spread,
            },
            ty,
        )
    }

    /// `x.(T)`.
    ///
    /// `x` must be of interface type and `T` must either be an interface or
    /// implement `x`'s interface.
    pub fn assertion(&self, target: &Type) -> Result<Value, IrError> {
        if let Some(ty) = self.ty.as_ref().filter(|ty| !ty.is_opaque()) {
            let valid = ty.is_interface() && (target.is_interface() || target.implements(ty));
            if !valid {
                return Err(IrError::NotAssertable {
                    ty: ty.identity(),
                    target: target.identity(),
                });
            }
        }
        Ok(Value::new(
            ValueKind::Assert {
                operand: Box::new(self.clone()),
            },
            Some(target.clone()),
        ))
    }
}

fn check_exact(args: Vec<Value>, params: &[Type]) -> Result<Vec<Value>, IrError> {
    if args.len() != params.len() {
        return Err(IrError::ArityMismatch {
            expected: params.len(),
            found: args.len(),
        });
    }
    args.iter()
        .zip(params)
        .enumerate()
        .map(|(index, (arg, param))| {
            arg.cast(param).map_err(|source| IrError::Argument {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

fn check_variadic(args: Vec<Value>, params: &[Type], last: &Type) -> Result<Vec<Value>, IrError> {
    let fixed = params.len() - 1;
    if args.len() < fixed {
        return Err(IrError::ArityMismatch {
            expected: fixed,
            found: args.len(),
        });
    }
    let elem = last.elem().cloned().unwrap_or_else(Type::any);

    let mut checked = check_exact(args[..fixed].to_vec(), &params[..fixed])?;
    for (index, arg) in args.into_iter().enumerate().skip(fixed) {
        if let Some(ty) = arg.ty.as_ref().filter(|ty| !ty.is_opaque()) {
            let matches = ty.qualified() == elem.qualified()
                || (elem.is_interface() && ty.implements(&elem));
            if !matches {
                return Err(IrError::VariadicMismatch {
                    index,
                    expected: elem.identity(),
                    found: ty.identity(),
                });
            }
        }
        checked.push(arg);
    }
    Ok(checked)
}
