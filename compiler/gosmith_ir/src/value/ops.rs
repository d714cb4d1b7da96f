//! Operators, selection, indexing and assignment.

use tracing::trace;

use super::{BinaryOp, UnaryOp, Value, ValueKind};
use crate::error::IrError;
use crate::ty::{Kind, Type, TypeNode};

impl Value {
    fn binary(&self, op: BinaryOp, rhs: Value) -> Value {
        let ty = if op.is_comparison() || matches!(op, BinaryOp::And | BinaryOp::Or) {
            Some(Type::bool())
        } else {
            self.ty.clone()
        };
        Value::new(
            ValueKind::Binary {
                op,
                left: Box::new(self.clone()),
                right: Box::new(rhs),
            },
            ty,
        )
    }

    fn unary(&self, op: UnaryOp, ty: Option<Type>) -> Value {
        Value::new(
            ValueKind::Unary {
                op,
                operand: Box::new(self.clone()),
            },
            ty,
        )
    }

    pub fn add(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Add, rhs.into())
    }

    pub fn sub(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Sub, rhs.into())
    }

    pub fn mul(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Mul, rhs.into())
    }

    pub fn div(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Div, rhs.into())
    }

    pub fn equal(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Eq, rhs.into())
    }

    pub fn not_equal(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::NotEq, rhs.into())
    }

    pub fn greater(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Gt, rhs.into())
    }

    pub fn less(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Lt, rhs.into())
    }

    pub fn greater_equal(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::GtEq, rhs.into())
    }

    pub fn less_equal(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::LtEq, rhs.into())
    }

    pub fn and(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::And, rhs.into())
    }

    pub fn or(&self, rhs: impl Into<Value>) -> Value {
        self.binary(BinaryOp::Or, rhs.into())
    }

    #[must_use]
    pub fn not(&self) -> Value {
        self.unary(UnaryOp::Not, Some(Type::bool()))
    }

    /// `*x`. The result type is the pointee of `x`'s type.
    #[must_use]
    pub fn deref(&self) -> Value {
        self.unary(UnaryOp::Deref, self.ty.as_ref().map(Type::un_ptr))
    }

    /// `&x`.
    #[must_use]
    pub fn take_ptr(&self) -> Value {
        self.unary(UnaryOp::AddrOf, self.ty.as_ref().map(Type::tack_ptr))
    }

    /// `x.Field`, or a dotted path `x.A.B`.
    ///
    /// Pointers are dereferenced implicitly. Fails when the type is known to
    /// be a struct without such a field.
    pub fn dot(&self, path: &str) -> Result<Value, IrError> {
        let ty = match &self.ty {
            Some(ty) if !ty.is_opaque() => match ty.field(path) {
                Some(field) => Some(field.ty.clone()),
                None => {
                    return Err(IrError::UnknownField {
                        ty: ty.identity(),
                        field: path.to_owned(),
                    })
                }
            },
            _ => None,
        };
        Ok(Value::new(
            ValueKind::Dot {
                base: Box::new(self.clone()),
                name: path.to_owned(),
            },
            ty,
        ))
    }

    /// `x.Method`, carrying the method's signature for a following call.
    ///
    /// Fails only when this value's full method set is known and lacks `name`.
    pub fn method(&self, name: &str) -> Result<Value, IrError> {
        let found = self.ty.as_ref().and_then(|ty| ty.method(name));
        let selection = Value::new(
            ValueKind::Dot {
                base: Box::new(self.clone()),
                name: name.to_owned(),
            },
            None,
        );
        match (found, &self.ty) {
            (Some(method), _) => {
                let signature = method.signature();
                Ok(Value {
                    ty: Some(Type::func(signature.clone())),
                    signature: Some(Box::new(signature)),
                    ..selection
                })
            }
            (None, Some(ty)) if ty.knows_methods() => Err(IrError::UnknownMethod {
                ty: ty.identity(),
                method: name.to_owned(),
            }),
            (None, _) => {
                trace!(method = name, "selecting method on a value with unknown method set");
                Ok(selection)
            }
        }
    }

    /// `x[i]`. A pointer base is dereferenced first.
    pub fn index(&self, index: impl Into<Value>) -> Result<Value, IrError> {
        let base = if self.is_ptr() { self.deref() } else { self.clone() };
        let ty = match &base.ty {
            Some(ty) if !ty.is_opaque() => Some(element_type(ty)?),
            _ => None,
        };
        Ok(Value::new(
            ValueKind::Index {
                base: Box::new(base),
                index: Box::new(index.into()),
            },
            ty,
        ))
    }

    /// `x = v`, with `v` cast to `x`'s type.
    pub fn set(&self, value: impl Into<Value>) -> Result<Value, IrError> {
        let value = value.into();
        let value = match &self.ty {
            Some(ty) => value.cast(ty)?,
            None => value,
        };
        Ok(self.assign(value, false))
    }

    /// `x := v`. Records `v`'s type on `x` when `x` has none.
    pub fn auto_set(&mut self, value: impl Into<Value>) -> Value {
        let value = value.into();
        if self.ty.is_none() {
            self.ty.clone_from(&value.ty);
        }
        self.assign(value, true)
    }

    fn assign(&self, value: Value, define: bool) -> Value {
        Value::new(
            ValueKind::Assign {
                target: Box::new(self.clone()),
                value: Box::new(value),
                define,
            },
            None,
        )
    }
}

fn element_type(ty: &Type) -> Result<Type, IrError> {
    let underlying = ty.underlying();
    match underlying.node() {
        TypeNode::Slice(elem) => Ok((**elem).clone()),
        TypeNode::Array { elem, .. } => Ok((**elem).clone()),
        TypeNode::Map { value, .. } => Ok((**value).clone()),
        _ if underlying.kind() == Kind::String => Ok(Type::byte()),
        _ => Err(IrError::NotIndexable { ty: ty.identity() }),
    }
}
