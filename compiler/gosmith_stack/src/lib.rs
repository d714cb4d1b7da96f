//! Stack growth for deep recursion.
//!
//! Type graphs decoded from source can nest arbitrarily (a map of slices of
//! pointers to anonymous structs, and so on), and the parser, the resolver and
//! the renderer all walk them recursively. Each recursive step runs through
//! [`ensure_sufficient_stack`], which grows the stack on native targets when the
//! remaining space drops under a red zone.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn resolve(&mut self, expr: &TypeExpr) -> Option<Type> {
///     ensure_sufficient_stack(|| match expr {
///         TypeExpr::Pointer(inner) => self.resolve(inner).map(Type::pointer_to),
///         // ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Chain {
        Leaf,
        Ptr(Box<Chain>),
    }

    fn depth(chain: &Chain) -> usize {
        ensure_sufficient_stack(|| match chain {
            Chain::Leaf => 0,
            Chain::Ptr(inner) => depth(inner) + 1,
        })
    }

    #[test]
    fn shallow_chain_depth() {
        let chain = Chain::Ptr(Box::new(Chain::Ptr(Box::new(Chain::Leaf))));
        assert_eq!(depth(&chain), 2);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut chain = Chain::Leaf;
        for _ in 0..100_000 {
            chain = Chain::Ptr(Box::new(chain));
        }
        assert_eq!(depth(&chain), 100_000);

        // Dropping a 100k-deep box chain recurses too; unwind it iteratively.
        let mut cur = chain;
        while let Chain::Ptr(inner) = cur {
            cur = *inner;
        }
    }

    #[test]
    fn passes_results_through() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
