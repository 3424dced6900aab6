//! Grammar parameters threaded through productions.

use bitflags::bitflags;

bitflags! {
    /// The `[In]`, `[Yield]`, `[Await]` and `[Return]` grammar parameters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Context: u8 {
        /// The `in` operator is allowed.
        const IN = 1 << 0;
        /// Inside a generator: `yield` is an operator.
        const YIELD = 1 << 1;
        /// Inside an async function or module top level: `await` is an operator.
        const AWAIT = 1 << 2;
        /// `return` is allowed.
        const RETURN = 1 << 3;
    }
}

impl Context {
    /// Context for a function body with the given kind.
    pub fn function(is_async: bool, is_generator: bool) -> Self {
        let mut ctx = Context::IN | Context::RETURN;
        ctx.set(Context::AWAIT, is_async);
        ctx.set(Context::YIELD, is_generator);
        ctx
    }

    #[inline]
    pub fn with_in(self) -> Self {
        self | Context::IN
    }

    #[inline]
    pub fn without_in(self) -> Self {
        self - Context::IN
    }

    /// Whether `name` is reserved as an operator here and so cannot be an
    /// identifier.
    pub fn reserves(self, name: &str) -> bool {
        match name {
            "yield" => self.contains(Context::YIELD),
            "await" => self.contains(Context::AWAIT),
            _ => false,
        }
    }
}
