//! Type-expression analysis and the `Optional`/`Union`/pipe rewrites.
//!
//! Recognition is purely syntactic. `Optional[...]` and `Union[...]` count
//! only when the subscripted name resolves to the typing symbol, and pipe
//! chains count only in type positions, where `|` cannot be bitwise-or.

mod expr;
mod imports;
mod resolve;
mod rewrite;
mod site;

pub use expr::{flatten_pipe, is_none, union_members, TypeExpression};
pub use imports::{ensure_imported, remove_unused, used_names};
pub use resolve::{Binding, Resolver, TypingSymbol};
pub use rewrite::{
    make_maybe, make_non_maybe, optional_to_pipe, pipe_to_optional, pipe_to_union,
    union_to_pipe, TypeRewrite,
};
pub use site::{with_type_site, TypeSite};
