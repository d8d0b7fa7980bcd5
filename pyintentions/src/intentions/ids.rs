//! Stable intention ids, as accepted on the command line.

/// Exports: add the name under the cursor to `__all__`
pub const ADD_TO_ALL: &str = "add-to-all";
/// Exports: remove the name under the cursor from `__all__`
pub const REMOVE_FROM_ALL: &str = "remove-from-all";
/// Exports: move a dunder assignment above the imports
pub const MOVE_DUNDER: &str = "move-dunder";

/// Typing: `Optional[X]` to `X | None`
pub const OPTIONAL_TO_PIPE: &str = "optional-to-pipe";
/// Typing: `X | None` to `Optional[X]`
pub const PIPE_TO_OPTIONAL: &str = "pipe-to-optional";
/// Typing: `Union[X, Y]` to `X | Y`
pub const UNION_TO_PIPE: &str = "union-to-pipe";
/// Typing: `X | Y` to `Union[X, Y]`
pub const PIPE_TO_UNION: &str = "pipe-to-union";
/// Typing: `T` to `T | None`
pub const MAKE_MAYBE: &str = "make-maybe";
/// Typing: drop `None` from an optional type
pub const MAKE_NON_MAYBE: &str = "make-non-maybe";

/// Docs: `#` comment block to docstring
pub const COMMENT_TO_DOCSTRING: &str = "comment-to-docstring";
/// Docs: docstring to `#` comment block
pub const DOCSTRING_TO_COMMENT: &str = "docstring-to-comment";
