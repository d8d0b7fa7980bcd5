//! `Optional`/`Union`/pipe rewrites through the intention catalogue.
#![allow(clippy::unwrap_used)]

mod common;

use common::{is_available, launch};
use pyintentions::config::Settings;
use pyintentions::intentions::ids::{
    MAKE_MAYBE, MAKE_NON_MAYBE, OPTIONAL_TO_PIPE, PIPE_TO_OPTIONAL, PIPE_TO_UNION, UNION_TO_PIPE,
};

// =============================================================================
// X | None to Optional[X]
// =============================================================================

#[test]
fn test_basic_pipe_to_optional() {
    assert_eq!(
        launch("x: int <caret>| None = None", PIPE_TO_OPTIONAL),
        "from typing import Optional\n\nx: Optional[int] = None"
    );
}

#[test]
fn test_import_above_dunder_annotation() {
    assert_eq!(
        launch("__version__: str <caret>| None = None\n\nimport os\n", PIPE_TO_OPTIONAL),
        "from typing import Optional\n\n__version__: Optional[str] = None\n\nimport os\n"
    );
}

#[test]
fn test_multiple_types_to_optional() {
    assert_eq!(
        launch("x: int | str <caret>| None = None", PIPE_TO_OPTIONAL),
        "from typing import Union\nfrom typing import Optional\n\nx: Optional[Union[int, str]] = None"
    );
}

#[test]
fn test_import_after_docstring() {
    assert_eq!(
        launch("\"\"\"Module docstring.\"\"\"\nx: int <caret>| None = None", PIPE_TO_OPTIONAL),
        "\"\"\"Module docstring.\"\"\"\nfrom typing import Optional\n\nx: Optional[int] = None"
    );
}

#[test]
fn test_import_after_docstring_and_dunders() {
    assert_eq!(
        launch(
            "\"\"\"Module docstring.\"\"\"\n__all__ = []\nx: int <caret>| None = None",
            PIPE_TO_OPTIONAL
        ),
        "\"\"\"Module docstring.\"\"\"\n__all__ = []\n\nfrom typing import Optional\n\nx: Optional[int] = None"
    );
}

#[test]
fn test_existing_import_is_reused() {
    assert_eq!(
        launch(
            "from typing import Optional\n\nx: Optional[str]\ny: int <caret>| None = None\n",
            PIPE_TO_OPTIONAL
        ),
        "from typing import Optional\n\nx: Optional[str]\ny: Optional[int] = None\n"
    );
}

#[test]
fn test_pipe_to_optional_not_available_without_none() {
    assert!(!is_available("x: int <caret>| str = None", PIPE_TO_OPTIONAL));
}

#[test]
fn test_pipe_outside_type_position_is_bitwise_or() {
    assert!(!is_available("flags = READ <caret>| None\n", PIPE_TO_OPTIONAL));
    assert!(!is_available("flags = READ <caret>| WRITE\n", PIPE_TO_UNION));
}

#[test]
fn test_pipe_in_type_alias() {
    assert_eq!(
        launch("type MaybeInt = int <caret>| None\n", PIPE_TO_OPTIONAL),
        "from typing import Optional\n\ntype MaybeInt = Optional[int]\n"
    );
}

#[test]
fn test_shadowed_optional_blocks_rewrite() {
    assert!(!is_available(
        "def Optional(x): ...\n\nx: int <caret>| None = None\n",
        PIPE_TO_OPTIONAL
    ));
}

// =============================================================================
// Optional[X] to X | None
// =============================================================================

#[test]
fn test_basic_optional_to_pipe_drops_import() {
    assert_eq!(
        launch("from typing import Optional\nx: Opt<caret>ional[int] = None", OPTIONAL_TO_PIPE),
        "x: int | None = None"
    );
}

#[test]
fn test_optional_union_flattening() {
    assert_eq!(
        launch(
            "from typing import Optional, Union\nx: Opt<caret>ional[Union[int, str]] = None",
            OPTIONAL_TO_PIPE
        ),
        "x: int | str | None = None"
    );
}

#[test]
fn test_optional_without_import() {
    assert_eq!(
        launch("x: Opt<caret>ional[int] = None", OPTIONAL_TO_PIPE),
        "x: int | None = None"
    );
}

#[test]
fn test_optional_import_kept_while_used() {
    assert_eq!(
        launch(
            "from typing import Optional\n\nx: Opt<caret>ional[int] = None\ny: Optional[str] = None\n",
            OPTIONAL_TO_PIPE
        ),
        "from typing import Optional\n\nx: int | None = None\ny: Optional[str] = None\n"
    );
}

#[test]
fn test_qualified_optional() {
    assert_eq!(
        launch("import typing\n\nx: typing.Opt<caret>ional[int] = None\n", OPTIONAL_TO_PIPE),
        "import typing\n\nx: int | None = None\n"
    );
}

#[test]
fn test_optional_from_other_module_is_ignored() {
    assert!(!is_available(
        "from mylib import Optional\n\nx: Opt<caret>ional[int] = None\n",
        OPTIONAL_TO_PIPE
    ));
}

#[test]
fn test_optional_not_available_on_plain_type() {
    assert!(!is_available("x: in<caret>t = 0", OPTIONAL_TO_PIPE));
}

#[test]
fn test_unbound_optional_respects_setting() {
    let settings = Settings {
        assume_unbound_typing: false,
        ..Settings::default()
    };
    let (source, offset) = common::split_caret("x: Opt<caret>ional[int] = None");
    let file = pyintentions::syntax::PyFile::parse(source);
    let context = pyintentions::intentions::Context::new(&file, offset, &settings);
    assert!(pyintentions::intentions::available_at(&context)
        .iter()
        .all(|offer| offer.id != OPTIONAL_TO_PIPE));
}

#[test]
fn test_optional_to_pipe_inside_string_annotation() {
    assert_eq!(
        launch(
            "from typing import Optional\n\ndef f(x: \"Opt<caret>ional[Foo]\"): ...\n",
            OPTIONAL_TO_PIPE
        ),
        "def f(x: \"Foo | None\"): ...\n"
    );
}

// =============================================================================
// Union[X, Y] and X | Y
// =============================================================================

#[test]
fn test_basic_union_to_pipe() {
    assert_eq!(
        launch("from typing import Union\nx: Uni<caret>on[int, str] = None", UNION_TO_PIPE),
        "x: int | str = None"
    );
}

#[test]
fn test_triple_union_to_pipe() {
    assert_eq!(
        launch(
            "from typing import Union\nx: Uni<caret>on[int, str, float] = None",
            UNION_TO_PIPE
        ),
        "x: int | str | float = None"
    );
}

#[test]
fn test_union_to_pipe_not_available_on_non_union() {
    assert!(!is_available("x: li<caret>st = []", UNION_TO_PIPE));
}

#[test]
fn test_basic_pipe_to_union() {
    assert_eq!(
        launch("x: int <caret>| str = None", PIPE_TO_UNION),
        "from typing import Union\n\nx: Union[int, str] = None"
    );
}

#[test]
fn test_triple_pipe_to_union() {
    assert_eq!(
        launch("x: int | str <caret>| float = None", PIPE_TO_UNION),
        "from typing import Union\n\nx: Union[int, str, float] = None"
    );
}

#[test]
fn test_pipe_with_none_to_union() {
    assert_eq!(
        launch("x: int <caret>| None = None", PIPE_TO_UNION),
        "from typing import Union\n\nx: Union[int, None] = None"
    );
}

#[test]
fn test_pipe_to_union_in_return_annotation() {
    assert_eq!(
        launch("import os\n\ndef f() -> int <caret>| str: ...\n", PIPE_TO_UNION),
        "from typing import Union\nimport os\n\ndef f() -> Union[int, str]: ...\n"
    );
}

// =============================================================================
// Make maybe / non-maybe
// =============================================================================

#[test]
fn test_make_maybe_simple_type() {
    assert_eq!(launch("x: in<caret>t = 0", MAKE_MAYBE), "x: int | None = 0");
}

#[test]
fn test_make_maybe_function_parameter() {
    assert_eq!(
        launch("def foo(x: in<caret>t):\n    pass", MAKE_MAYBE),
        "def foo(x: int | None):\n    pass"
    );
}

#[test]
fn test_make_maybe_return_type() {
    assert_eq!(
        launch("def foo() -> in<caret>t:\n    pass", MAKE_MAYBE),
        "def foo() -> int | None:\n    pass"
    );
}

#[test]
fn test_make_maybe_pipe_union_type() {
    assert_eq!(launch("x: int <caret>| str = 0", MAKE_MAYBE), "x: int | str | None = 0");
}

#[test]
fn test_make_maybe_generic_argument_wraps_whole_annotation() {
    assert_eq!(
        launch("x: list[in<caret>t] = []", MAKE_MAYBE),
        "x: list[int] | None = []"
    );
}

#[test]
fn test_make_maybe_not_available_on_pipe_none() {
    assert!(!is_available("x: int <caret>| None = None", MAKE_MAYBE));
}

#[test]
fn test_make_maybe_not_available_on_optional() {
    assert!(!is_available(
        "from typing import Optional\nx: Opt<caret>ional[int] = None",
        MAKE_MAYBE
    ));
}

#[test]
fn test_make_maybe_not_available_outside_annotation() {
    assert!(!is_available("x = in<caret>t(5)", MAKE_MAYBE));
}

#[test]
fn test_make_non_maybe_optional_to_base() {
    assert_eq!(
        launch("from typing import Optional\nx: Opt<caret>ional[int] = None", MAKE_NON_MAYBE),
        "x: int = None"
    );
}

#[test]
fn test_make_non_maybe_pipe_none_to_base() {
    assert_eq!(launch("x: int <caret>| None = None", MAKE_NON_MAYBE), "x: int = None");
}

#[test]
fn test_make_non_maybe_multiple_pipe_none_removal() {
    assert_eq!(
        launch("x: int | str <caret>| None = None", MAKE_NON_MAYBE),
        "x: int | str = None"
    );
}

#[test]
fn test_make_non_maybe_optional_union_keeps_union_import() {
    assert_eq!(
        launch(
            "from typing import Optional, Union\nx: Opt<caret>ional[Union[int, str]] = None",
            MAKE_NON_MAYBE
        ),
        "from typing import Union\nx: Union[int, str] = None"
    );
}

#[test]
fn test_make_non_maybe_not_available_on_non_maybe_type() {
    assert!(!is_available("x: in<caret>t = 0", MAKE_NON_MAYBE));
    assert!(!is_available("x: int <caret>| str = 0", MAKE_NON_MAYBE));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_optional_round_trip_recovers_members() {
    let piped = launch(
        "from typing import Optional\n\nx: Opt<caret>ional[int] = None\n",
        OPTIONAL_TO_PIPE,
    );
    assert_eq!(piped, "x: int | None = None\n");
    let caret = piped.find("| None").unwrap();
    let back = launch(
        &format!("{}<caret>{}", &piped[..caret], &piped[caret..]),
        PIPE_TO_OPTIONAL,
    );
    assert_eq!(back, "from typing import Optional\n\nx: Optional[int] = None\n");
}

#[test]
fn test_no_duplicate_imports() {
    let once = launch("x: int <caret>| None = None\n", PIPE_TO_OPTIONAL);
    let source = format!("{once}y: str <caret>| None = None\n");
    let twice = launch(&source, PIPE_TO_OPTIONAL);
    assert_eq!(twice.matches("from typing import Optional").count(), 1);
    assert!(twice.ends_with("x: Optional[int] = None\ny: Optional[str] = None\n"));
}

#[test]
fn test_incomplete_pipe_does_not_panic() {
    let settings = Settings::default();
    let (source, offset) = common::split_caret("x: int <caret>| = None\ny = 2\n");
    let file = pyintentions::syntax::PyFile::parse(source);
    let context = pyintentions::intentions::Context::new(&file, offset, &settings);
    let _ = pyintentions::intentions::available_at(&context);
}
