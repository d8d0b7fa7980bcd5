//! Comment block and docstring conversions through the intention catalogue.

mod common;

use common::{is_available, launch};
use pyintentions::intentions::ids::{COMMENT_TO_DOCSTRING, DOCSTRING_TO_COMMENT};

const Q: &str = "\"\"\"";

// =============================================================================
// Comment to docstring
// =============================================================================

#[test]
fn test_single_line_comment() {
    assert_eq!(
        launch("# This is a <caret>comment", COMMENT_TO_DOCSTRING),
        format!("{Q}This is a comment{Q}")
    );
}

#[test]
fn test_multi_line_comment() {
    assert_eq!(
        launch("# Line <caret>one\n# Line two\n# Line three", COMMENT_TO_DOCSTRING),
        format!("{Q}\nLine one\nLine two\nLine three\n{Q}")
    );
}

#[test]
fn test_indented_comment() {
    assert_eq!(
        launch("def foo():\n    # A <caret>comment", COMMENT_TO_DOCSTRING),
        format!("def foo():\n    {Q}A comment{Q}")
    );
}

#[test]
fn test_indented_multi_line_comment() {
    assert_eq!(
        launch("def foo():\n    # Line <caret>one\n    # Line two", COMMENT_TO_DOCSTRING),
        format!("def foo():\n    {Q}\n    Line one\n    Line two\n    {Q}")
    );
}

#[test]
fn test_comment_without_space() {
    assert_eq!(
        launch("#no<caret>space", COMMENT_TO_DOCSTRING),
        format!("{Q}nospace{Q}")
    );
}

#[test]
fn test_empty_comment_line_stays_in_block() {
    assert_eq!(
        launch("# Line one\n#<caret>\n# Line three", COMMENT_TO_DOCSTRING),
        format!("{Q}\nLine one\n\nLine three\n{Q}")
    );
}

#[test]
fn test_blank_line_ends_the_block() {
    assert_eq!(
        launch("# first\n\n# sec<caret>ond\nx = 1\n", COMMENT_TO_DOCSTRING),
        format!("# first\n\n{Q}second{Q}\nx = 1\n")
    );
}

#[test]
fn test_comment_not_available_on_code() {
    assert!(!is_available("x = <caret>1", COMMENT_TO_DOCSTRING));
}

#[test]
fn test_comment_not_available_on_inline_comment() {
    assert!(!is_available("x = 1  # trailing <caret>note\n", COMMENT_TO_DOCSTRING));
}

// =============================================================================
// Docstring to comment
// =============================================================================

#[test]
fn test_single_line_docstring() {
    assert_eq!(
        launch(&format!("{Q}This is a <caret>docstring{Q}"), DOCSTRING_TO_COMMENT),
        "# This is a docstring"
    );
}

#[test]
fn test_multi_line_docstring() {
    assert_eq!(
        launch(
            &format!("{Q}\nLine <caret>one\nLine two\nLine three\n{Q}"),
            DOCSTRING_TO_COMMENT
        ),
        "#\n# Line one\n# Line two\n# Line three\n#"
    );
}

#[test]
fn test_indented_docstring() {
    assert_eq!(
        launch(
            &format!("def foo():\n    {Q}A <caret>docstring{Q}"),
            DOCSTRING_TO_COMMENT
        ),
        "def foo():\n    # A docstring"
    );
}

#[test]
fn test_docstring_with_blank_line() {
    assert_eq!(
        launch(&format!("{Q}Line <caret>one\n\nLine three{Q}"), DOCSTRING_TO_COMMENT),
        "# Line one\n#\n# Line three"
    );
}

#[test]
fn test_docstring_not_available_on_assigned_string() {
    assert!(!is_available("x = \"hel<caret>lo\"", DOCSTRING_TO_COMMENT));
}

#[test]
fn test_docstring_not_available_on_function_arg_string() {
    assert!(!is_available("print(\"hel<caret>lo\")", DOCSTRING_TO_COMMENT));
}

#[test]
fn test_round_trip_through_comments() {
    let source = format!("def foo():\n    {Q}\n    Summary <caret>line.\n\n    Detail.\n    {Q}\n    return 1\n");
    let comments = launch(&source, DOCSTRING_TO_COMMENT);
    assert_eq!(
        comments,
        "def foo():\n    #\n    # Summary line.\n    #\n    # Detail.\n    #\n    return 1\n"
    );
    let caret = comments.find("Summary").unwrap();
    let back = launch(
        &format!("{}<caret>{}", &comments[..caret], &comments[caret..]),
        COMMENT_TO_DOCSTRING,
    );
    assert_eq!(
        back,
        format!("def foo():\n    {Q}\n\n    Summary line.\n\n    Detail.\n\n    {Q}\n    return 1\n")
    );
}
