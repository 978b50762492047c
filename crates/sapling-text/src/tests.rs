use expect_test::expect;
use sapling_yellow::{GreenNode, TextSize};

use crate::PlainKind::*;
use crate::{PlainText, Tokenizer, parse, parse_green};

#[test]
fn lines_and_words() {
    let tree = parse("hello world\n  second line\r\n\n  ").unwrap();
    expect![[r#"
        DOCUMENT@0..30
          LINE@0..12
            WORD@0..6 "hello "
            WORD@6..11 "world"
            NEWLINE@11..12 "\n"
          LINE@12..27
            WORD@12..21 "  second "
            WORD@21..25 "line"
            NEWLINE@25..27 "\r\n"
          LINE@27..28
            NEWLINE@27..28 "\n"
    "#]]
    .assert_debug_eq(&tree);
    assert_eq!(tree.root_green().trailing().text(), "  ");
}

#[test]
fn any_text_round_trips() {
    for text in [
        "",
        "   ",
        "\r",
        "one",
        "one\n",
        "\n\n\n",
        "a\r b\r\n",
        "\0 nul",
        "héllo\twörld  \n  ",
        "trailing words   ",
    ] {
        let tree = parse(text).unwrap();
        assert_eq!(tree.text(), text, "{text:?}");
        assert_eq!(tree.root().text_len(), TextSize::of(text), "{text:?}");
    }
}

#[test]
fn words_keep_their_spacing_as_trivia() {
    let tree = parse("  lead spaced\tout").unwrap();
    let words: Vec<_> = tree
        .root()
        .leaves()
        .map(|leaf| {
            let green = leaf.green();
            (
                green.leading().text().to_owned(),
                green.payload().unwrap_or_default().to_owned(),
                green.trailing().text().to_owned(),
            )
        })
        .collect();

    assert_eq!(
        words,
        [
            ("  ".to_owned(), "lead".to_owned(), " ".to_owned()),
            (String::new(), "spaced".to_owned(), "\t".to_owned()),
            (String::new(), "out".to_owned(), String::new()),
        ]
    );
}

#[test]
fn tokenizer_ends_with_eof() {
    let mut tokenizer = Tokenizer::new("word\n ");
    let kinds: Vec<_> = std::iter::repeat_with(|| tokenizer.next_token().kind).take(4).collect();
    assert_eq!(kinds, [WORD, NEWLINE, EOF, EOF]);
}

#[test]
fn line_break_only_ends_a_line() {
    let error = GreenNode::<PlainText>::node(
        LINE,
        [GreenNode::token(NEWLINE, "\n"), GreenNode::token(WORD, "late")],
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid children for `LINE`: child 0 should be `WORD`, found `NEWLINE`"
    );

    let error = GreenNode::<PlainText>::node(DOCUMENT, [GreenNode::token(WORD, "loose")])
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid children for `DOCUMENT`: child 0 should be `LINE`, found `WORD`"
    );
}

#[test]
fn change_nodes_fit_anywhere() {
    let line = GreenNode::<PlainText>::node(
        LINE,
        [GreenNode::token(WORD, "a "), GreenNode::change("edit "), GreenNode::token(NEWLINE, "\n")],
    )
    .unwrap();
    let document = GreenNode::node(DOCUMENT, [line, GreenNode::change("tail")]).unwrap();
    assert_eq!(document.render(), "a edit \ntail");
}

#[test]
fn parsing_is_structurally_stable() {
    let text = "same text\ntwice\n";
    assert_eq!(parse_green(text).unwrap(), parse_green(text).unwrap());
    assert!(!parse_green(text).unwrap().ptr_eq(&parse_green(text).unwrap()));
}
