use expect_test::expect;
use sapling_diff::find_changes;
use sapling_text::{PlainKind, PlainText, parse};
use sapling_yellow::{GreenNode, SyntaxTree};

const POEM: &str = "so much depends\nupon\n\na red wheel\nbarrow\n";

fn leaf_ptrs(tree: &SyntaxTree<PlainText>) -> Vec<GreenNode<PlainText>> {
    tree.root_green().leaves().cloned().collect()
}

#[test]
fn every_edit_round_trips() {
    let tree = parse(POEM).unwrap();
    for text in [
        "",
        POEM,
        "so much depends\n",
        "so  much depends\nupon\n",
        "upon so much depends\n",
        "a red wheel\nbarrow\n\nso much depends\nupon\n",
        "glazed with rain\nwater\n",
        "\r\n\r\n",
        "wheelbarrow",
    ] {
        let result = find_changes(Some(&tree), text);
        assert_eq!(result.new_tree.text(), text, "{text:?}");
        assert_eq!(result.has_changes, text != POEM, "{text:?}");
    }
}

#[test]
fn untouched_lines_share_their_leaves() {
    let tree = parse(POEM).unwrap();
    let edited = POEM.replace("red", "blue");

    let result = find_changes(Some(&tree), &edited);

    let old = leaf_ptrs(&tree);
    let new = leaf_ptrs(&result.new_tree);
    let shared = old.iter().filter(|leaf| new.iter().any(|it| it.ptr_eq(leaf))).count();
    // Everything but the `red ` word.
    assert_eq!(shared, old.len() - 1);
    assert_eq!(result.reused, shared);
    assert_eq!(result.changes.len(), 1);
    assert_eq!(&edited[result.changes[0]], "blue ");

    let root = result.new_tree.root();
    assert!(root.children().get(0).unwrap().green().ptr_eq(&tree.root_green().children()[0]));
}

#[test]
fn appended_line() {
    let tree = parse("one\ntwo\n").unwrap();

    let result = find_changes(Some(&tree), "one\ntwo\nthree\n");

    expect![[r#"
        DOCUMENT@0..14
          LINE@0..4
            WORD@0..3 "one"
            NEWLINE@3..4 "\n"
          LINE@4..8
            WORD@4..7 "two"
            NEWLINE@7..8 "\n"
          CHANGE@8..14 "three\n"
    "#]]
    .assert_debug_eq(&result.new_tree);
    assert_eq!(result.new_tree.root_green().kind(), PlainKind::DOCUMENT);
}
