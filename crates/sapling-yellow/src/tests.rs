//! A small language of people's names, shared by the unit tests.

use expect_test::expect;

use crate::{
    ChildrenError, GreenNode, GreenTrivia, Language, Layout, RedNode, SyntaxTree, TextSize,
    check_slots,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Person {}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum PersonKind {
    FIRST_NAME,
    LAST_NAME,
    NICKNAME,
    CHANGE,

    NAME,
    PEOPLE,
    CHANGE_LIST,
}

impl Language for Person {
    type Kind = PersonKind;

    const CHANGE: PersonKind = PersonKind::CHANGE;
    const CHANGE_LIST: PersonKind = PersonKind::CHANGE_LIST;

    fn check_children(kind: PersonKind, children: &[GreenNode<Self>]) -> Result<(), ChildrenError> {
        match kind {
            PersonKind::NAME => check_slots(children, &[PersonKind::FIRST_NAME, PersonKind::LAST_NAME]),
            _ => Ok(()),
        }
    }

    fn layout(kind: PersonKind) -> Layout {
        match kind {
            PersonKind::NAME => Layout::Braced,
            _ => Layout::Verbatim,
        }
    }

    fn trivia_is_significant(kind: PersonKind) -> bool {
        kind != PersonKind::NICKNAME
    }
}

pub(crate) fn leaf(kind: PersonKind, text: &str) -> GreenNode<Person> {
    GreenNode::token(kind, text)
}

/// `{Kallyn Gowdy}`
pub(crate) fn kallyn_gowdy() -> GreenNode<Person> {
    GreenNode::node(
        PersonKind::NAME,
        [leaf(PersonKind::FIRST_NAME, "Kallyn"), leaf(PersonKind::LAST_NAME, "Gowdy")],
    )
    .unwrap()
}

/// `{Kallyn Gowdy}Kal`
pub(crate) fn people() -> GreenNode<Person> {
    GreenNode::node(PersonKind::PEOPLE, [kallyn_gowdy(), leaf(PersonKind::NICKNAME, "Kal")])
        .unwrap()
}

#[test]
fn standalone_and_embedded_lengths() {
    let kallyn = RedNode::new_root(leaf(PersonKind::FIRST_NAME, "Kallyn"));
    let gowdy = RedNode::new_root(leaf(PersonKind::LAST_NAME, "Gowdy"));
    assert_eq!(kallyn.text_len(), TextSize::new(6));
    assert_eq!(kallyn.position(), TextSize::new(0));
    assert_eq!(gowdy.text_len(), TextSize::new(5));

    let name = GreenNode::node(
        PersonKind::NAME,
        [kallyn.green().clone(), gowdy.green().clone()],
    )
    .unwrap();
    let name = SyntaxTree::new(name).root();

    assert_eq!(name.text_len(), TextSize::new(11));
    assert_eq!(name.children().get(1).unwrap().position(), TextSize::new(6));
    assert_eq!(name.text(), "{Kallyn Gowdy}");
}

#[test]
fn position_is_parent_position_plus_preceding_siblings() {
    let padded = GreenNode::node_with_trivia(
        PersonKind::PEOPLE,
        GreenTrivia::new("  "),
        [people(), leaf(PersonKind::NICKNAME, "Mac")],
        GreenTrivia::new("\n"),
    )
    .unwrap();
    let tree = SyntaxTree::new(
        GreenNode::node_with_trivia(
            PersonKind::PEOPLE,
            GreenTrivia::new("\t"),
            [people(), leaf(PersonKind::NICKNAME, "Gow"), padded],
            GreenTrivia::empty(),
        )
        .unwrap(),
    );

    for node in tree.root().descendants() {
        let expected = match node.parent() {
            None => TextSize::new(0),
            Some(parent) => {
                let index = node.index().unwrap();
                parent.position()
                    + parent.green().children()[..index]
                        .iter()
                        .map(GreenNode::text_len)
                        .sum::<TextSize>()
            }
        };
        assert_eq!(node.position(), expected, "{node:?}");
    }
}

#[test]
fn offset_skips_composite_trivia() {
    let green = GreenNode::node_with_trivia(
        PersonKind::PEOPLE,
        GreenTrivia::new("  "),
        [leaf(PersonKind::NICKNAME, "Kal"), leaf(PersonKind::NICKNAME, "Gow")],
        GreenTrivia::new("\n"),
    )
    .unwrap();
    let root = RedNode::new_root(green);
    let text = root.text();
    assert_eq!(text, "  KalGow\n");

    let gow = root.children().get(1).unwrap();
    assert_eq!(root.children().get(0).unwrap().position(), TextSize::new(0));
    assert_eq!(gow.position(), TextSize::new(3));
    assert_eq!(gow.offset(), TextSize::new(5));
    assert_eq!(&text[gow.text_range()], "Gow");
    assert_eq!(root.leaf_at_offset(TextSize::new(5)).unwrap().text(), "Gow");
}

#[test]
fn debug_dump() {
    let tree = SyntaxTree::new(people());
    expect![[r#"
        PEOPLE@0..14
          NAME@0..11
            FIRST_NAME@0..6 "Kallyn"
            LAST_NAME@6..11 "Gowdy"
          NICKNAME@11..14 "Kal"
    "#]]
    .assert_debug_eq(&tree);
}

#[test]
fn editing_leaves_the_original_untouched() {
    let tree = SyntaxTree::new(people());
    let root = tree.root();
    let nickname = root.children().get(1).unwrap();
    let gow = RedNode::new_root(leaf(PersonKind::NICKNAME, "Gow"));

    let edited = tree.set_root(&root.replace_node(&nickname, &gow).unwrap());

    assert_eq!(edited.text(), "{Kallyn Gowdy}Gow");
    assert_eq!(tree.text(), "{Kallyn Gowdy}Kal");
    assert!(edited.root_green().children()[0].ptr_eq(&tree.root_green().children()[0]));
    assert_ne!(edited, tree);
    assert_eq!(edited.set_root(&root), tree);
}
