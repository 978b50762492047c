use crate::{Language, RedNode};

/// Preorder walk over a red subtree, rooted at `start`.
pub struct Preorder<L: Language> {
    start: RedNode<L>,
    next: Option<WalkEvent<L>>,
    skip_subtree: bool,
}

impl<L: Language> Preorder<L> {
    pub(crate) fn new(start: RedNode<L>) -> Self {
        let next = Some(WalkEvent::Enter(start.clone()));
        Self { start, next, skip_subtree: false }
    }

    /// Skips the children of the node that was just entered.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }

    fn leave_or_climb(&self, node: &RedNode<L>) -> Option<WalkEvent<L>> {
        if node.ptr_eq(&self.start) {
            return None;
        }

        match node.next_sibling() {
            Some(sibling) => Some(WalkEvent::Enter(sibling)),
            None => node.parent().map(WalkEvent::Leave),
        }
    }
}

impl<L: Language> Iterator for Preorder<L> {
    type Item = WalkEvent<L>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_subtree {
            self.next = self.next.take().map(|next| match next {
                WalkEvent::Enter(first_child) => match first_child.parent() {
                    Some(parent) => WalkEvent::Leave(parent),
                    None => WalkEvent::Leave(first_child),
                },
                WalkEvent::Leave(parent) => WalkEvent::Leave(parent),
            });
            self.skip_subtree = false;
        }

        let next = self.next.take();

        self.next = next.as_ref().and_then(|event| match event {
            WalkEvent::Enter(node) => match node.first_child() {
                Some(child) => Some(WalkEvent::Enter(child)),
                None => Some(WalkEvent::Leave(node.clone())),
            },
            WalkEvent::Leave(node) => self.leave_or_climb(node),
        });

        next
    }
}

#[derive(Debug)]
pub enum WalkEvent<L: Language> {
    Enter(RedNode<L>),
    Leave(RedNode<L>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::people;

    fn trace(preorder: Preorder<crate::tests::Person>) -> Vec<String> {
        preorder
            .map(|event| match event {
                WalkEvent::Enter(node) => format!("> {:?}", node.kind()),
                WalkEvent::Leave(node) => format!("< {:?}", node.kind()),
            })
            .collect()
    }

    #[test]
    fn walks_every_node_once() {
        let root = RedNode::new_root(people());
        assert_eq!(
            trace(root.preorder()),
            [
                "> PEOPLE",
                "> NAME",
                "> FIRST_NAME",
                "< FIRST_NAME",
                "> LAST_NAME",
                "< LAST_NAME",
                "< NAME",
                "> NICKNAME",
                "< NICKNAME",
                "< PEOPLE",
            ]
        );
    }

    #[test]
    fn stays_inside_the_start_node() {
        let root = RedNode::new_root(people());
        let name = root.first_child().unwrap();
        assert_eq!(trace(name.preorder()).len(), 6);
    }

    #[test]
    fn skips_subtrees() {
        let root = RedNode::new_root(people());
        let mut preorder = root.preorder();
        let mut seen = Vec::new();

        while let Some(event) = preorder.next() {
            if let WalkEvent::Enter(node) = event {
                seen.push(format!("{:?}", node.kind()));
                if node.kind() == crate::tests::PersonKind::NAME {
                    preorder.skip_subtree();
                }
            }
        }

        assert_eq!(seen, ["PEOPLE", "NAME", "NICKNAME"]);
    }
}
