// Encounter section tree traversal
//
// Sections nest arbitrarily deep. Rendering (indentation, headings,
// filtering to abilities) is the consumer's business; this module only
// provides the walk.

use journal_api::models::Section;

/// Depth-first pre-order walk yielding `(depth, section)`.
///
/// Top-level sections have depth 0. Siblings come out in document order.
pub fn walk_sections(sections: &[Section]) -> SectionWalk<'_> {
    SectionWalk {
        stack: sections.iter().rev().map(|s| (0, s)).collect(),
    }
}

/// Only the sections that describe a spell, in walk order.
pub fn abilities(sections: &[Section]) -> impl Iterator<Item = &Section> {
    walk_sections(sections)
        .map(|(_, section)| section)
        .filter(|section| section.is_ability())
}

/// Iterator returned by [`walk_sections`].
#[derive(Debug, Clone)]
pub struct SectionWalk<'a> {
    stack: Vec<(usize, &'a Section)>,
}

impl<'a> Iterator for SectionWalk<'a> {
    type Item = (usize, &'a Section);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, section) = self.stack.pop()?;
        self.stack
            .extend(section.sections.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_api::models::Reference;

    fn node(id: u64, spell: bool, children: Vec<Section>) -> Section {
        Section {
            id,
            title: format!("Section {id}").into(),
            body_text: None,
            sections: children,
            creature_display: None,
            spell: spell.then(|| Reference {
                id: id * 100,
                name: None,
                key: None,
            }),
        }
    }

    fn tree() -> Vec<Section> {
        vec![
            node(
                1,
                false,
                vec![
                    node(2, true, vec![node(3, true, Vec::new())]),
                    node(4, false, Vec::new()),
                ],
            ),
            node(5, true, Vec::new()),
        ]
    }

    #[test]
    fn pre_order_with_depths() {
        let tree = tree();
        let walked: Vec<(usize, u64)> = walk_sections(&tree).map(|(d, s)| (d, s.id)).collect();
        assert_eq!(walked, vec![(0, 1), (1, 2), (2, 3), (1, 4), (0, 5)]);
    }

    #[test]
    fn abilities_keep_walk_order() {
        let tree = tree();
        let ids: Vec<u64> = abilities(&tree).map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        assert_eq!(walk_sections(&[]).count(), 0);
    }
}
