use crate::markdown::Heading;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
    pub children: Vec<TocEntry>,
}

/// Builds the nested table of contents for the headings of one render.
///
/// The first heading sets depth 0. Every later heading moves one level deeper
/// when its heading level is greater than the previous one and one level up
/// when it is smaller, never above the top. Jumps of more than one heading
/// level still move a single step.
pub fn build(headings: &[Heading]) -> Vec<TocEntry> {
    let mut roots = Vec::new();
    let mut depth = 0usize;
    let mut previous: Option<u8> = None;

    for heading in headings {
        if let Some(prev) = previous {
            if heading.level > prev {
                depth += 1;
            } else if heading.level < prev {
                depth = depth.saturating_sub(1);
            }
        }
        previous = Some(heading.level);

        insert(
            &mut roots,
            depth,
            TocEntry {
                id: heading.id.clone(),
                text: heading.text.clone(),
                level: heading.level,
                children: Vec::new(),
            },
        );
    }
    roots
}

fn insert(entries: &mut Vec<TocEntry>, depth: usize, entry: TocEntry) {
    if depth > 0 {
        if let Some(parent) = entries.last_mut() {
            insert(&mut parent.children, depth - 1, entry);
            return;
        }
    }
    entries.push(entry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{heading_id, render};
    use std::collections::HashSet;

    fn anchors(entries: &[TocEntry]) -> Vec<&str> {
        let mut out = Vec::new();
        collect_anchors(entries, &mut out);
        out
    }

    fn collect_anchors<'a>(entries: &'a [TocEntry], out: &mut Vec<&'a str>) {
        for entry in entries {
            out.push(entry.id.as_str());
            collect_anchors(&entry.children, out);
        }
    }

    fn headings(levels: &[u8]) -> Vec<Heading> {
        levels
            .iter()
            .enumerate()
            .map(|(idx, level)| Heading {
                level: *level,
                text: format!("h{idx}"),
                id: heading_id(idx),
            })
            .collect()
    }

    #[test]
    fn nests_minor_headings_under_major() {
        let toc = build(&headings(&[2, 3, 3, 2]));
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].children.len(), 2);
        assert!(toc[0].children.iter().all(|c| c.children.is_empty()));
        assert!(toc[1].children.is_empty());

        let ids = anchors(&toc);
        assert_eq!(ids, ["heading-0", "heading-1", "heading-2", "heading-3"]);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 4);
    }

    #[test]
    fn empty_headings_produce_no_entries() {
        let toc = build(&[]);
        assert!(toc.is_empty());
        assert!(anchors(&toc).is_empty());
    }

    #[test]
    fn first_heading_sets_the_baseline() {
        let toc = build(&headings(&[3, 3, 2, 3]));
        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0].level, 3);
        assert_eq!(toc[2].level, 2);
        assert_eq!(toc[2].children.len(), 1);
    }

    #[test]
    fn closing_below_the_top_stays_at_the_top() {
        let toc = build(&headings(&[3, 2, 2]));
        assert_eq!(toc.len(), 3);
        assert!(toc.iter().all(|entry| entry.children.is_empty()));
    }

    #[test]
    fn multi_level_jumps_move_one_step() {
        let toc = build(&headings(&[2, 4, 4]));
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].children.len(), 2);
        assert!(toc[0].children[0].children.is_empty());

        // 4 -> 2 closes back to depth 0
        let toc = build(&headings(&[2, 4, 2]));
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].children.len(), 1);
    }

    #[test]
    fn builds_from_rendered_markdown() {
        let doc = render("## 概述\n\n### 栈\n\n### 堆\n\n## 总结\n");
        let toc = build(&doc.headings);
        assert_eq!(toc[0].text, "概述");
        assert_eq!(toc[0].children[1].text, "堆");
        assert_eq!(toc[1].text, "总结");
    }
}
