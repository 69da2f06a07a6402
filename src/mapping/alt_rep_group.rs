//! altRepGroup clustering
//!
//! MODS links alternate representations of one logical value (usually
//! transliterations) by giving the sibling elements the same
//! `altRepGroup` id. Builders split their input into those clusters
//! and the remaining standalone nodes before mapping.

use indexmap::IndexMap;

use crate::xml::Element;

/// Split nodes into alt-rep clusters and standalone nodes.
///
/// Clusters keep first-seen order; standalone nodes keep document
/// order. A group id shared by only one node does not cluster, and a
/// blank id counts as absent.
pub(crate) fn split<'a>(nodes: &[&'a Element]) -> (Vec<Vec<&'a Element>>, Vec<&'a Element>) {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for &node in nodes {
        if let Some(id) = group_id(node) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    let mut groups: IndexMap<&str, Vec<&'a Element>> = IndexMap::new();
    let mut others: Vec<&'a Element> = Vec::new();
    for &node in nodes {
        match group_id(node) {
            Some(id) if counts[id] > 1 => groups.entry(id).or_default().push(node),
            _ => others.push(node),
        }
    }
    (groups.into_values().collect(), others)
}

fn group_id(node: &Element) -> Option<&str> {
    node.attribute("altRepGroup")
        .map(str::trim)
        .filter(|id| !id.is_empty())
}
