//! Contributor mapping
//!
//! Builds the contributor list from `<name>` elements: duplicates are
//! collapsed on a canonical form (keeping the union of their roles),
//! alt-rep clusters map to parallel names, and name-level type and
//! status hoist up to the contributor before primary flags are
//! reconciled. Names tied to a title group sort first so they win
//! deduplication and lead the list.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::models::Contributor;
use crate::notifier::Notifier;
use crate::xml::{Element, Node};

use super::{alt_rep_group, names, primary};

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Vec<Contributor> {
    let name_nodes = resource.children_named("name");
    if name_nodes.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Element> = name_nodes;
    ordered.sort_by_key(|el| usize::from(!el.has_attribute("nameTitleGroup")));

    struct Retained<'a> {
        node: &'a Element,
        roles: Vec<Element>,
        role_keys: Vec<String>,
    }

    let mut retained: Vec<Retained> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut dropped = false;

    for &node in &ordered {
        let key = dedup_key(node);
        match index_of.get(&key) {
            None => {
                let roles: Vec<Element> = node
                    .children_named("role")
                    .into_iter()
                    .cloned()
                    .collect();
                let role_keys = roles.iter().map(role_key).collect();
                index_of.insert(key, retained.len());
                retained.push(Retained {
                    node,
                    roles,
                    role_keys,
                });
            }
            Some(&i) => {
                dropped = true;
                for role in node.children_named("role") {
                    let key = role_key(role);
                    if !retained[i].role_keys.contains(&key) {
                        retained[i].roles.push(role.clone());
                        retained[i].role_keys.push(key);
                    }
                }
            }
        }
    }
    if dropped {
        notifier.warn("Duplicate name entry");
    }

    // working copies carrying the union of roles
    let working: Vec<Element> = retained
        .iter()
        .map(|entry| {
            let mut el = entry.node.clone();
            el.children
                .retain(|child| !matches!(child, Node::Element(e) if e.name == "role"));
            for role in &entry.roles {
                el.children.push(Node::Element(role.clone()));
            }
            el
        })
        .collect();

    let refs: Vec<&Element> = working.iter().collect();
    let (groups, others) = alt_rep_group::split(&refs);

    let mut contributors: Vec<Contributor> = Vec::new();
    for &node in &others {
        if let Some(contributor) = names::build(&[node], notifier) {
            if !contributor.is_empty() {
                contributors.push(contributor);
            }
        }
    }
    for group in groups {
        if let Some(contributor) = names::build(&group, notifier) {
            if !contributor.is_empty() {
                contributors.push(contributor);
            }
        }
    }

    for contributor in &mut contributors {
        hoist(contributor);
    }
    primary::adjust(&mut contributors, "contributor", notifier);
    for contributor in &mut contributors {
        if let Some(members) = contributor
            .name
            .first_mut()
            .and_then(|name| name.parallel_members_mut())
        {
            primary::adjust(members, "name", notifier);
        }
    }
    contributors
}

/// Move role-derived type and status from the first name value up to
/// the contributor.
fn hoist(contributor: &mut Contributor) {
    let Some(first) = contributor.name.first_mut() else {
        return;
    };
    if first
        .type_
        .as_deref()
        .is_some_and(names::is_contributor_type)
    {
        contributor.type_ = first.type_.take();
        if first.status.is_some() {
            contributor.status = first.status.take();
        }
    } else if first.type_.is_none() && first.status.is_some() {
        contributor.status = first.status.take();
    }
}

/// Canonical form for duplicate detection: local names with sorted
/// attributes, text NFC-normalized and whitespace-collapsed. Usage,
/// nameTitleGroup and role children are ignored at the top level.
fn dedup_key(name: &Element) -> String {
    let mut out = String::new();
    write_canonical(name, &["usage", "nameTitleGroup"], &["role"], &mut out);
    out
}

fn role_key(role: &Element) -> String {
    let mut out = String::new();
    write_canonical(role, &[], &[], &mut out);
    out
}

fn write_canonical(el: &Element, skip_attrs: &[&str], skip_children: &[&str], out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    let mut attrs: Vec<(&str, &str)> = el
        .attributes
        .iter()
        .filter(|a| !skip_attrs.contains(&a.name.as_str()))
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    attrs.sort();
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
    out.push('>');
    for node in &el.children {
        match node {
            Node::Text(text) => {
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !collapsed.is_empty() {
                    out.extend(collapsed.nfc());
                }
            }
            Node::Element(child) if skip_children.contains(&child.name.as_str()) => {}
            Node::Element(child) => write_canonical(child, &[], &[], out),
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}
