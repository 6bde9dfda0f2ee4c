//! Dotted-path helpers over member-access chains.
//!
//! `_global.a.b.C` is the chain `GetMember(GetMember(GetMember(GetVariable("_global"),
//! "a"), "b"), "C")`, and its path is `["_global", "a", "b", "C"]`.

use super::item::Item;

/// Path of a chain of member reads ending in a plain variable read:
/// `a.b.c.d` => `[a, b, c, d]`.
///
/// Returns `None` when a member name is not a string literal or the chain
/// bottoms out in anything other than a variable read.
pub fn path_of(item: &Item) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = item;
    while let Item::GetMember { object, member } = current {
        segments.push(member.as_str_literal()?.to_string());
        current = object;
    }
    match current {
        Item::GetVariable { name } => segments.push(name.as_str_literal()?.to_string()),
        _ => return None,
    }
    segments.reverse();
    Some(segments)
}

/// Path written by a variable or member write, ending in the written segment.
pub fn write_path_of(item: &Item) -> Option<Vec<String>> {
    match item {
        Item::SetVariable { name, .. } => Some(vec![name.as_str_literal()?.to_string()]),
        Item::SetMember { object, member, .. } => {
            let last = member.as_str_literal()?;
            let mut path = path_of(object)?;
            path.push(last.to_string());
            Some(path)
        }
        _ => None,
    }
}

/// Remove a leading `root` segment. Top-level classes are reached through the
/// root namespace while packaged ones are not.
pub fn strip_root(mut path: Vec<String>, root: &str) -> Vec<String> {
    if path.first().map(String::as_str) == Some(root) {
        path.remove(0);
    }
    path
}

/// Read expression over the same target as a variable or member write.
pub fn as_read(item: &Item) -> Option<Item> {
    match item {
        Item::SetMember { object, member, .. } => Some(Item::GetMember {
            object: object.clone(),
            member: member.clone(),
        }),
        Item::SetVariable { name, .. } => Some(Item::GetVariable { name: name.clone() }),
        _ => None,
    }
}

/// Build a member-read chain from a path: `[a, b, C]` => `a.b.C`.
pub fn read_of_path(path: &[String]) -> Option<Item> {
    let (first, rest) = path.split_first()?;
    Some(
        rest.iter()
            .fold(Item::var(first.clone()), |object, member| Item::member(object, member.clone())),
    )
}

/// Rewrite `root.a.b` into `a.b`. Anything that is not a member chain over
/// the root variable is returned unchanged.
pub fn without_root(item: &Item, root: &str) -> Item {
    match item {
        Item::GetMember { object, member } => match object.as_ref() {
            Item::GetVariable { name } if name.as_str_literal() == Some(root) => {
                Item::GetVariable { name: member.clone() }
            }
            Item::GetMember { .. } => Item::GetMember {
                object: Box::new(without_root(object, root)),
                member: member.clone(),
            },
            _ => item.clone(),
        },
        _ => item.clone(),
    }
}

/// Checks whether `item` names a direct submember of `parent` and returns the
/// new trailing segment. `a.b.c.d` is a submember of `a.b.c`; `x.y.z` is not
/// a submember of `x`.
pub fn direct_submember(item: &Item, parent: &[String]) -> Option<String> {
    let mut path = path_of(item)?;
    if path.len() != parent.len() + 1 || !path.starts_with(parent) {
        return None;
    }
    path.pop()
}
