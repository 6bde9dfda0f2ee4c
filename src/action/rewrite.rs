use super::item::Item;

/// Replace `commands[start..=end]` with `nodes`.
pub fn replace_range(commands: &mut Vec<Item>, start: usize, end: usize, nodes: Vec<Item>) {
    let end = end.min(commands.len().saturating_sub(1));
    if start > end {
        commands.splice(start..start, nodes);
        return;
    }
    commands.splice(start..=end, nodes);
}

/// Splice a recognised declaration over the statements it was built from.
///
/// A `§§pop()` right after the range discarded the value of the removed
/// guard and goes with it. Statements from the guard's else branch follow
/// the declaration in their original order.
pub fn splice_declaration(
    commands: &mut Vec<Item>,
    start: usize,
    end: usize,
    declaration: Item,
    else_branch: Vec<Item>,
) {
    replace_range(commands, start, end, vec![declaration]);
    if matches!(commands.get(start + 1), Some(Item::Pop)) {
        commands.remove(start + 1);
    }
    if !else_branch.is_empty() {
        commands.splice(start + 1..start + 1, else_branch);
    }
}
