//! Reorder coordination for drag-and-drop intents.

use crate::models::Section;

/// Re-establishes `order == index` for every section.
pub fn renumber(sections: &mut [Section]) {
    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index;
    }
}

/// Moves the section at `source` so it lands next to the section currently
/// at `target`.
///
/// Dragging forward (`target > source`) inserts after the target, dragging
/// backward inserts before it, so the moved section always ends up on the
/// side it was dragged from. Returns false when nothing moves.
pub fn move_adjacent(sections: &mut Vec<Section>, source: usize, target: usize) -> bool {
    if source >= sections.len() || target >= sections.len() || source == target {
        return false;
    }

    let anchor_id = sections[target].id.clone();
    let moved = sections.remove(source);

    let Some(anchor) = sections.iter().position(|s| s.id == anchor_id) else {
        // Unreachable with unique ids; put the section back where it was.
        sections.insert(source, moved);
        return false;
    };

    let insert_at = if target > source { anchor + 1 } else { anchor };
    sections.insert(insert_at, moved);
    renumber(sections);
    true
}

/// Id-based form of [`move_adjacent`]: move `active_id` next to `over_id`.
pub fn move_next_to(sections: &mut Vec<Section>, active_id: &str, over_id: &str) -> bool {
    let source = sections.iter().position(|s| s.id == active_id);
    let target = sections.iter().position(|s| s.id == over_id);
    match (source, target) {
        (Some(source), Some(target)) => move_adjacent(sections, source, target),
        _ => false,
    }
}
