use tracing::debug;

use super::reorder::{move_next_to, renumber};
use crate::models::{fresh_section_id, Portfolio, PortfolioPatch, Section, SectionKind, SectionPatch};
use crate::theme::apply_theme_patch;

/// The mutation engine.
///
/// Owns the editable portfolio and applies every operation synchronously.
/// After each call the sections satisfy `sections[i].order == i`.
///
/// Operations that name an id which does not exist are no-ops rather than
/// errors, since UI callers may race with an already-applied removal. The
/// boolean results report whether anything changed.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Portfolio,
}

impl Editor {
    pub fn new(mut document: Portfolio) -> Self {
        document.sections.sort_by_key(|s| s.order);
        renumber(&mut document.sections);
        Self { document }
    }

    pub fn document(&self) -> &Portfolio {
        &self.document
    }

    pub fn into_document(self) -> Portfolio {
        self.document
    }

    /// Shallow-merges top-level fields; `hero` and `theme` merge one level deep.
    pub fn update_document(&mut self, patch: PortfolioPatch) -> bool {
        let before = self.document.clone();
        let doc = &mut self.document;

        if let Some(slug) = patch.slug {
            doc.slug = slug;
        }
        if let Some(visibility) = patch.visibility {
            doc.visibility = visibility;
        }
        if let Some(layout) = patch.layout {
            doc.layout = layout;
        }
        if let Some(hero) = patch.hero {
            doc.hero.apply(hero);
        }
        if let Some(theme) = patch.theme {
            apply_theme_patch(&mut doc.theme, theme);
        }
        if let Some(features) = patch.features {
            doc.features = features;
        }

        self.document != before
    }

    pub fn update_section(&mut self, id: &str, patch: SectionPatch) -> bool {
        match self.document.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => section.apply(patch),
            None => {
                debug!("update_section: no section with id {}", id);
                false
            }
        }
    }

    /// Adds a section of `kind` with default content. With a `position` the
    /// section is inserted there and later sections shift down; otherwise it
    /// is appended. Returns the new section's id.
    pub fn add_section(&mut self, kind: SectionKind, position: Option<usize>) -> String {
        let sections = &mut self.document.sections;
        let id = fresh_section_id(&kind, |candidate| sections.iter().any(|s| s.id == candidate));
        let index = position.unwrap_or(sections.len()).min(sections.len());

        sections.insert(index, Section::new(id.clone(), kind));
        renumber(sections);
        id
    }

    pub fn remove_section(&mut self, id: &str) -> bool {
        let sections = &mut self.document.sections;
        let Some(index) = sections.iter().position(|s| s.id == id) else {
            debug!("remove_section: no section with id {}", id);
            return false;
        };

        sections.remove(index);
        renumber(sections);
        true
    }

    /// Clones a section under a new id directly after the original.
    /// Returns the clone's id.
    pub fn duplicate_section(&mut self, id: &str) -> Option<String> {
        let sections = &mut self.document.sections;
        let Some(index) = sections.iter().position(|s| s.id == id) else {
            debug!("duplicate_section: no section with id {}", id);
            return None;
        };

        let original = &sections[index];
        let copy_id = fresh_section_id(&original.kind, |candidate| {
            sections.iter().any(|s| s.id == candidate)
        });
        let mut copy = original.clone();
        copy.id = copy_id.clone();

        sections.insert(index + 1, copy);
        renumber(sections);
        Some(copy_id)
    }

    /// Replaces the section sequence with `ids`. Sections whose id is not
    /// listed are dropped; listed ids that do not exist are ignored.
    pub fn reorder_sections<S: AsRef<str>>(&mut self, ids: &[S]) -> bool {
        let mut remaining = std::mem::take(&mut self.document.sections);
        let before: Vec<String> = remaining.iter().map(|s| s.id.clone()).collect();

        let mut reordered = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(index) = remaining.iter().position(|s| s.id == id.as_ref()) {
                reordered.push(remaining.remove(index));
            }
        }
        if !remaining.is_empty() {
            debug!("reorder_sections: dropping {} unlisted section(s)", remaining.len());
        }

        renumber(&mut reordered);
        let changed = reordered.iter().map(|s| &s.id).ne(before.iter());
        self.document.sections = reordered;
        changed
    }

    /// Drag-and-drop intent: move `active_id` next to `over_id`.
    pub fn move_section(&mut self, active_id: &str, over_id: &str) -> bool {
        move_next_to(&mut self.document.sections, active_id, over_id)
    }

    /// Records the id assigned by the store on first save.
    pub fn assign_id(&mut self, id: String) {
        self.document.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeroPatch, SectionContent, ThemePatch, Visibility};

    fn editor() -> Editor {
        let mut doc = Portfolio::new("ada");
        doc.sections = vec![
            Section::new("about", SectionKind::About).with_order(0),
            Section::new("skills", SectionKind::Skills).with_order(1),
            Section::new("achievements", SectionKind::Achievements).with_order(2),
        ];
        Editor::new(doc)
    }

    fn layout(editor: &Editor) -> Vec<(String, usize)> {
        editor
            .document()
            .sections
            .iter()
            .map(|s| (s.id.clone(), s.order))
            .collect()
    }

    fn assert_ordered(editor: &Editor) {
        assert!(editor.document().is_ordered(), "{:?}", layout(editor));
    }

    #[test]
    fn test_new_normalizes_order() {
        let mut doc = Portfolio::new("ada");
        doc.sections = vec![
            Section::new("b", SectionKind::Skills).with_order(7),
            Section::new("a", SectionKind::About).with_order(3),
        ];
        let editor = Editor::new(doc);
        assert_eq!(layout(&editor), vec![("a".into(), 0), ("b".into(), 1)]);
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let mut editor = editor();
        let copy_id = editor.duplicate_section("skills").unwrap();

        let sections = &editor.document().sections;
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].id, "about");
        assert_eq!(sections[1].id, "skills");
        assert_eq!(sections[2].id, copy_id);
        assert_eq!(sections[2].kind, SectionKind::Skills);
        assert_eq!(sections[3].id, "achievements");
        assert_ne!(copy_id, "skills");
        assert_ordered(&editor);
    }

    #[test]
    fn test_duplicate_twice_gives_unique_ids() {
        let mut editor = editor();
        let first = editor.duplicate_section("about").unwrap();
        let second = editor.duplicate_section("about").unwrap();
        assert_ne!(first, second);
        assert_eq!(editor.document().sections[1].id, second);
        assert_eq!(editor.document().sections[2].id, first);
        assert_ordered(&editor);
    }

    #[test]
    fn test_remove_renumbers() {
        let mut editor = editor();
        assert!(editor.remove_section("skills"));
        assert_eq!(
            layout(&editor),
            vec![("about".into(), 0), ("achievements".into(), 1)]
        );
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut editor = editor();
        let before = editor.document().clone();

        assert!(!editor.remove_section("nope"));
        assert!(editor.duplicate_section("nope").is_none());
        assert!(!editor.update_section("nope", SectionPatch::title("x")));
        assert!(!editor.move_section("nope", "about"));

        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_add_appends_by_default() {
        let mut editor = editor();
        let id = editor.add_section(SectionKind::Projects, None);

        let last = editor.document().sections.last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.order, 3);
        assert_eq!(last.content, SectionContent::List(Vec::new()));
        assert!(id.starts_with("projects-"));
    }

    #[test]
    fn test_add_at_position_shifts_later_sections() {
        let mut editor = editor();
        let id = editor.add_section(SectionKind::Custom, Some(1));

        let ids: Vec<_> = editor
            .document()
            .sections
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ids, vec!["about".to_string(), id, "skills".into(), "achievements".into()]);
        assert_ordered(&editor);
    }

    #[test]
    fn test_add_position_past_end_appends() {
        let mut editor = editor();
        let id = editor.add_section(SectionKind::Interests, Some(42));
        assert_eq!(editor.document().sections[3].id, id);
        assert_ordered(&editor);
    }

    #[test]
    fn test_reorder_projects_ids() {
        let mut editor = editor();
        assert!(editor.reorder_sections(&["achievements", "about", "skills"]));
        assert_eq!(
            layout(&editor),
            vec![
                ("achievements".into(), 0),
                ("about".into(), 1),
                ("skills".into(), 2)
            ]
        );
    }

    #[test]
    fn test_reorder_drops_unlisted_and_ignores_unknown() {
        let mut editor = editor();
        assert!(editor.reorder_sections(&["skills", "ghost", "about"]));
        assert_eq!(
            layout(&editor),
            vec![("skills".into(), 0), ("about".into(), 1)]
        );
    }

    #[test]
    fn test_reorder_same_sequence_is_unchanged() {
        let mut editor = editor();
        assert!(!editor.reorder_sections(&["about", "skills", "achievements"]));
    }

    #[test]
    fn test_move_section() {
        let mut editor = editor();
        assert!(editor.move_section("about", "achievements"));
        assert_eq!(
            layout(&editor),
            vec![
                ("skills".into(), 0),
                ("achievements".into(), 1),
                ("about".into(), 2)
            ]
        );
    }

    #[test]
    fn test_update_section_merges() {
        let mut editor = editor();
        assert!(editor.update_section(
            "about",
            SectionPatch::content(SectionContent::Text("Hi".into()))
        ));
        let about = editor.document().section("about").unwrap();
        assert_eq!(about.content, SectionContent::Text("Hi".into()));
        assert_eq!(about.title, "About Me");
    }

    #[test]
    fn test_update_document_merges_hero_and_theme() {
        let mut editor = editor();
        editor.update_document(PortfolioPatch {
            hero: Some(HeroPatch {
                title: Some(Some("Ada".into())),
                ..HeroPatch::default()
            }),
            ..PortfolioPatch::default()
        });
        editor.update_document(PortfolioPatch {
            hero: Some(HeroPatch {
                subtitle: Some(Some("Analyst".into())),
                ..HeroPatch::default()
            }),
            visibility: Some(Visibility::Private),
            theme: Some(ThemePatch {
                name: Some("dark".into()),
                ..ThemePatch::default()
            }),
            ..PortfolioPatch::default()
        });

        let doc = editor.document();
        assert_eq!(doc.hero.title.as_deref(), Some("Ada"));
        assert_eq!(doc.hero.subtitle.as_deref(), Some("Analyst"));
        assert_eq!(doc.visibility, Visibility::Private);
        assert_eq!(doc.theme.name, "dark");
        assert_eq!(doc.sections.len(), 3);
    }

    #[test]
    fn test_update_document_reports_no_change() {
        let mut editor = editor();
        assert!(!editor.update_document(PortfolioPatch::default()));
    }

    #[test]
    fn test_order_invariant_over_mixed_sequence() {
        let mut editor = editor();
        let a = editor.add_section(SectionKind::Projects, Some(0));
        assert_ordered(&editor);
        let b = editor.duplicate_section(&a).unwrap();
        assert_ordered(&editor);
        editor.remove_section("skills");
        assert_ordered(&editor);
        editor.move_section(&b, "achievements");
        assert_ordered(&editor);
        editor.add_section(SectionKind::Education, None);
        assert_ordered(&editor);
        let ids: Vec<String> = editor
            .document()
            .sections
            .iter()
            .rev()
            .map(|s| s.id.clone())
            .collect();
        editor.reorder_sections(&ids);
        assert_ordered(&editor);
        assert_eq!(editor.document().sections.len(), 5);
    }
}
