//! Translation between the persisted and editable representations.

use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::warn;

use super::extract::{extract_content, plural_keys};
use super::persisted::{PersistedHero, PersistedPortfolio, PersistedSection, PersistedTheme};
use crate::models::{
    fresh_section_id, FeatureBlocks, HeroBlock, Layout, Portfolio, Section, SectionContent,
    SectionKind, Visibility,
};
use crate::theme::{resolve_theme, ThemeInput};

/// Builds the editable document from a stored one.
///
/// Missing blocks become empty containers and feature blocks that are
/// present are kept as stored. Sections are sorted by their
/// stored `order` and renumbered to `0..N-1`, and sections without a usable
/// id get a fresh `type-timestamp` id.
pub fn to_editable(persisted: &PersistedPortfolio) -> Portfolio {
    let visibility = parse_or_default::<Visibility>(persisted.visibility.as_deref(), "visibility");
    let layout = parse_or_default::<Layout>(persisted.layout.as_deref(), "layout");

    let hero = persisted
        .hero
        .as_ref()
        .map(hero_to_editable)
        .unwrap_or_default();

    let theme_input = persisted
        .theme
        .clone()
        .map(PersistedTheme::into_input)
        .unwrap_or_default();

    Portfolio {
        id: persisted.id.clone(),
        slug: persisted.slug.clone(),
        visibility,
        layout,
        hero,
        sections: sections_to_editable(&persisted.sections),
        theme: resolve_theme(&theme_input),
        features: feature_blocks(persisted),
    }
}

/// Builds the outbound payload for the store.
///
/// Disabled sections are left out. The remaining sections are emitted in
/// `order` sequence with their `order` values unchanged.
pub fn to_persisted(portfolio: &Portfolio) -> PersistedPortfolio {
    let mut enabled: Vec<&Section> = portfolio.sections.iter().filter(|s| s.enabled).collect();
    enabled.sort_by_key(|s| s.order);

    PersistedPortfolio {
        id: portfolio.id.clone(),
        slug: portfolio.slug.clone(),
        visibility: Some(portfolio.visibility.to_string()),
        layout: Some(portfolio.layout.to_string()),
        hero: Some(hero_to_persisted(&portfolio.hero)),
        sections: enabled.into_iter().map(section_to_persisted).collect(),
        theme: Some(PersistedTheme::Detailed(ThemeInput::from(&portfolio.theme))),
        gallery: Some(portfolio.features.gallery.clone()),
        social_links: Some(portfolio.features.social_links.clone()),
        sharing: Some(portfolio.features.sharing.clone()),
        analytics: Some(portfolio.features.analytics.clone()),
        custom_code: Some(portfolio.features.custom_code.clone()),
        extra: portfolio.features.extra.clone(),
    }
}

fn sections_to_editable(persisted: &[PersistedSection]) -> Vec<Section> {
    let mut indexed: Vec<(i64, usize, &PersistedSection)> = persisted
        .iter()
        .enumerate()
        .map(|(index, section)| (section.order.unwrap_or(index as i64), index, section))
        .collect();
    indexed.sort_by_key(|(order, index, _)| (*order, *index));

    let mut taken: HashSet<String> = HashSet::new();
    let mut sections = Vec::with_capacity(indexed.len());

    for (position, (_, _, stored)) in indexed.into_iter().enumerate() {
        let kind = SectionKind::from(stored.kind.clone());
        if !kind.is_known() {
            warn!(
                "Unrecognized section type '{}', passing content through",
                stored.kind
            );
        }

        let id = match stored.id.as_deref() {
            Some(id) if !id.is_empty() && !taken.contains(id) => id.to_string(),
            _ => fresh_section_id(&kind, |candidate| taken.contains(candidate)),
        };
        taken.insert(id.clone());

        let content = extract_content(&kind, stored);

        // Legacy content keys are rewritten as `items`/`content` on save.
        let mut extra = stored.extra.clone();
        for key in plural_keys(&stored.kind) {
            extra.remove(&key);
        }

        sections.push(Section {
            id,
            enabled: stored.enabled.unwrap_or(true),
            order: position,
            title: stored.title.clone().unwrap_or_default(),
            content,
            kind,
            extra,
        });
    }

    sections
}

fn section_to_persisted(section: &Section) -> PersistedSection {
    let (items, content) = match &section.content {
        SectionContent::List(items) => (
            Some(Value::Array(items.iter().map(|item| item.to_value()).collect())),
            None,
        ),
        SectionContent::Text(text) => (None, Some(Value::String(text.clone()))),
        SectionContent::Opaque(value) => (None, Some(value.clone())),
    };

    PersistedSection {
        id: Some(section.id.clone()),
        kind: section.kind.to_string(),
        title: Some(section.title.clone()),
        order: Some(section.order as i64),
        enabled: Some(section.enabled),
        items,
        content,
        extra: section.extra.clone(),
    }
}

fn hero_to_editable(hero: &PersistedHero) -> HeroBlock {
    // Absent fields default to "", explicit nulls stay null.
    fn field(value: &Option<Option<String>>) -> Option<String> {
        match value {
            None => Some(String::new()),
            Some(inner) => inner.clone(),
        }
    }

    HeroBlock {
        title: field(&hero.title),
        subtitle: field(&hero.subtitle),
        description: field(&hero.description),
        image: field(&hero.image),
        avatar: field(&hero.avatar),
        cta_text: field(&hero.cta_text),
        cta_link: field(&hero.cta_link),
    }
}

fn hero_to_persisted(hero: &HeroBlock) -> PersistedHero {
    PersistedHero {
        title: Some(hero.title.clone()),
        subtitle: Some(hero.subtitle.clone()),
        description: Some(hero.description.clone()),
        image: Some(hero.image.clone()),
        avatar: Some(hero.avatar.clone()),
        cta_text: Some(hero.cta_text.clone()),
        cta_link: Some(hero.cta_link.clone()),
    }
}

fn parse_or_default<T>(value: Option<&str>, field: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    match value {
        None => T::default(),
        Some(raw) => T::from_str(raw).unwrap_or_else(|e| {
            warn!("Invalid {} in stored portfolio: {}", field, e);
            T::default()
        }),
    }
}

fn feature_blocks(persisted: &PersistedPortfolio) -> FeatureBlocks {
    let defaults = FeatureBlocks::default();
    let kept = |stored: &Option<Value>, fallback: Value| stored.clone().unwrap_or(fallback);

    FeatureBlocks {
        gallery: kept(&persisted.gallery, defaults.gallery),
        social_links: kept(&persisted.social_links, defaults.social_links),
        sharing: kept(&persisted.sharing, defaults.sharing),
        analytics: kept(&persisted.analytics, defaults.analytics),
        custom_code: kept(&persisted.custom_code, defaults.custom_code),
        extra: persisted.extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentItem, HeroPatch};
    use serde_json::json;

    fn sample() -> Portfolio {
        let mut portfolio = Portfolio::default_template("ada");
        portfolio.id = Some("p-1".into());
        portfolio.visibility = Visibility::Unlisted;
        portfolio.layout = Layout::MultiPage;
        portfolio.hero.apply(HeroPatch {
            title: Some(Some("Ada Lovelace".into())),
            subtitle: Some(None),
            ..HeroPatch::default()
        });
        portfolio.sections[0].content = SectionContent::Text("First programmer.".into());
        portfolio.sections[1].content = SectionContent::List(vec![
            ContentItem::from("Analysis"),
            ContentItem::from_value(&json!({"name": "Engines", "level": 5})),
        ]);
        portfolio.theme = crate::theme::find_preset("dark").unwrap().descriptor();
        portfolio.features.social_links = json!({"github": "ada"});
        portfolio.features.gallery = json!([{"src": "engine.png"}]);
        portfolio
    }

    #[test]
    fn test_round_trip_preserves_representable_fields() {
        let portfolio = sample();
        let back = to_editable(&to_persisted(&portfolio));
        assert_eq!(back, portfolio);
    }

    #[test]
    fn test_round_trip_custom_theme() {
        let mut portfolio = sample();
        portfolio.theme.colors.accent = "#123456".into();
        portfolio.theme.name = "custom".into();
        let back = to_editable(&to_persisted(&portfolio));
        assert_eq!(back.theme, portfolio.theme);
    }

    #[test]
    fn test_round_trip_through_json() {
        let portfolio = sample();
        let json = serde_json::to_string(&to_persisted(&portfolio)).unwrap();
        let parsed: PersistedPortfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(to_editable(&parsed), portfolio);
    }

    #[test]
    fn test_disabled_sections_dropped() {
        let mut portfolio = sample();
        portfolio.sections[1].enabled = false;

        let persisted = to_persisted(&portfolio);
        assert_eq!(persisted.sections.len(), 3);
        assert!(persisted.sections.iter().all(|s| s.enabled == Some(true)));
        assert!(persisted
            .sections
            .iter()
            .all(|s| s.id.as_deref() != Some(portfolio.sections[1].id.as_str())));
    }

    #[test]
    fn test_outbound_sorted_by_order() {
        let mut portfolio = sample();
        portfolio.sections.reverse();

        let orders: Vec<_> = to_persisted(&portfolio)
            .sections
            .iter()
            .map(|s| s.order)
            .collect();
        assert_eq!(orders, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_content_fields_on_wire() {
        let persisted = to_persisted(&sample());
        let about = &persisted.sections[0];
        assert_eq!(about.content, Some(json!("First programmer.")));
        assert!(about.items.is_none());

        let skills = &persisted.sections[1];
        assert_eq!(
            skills.items,
            Some(json!(["Analysis", {"name": "Engines", "level": 5}]))
        );
        assert!(skills.content.is_none());
    }

    #[test]
    fn test_to_editable_defaults_missing_blocks() {
        let persisted: PersistedPortfolio = serde_json::from_value(json!({"slug": "bare"})).unwrap();
        let portfolio = to_editable(&persisted);

        assert_eq!(portfolio.visibility, Visibility::Public);
        assert_eq!(portfolio.layout, Layout::SinglePage);
        assert_eq!(portfolio.hero, HeroBlock::default());
        assert_eq!(portfolio.theme.name, "minimal");
        assert_eq!(portfolio.features.gallery, json!([]));
        assert_eq!(portfolio.features.custom_code, json!({}));
        assert!(portfolio.features.extra.is_empty());
        assert!(portfolio.sections.is_empty());
    }

    #[test]
    fn test_to_editable_preserves_hero_nulls() {
        let persisted: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "hero": {"title": "Ada", "image": null}
        }))
        .unwrap();
        let hero = to_editable(&persisted).hero;
        assert_eq!(hero.title.as_deref(), Some("Ada"));
        assert_eq!(hero.image, None);
        assert_eq!(hero.subtitle.as_deref(), Some(""));
    }

    #[test]
    fn test_to_editable_sorts_and_renumbers() {
        let persisted: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "sections": [
                {"id": "c", "type": "projects", "order": 7},
                {"id": "a", "type": "about", "order": 2},
                {"id": "b", "type": "skills", "order": 5}
            ]
        }))
        .unwrap();

        let portfolio = to_editable(&persisted);
        let ids: Vec<_> = portfolio.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(portfolio.is_ordered());
    }

    #[test]
    fn test_to_editable_generates_missing_and_duplicate_ids() {
        let persisted: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "sections": [
                {"type": "skills"},
                {"id": "dup", "type": "about"},
                {"id": "dup", "type": "custom"}
            ]
        }))
        .unwrap();

        let portfolio = to_editable(&persisted);
        assert!(portfolio.sections[0].id.starts_with("skills-"));
        assert_eq!(portfolio.sections[1].id, "dup");
        assert!(portfolio.sections[2].id.starts_with("custom-"));
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let persisted: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "sections": [
                {"id": "t", "type": "timeline", "enabled": false, "content": {"events": []}}
            ]
        }))
        .unwrap();

        let portfolio = to_editable(&persisted);
        let section = &portfolio.sections[0];
        assert_eq!(section.kind, SectionKind::Unknown("timeline".into()));
        assert!(!section.enabled);
        assert_eq!(section.content, SectionContent::Opaque(json!({"events": []})));

        // Still subject to the enabled rule on the way out.
        assert!(to_persisted(&portfolio).sections.is_empty());
    }

    #[test]
    fn test_feature_blocks_pass_through_unchanged() {
        let stored: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "socialLinks": [{"platform": "github", "url": "https://github.com/ada"}],
            "gallery": {"layout": "grid", "images": []},
            "seo": {"title": "Ada"}
        }))
        .unwrap();

        let out = to_persisted(&to_editable(&stored));
        assert_eq!(
            out.social_links,
            Some(json!([{"platform": "github", "url": "https://github.com/ada"}]))
        );
        assert_eq!(out.gallery, Some(json!({"layout": "grid", "images": []})));
        assert_eq!(out.sharing, Some(json!({})));

        let wire = serde_json::to_value(&out).unwrap();
        assert_eq!(wire["seo"], json!({"title": "Ada"}));
    }

    #[test]
    fn test_section_extra_fields_written_back() {
        let stored: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "sections": [
                {"id": "s", "type": "skills", "skills": ["Rust"], "layout": "columns"}
            ]
        }))
        .unwrap();

        let portfolio = to_editable(&stored);
        assert_eq!(
            portfolio.sections[0].content,
            SectionContent::List(vec![ContentItem::from("Rust")])
        );

        let section = &to_persisted(&portfolio).sections[0];
        assert_eq!(section.extra.get("layout"), Some(&json!("columns")));
        // The legacy key is superseded by `items`.
        assert!(section.extra.get("skills").is_none());
        assert_eq!(section.items, Some(json!(["Rust"])));
    }

    #[test]
    fn test_invalid_enums_fall_back() {
        let persisted: PersistedPortfolio = serde_json::from_value(json!({
            "slug": "ada",
            "visibility": "secret",
            "layout": "grid",
            "theme": "neon"
        }))
        .unwrap();

        let portfolio = to_editable(&persisted);
        assert_eq!(portfolio.visibility, Visibility::Public);
        assert_eq!(portfolio.layout, Layout::SinglePage);
        assert_eq!(portfolio.theme.name, "minimal");
    }

    #[test]
    fn test_named_theme_resolves() {
        let persisted: PersistedPortfolio =
            serde_json::from_value(json!({"slug": "ada", "theme": "Sunset Glow"})).unwrap();
        assert_eq!(to_editable(&persisted).theme.name, "sunset");
    }
}
