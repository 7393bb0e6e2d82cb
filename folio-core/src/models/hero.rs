use serde::{Deserialize, Serialize};

/// Hero block at the top of a portfolio.
///
/// `None` is an explicit null and is kept distinct from `Some("")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub avatar: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
}

impl Default for HeroBlock {
    fn default() -> Self {
        Self {
            title: Some(String::new()),
            subtitle: Some(String::new()),
            description: Some(String::new()),
            image: Some(String::new()),
            avatar: Some(String::new()),
            cta_text: Some(String::new()),
            cta_link: Some(String::new()),
        }
    }
}

impl HeroBlock {
    /// Merges set fields of the patch, leaving the rest untouched.
    pub fn apply(&mut self, patch: HeroPatch) {
        fn merge(slot: &mut Option<String>, update: Option<Option<String>>) {
            if let Some(value) = update {
                *slot = value;
            }
        }

        merge(&mut self.title, patch.title);
        merge(&mut self.subtitle, patch.subtitle);
        merge(&mut self.description, patch.description);
        merge(&mut self.image, patch.image);
        merge(&mut self.avatar, patch.avatar);
        merge(&mut self.cta_text, patch.cta_text);
        merge(&mut self.cta_link, patch.cta_link);
    }
}

/// Partial hero update. The outer `Option` selects the field; `Some(None)`
/// sets it to null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroPatch {
    pub title: Option<Option<String>>,
    pub subtitle: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
    pub avatar: Option<Option<String>>,
    pub cta_text: Option<Option<String>>,
    pub cta_link: Option<Option<String>>,
}

impl HeroPatch {
    pub fn is_empty(&self) -> bool {
        *self == HeroPatch::default()
    }

    /// Sets a field by its wire name. Returns false for an unknown name.
    pub fn set(&mut self, field: &str, value: Option<String>) -> bool {
        let slot = match field {
            "title" => &mut self.title,
            "subtitle" => &mut self.subtitle,
            "description" => &mut self.description,
            "image" => &mut self.image,
            "avatar" => &mut self.avatar,
            "ctaText" | "cta_text" | "cta-text" => &mut self.cta_text,
            "ctaLink" | "cta_link" | "cta-link" => &mut self.cta_link,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_strings() {
        let hero = HeroBlock::default();
        assert_eq!(hero.title.as_deref(), Some(""));
        assert_eq!(hero.cta_link.as_deref(), Some(""));
    }

    #[test]
    fn test_apply_keeps_siblings() {
        let mut hero = HeroBlock {
            title: Some("Ada".into()),
            subtitle: Some("Engineer".into()),
            ..HeroBlock::default()
        };

        hero.apply(HeroPatch {
            subtitle: Some(Some("Mathematician".into())),
            ..HeroPatch::default()
        });

        assert_eq!(hero.title.as_deref(), Some("Ada"));
        assert_eq!(hero.subtitle.as_deref(), Some("Mathematician"));
    }

    #[test]
    fn test_apply_explicit_null() {
        let mut hero = HeroBlock::default();
        hero.apply(HeroPatch {
            avatar: Some(None),
            ..HeroPatch::default()
        });
        assert_eq!(hero.avatar, None);
        assert_eq!(hero.image.as_deref(), Some(""));
    }

    #[test]
    fn test_patch_set_by_name() {
        let mut patch = HeroPatch::default();
        assert!(patch.is_empty());
        assert!(patch.set("cta-text", Some("Hire me".into())));
        assert!(patch.set("image", None));
        assert!(!patch.set("banner", None));
        assert_eq!(patch.cta_text, Some(Some("Hire me".into())));
        assert_eq!(patch.image, Some(None));
    }

    #[test]
    fn test_null_survives_json() {
        let hero = HeroBlock {
            subtitle: None,
            ..HeroBlock::default()
        };
        let json = serde_json::to_string(&hero).unwrap();
        assert!(json.contains("\"subtitle\":null"));
        assert!(json.contains("\"ctaText\":\"\""));
    }
}
