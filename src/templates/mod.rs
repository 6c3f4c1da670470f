use crate::error::{GeneratorError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Language of an image prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLanguage {
    /// Comma-separated tags followed by render/quality tags
    En,
    /// `label:value` fields
    Zh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Visual,
    Sound,
    ImageEn,
    ImageZh,
}

const IMAGE_PLACEHOLDERS: &[&str] = &[
    "style",
    "shot",
    "character",
    "location",
    "lighting",
    "detail",
    "material",
    "mood",
];

impl TemplateKind {
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Visual => "visual",
            TemplateKind::Sound => "sound",
            TemplateKind::ImageEn => "image_en",
            TemplateKind::ImageZh => "image_zh",
        }
    }

    /// Placeholders a template of this kind may reference.
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Visual => &["lighting", "character", "ability"],
            TemplateKind::Sound => &["sound"],
            TemplateKind::ImageEn | TemplateKind::ImageZh => IMAGE_PLACEHOLDERS,
        }
    }

    fn required(self) -> Option<&'static str> {
        match self {
            TemplateKind::ImageEn | TemplateKind::ImageZh => Some("character"),
            TemplateKind::Visual | TemplateKind::Sound => None,
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex should compile")
    })
}

/// A template string whose `{placeholder}` references have been checked.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    pub fn compile(kind: TemplateKind, source: &str) -> Result<Self> {
        let mut seen_required = kind.required().is_none();
        for caps in placeholder_regex().captures_iter(source) {
            let name = &caps[1];
            if !kind.placeholders().contains(&name) {
                return Err(GeneratorError::UnknownPlaceholder {
                    template: kind.name(),
                    placeholder: name.to_string(),
                });
            }
            if kind.required() == Some(name) {
                seen_required = true;
            }
        }
        if let (false, Some(placeholder)) = (seen_required, kind.required()) {
            return Err(GeneratorError::MissingPlaceholder {
                template: kind.name(),
                placeholder,
            });
        }
        Ok(Self {
            source: source.to_string(),
        })
    }

    /// Substitute `values` into the template. Placeholders without a value
    /// are left as written.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        placeholder_regex()
            .replace_all(&self.source, |caps: &Captures| {
                values
                    .iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Raw template strings as they appear in a content pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSet {
    pub visual: String,
    pub sound: String,
    pub image_en: String,
    pub image_zh: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            visual: "{lighting}中，{character}发动{ability}".into(),
            sound: "炁体流动声效+{sound}".into(),
            image_en: "{style}, {shot}, {character}在{location}, {lighting}照明, {detail}, \
                       {material}, 动态模糊特效, Octane渲染, 8K分辨率, {mood}"
                .into(),
            image_zh: "{style}风格, {shot}景别, 拍摄主体:{character}位于{location}, \
                       光线:{lighting}, 形态:{detail}, 材质:{material}, 互动效果:能力发动瞬间, \
                       专业术语:Octane渲染, 8K分辨率, 整体氛围:{mood}"
                .into(),
        }
    }
}

impl TemplateSet {
    pub fn compile(&self) -> Result<CompiledTemplates> {
        Ok(CompiledTemplates {
            visual: PromptTemplate::compile(TemplateKind::Visual, &self.visual)?,
            sound: PromptTemplate::compile(TemplateKind::Sound, &self.sound)?,
            image_en: PromptTemplate::compile(TemplateKind::ImageEn, &self.image_en)?,
            image_zh: PromptTemplate::compile(TemplateKind::ImageZh, &self.image_zh)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledTemplates {
    pub visual: PromptTemplate,
    pub sound: PromptTemplate,
    pub image_en: PromptTemplate,
    pub image_zh: PromptTemplate,
}

impl CompiledTemplates {
    pub fn image(&self, language: PromptLanguage) -> &PromptTemplate {
        match language {
            PromptLanguage::En => &self.image_en,
            PromptLanguage::Zh => &self.image_zh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_visual() {
        let template = PromptTemplate::compile(TemplateKind::Visual, &TemplateSet::default().visual)
            .unwrap();
        let text = template.render(&[
            ("lighting", "赛博霓虹"),
            ("character", "冯宝宝"),
            ("ability", "区块链金光咒"),
        ]);
        assert_eq!(text, "赛博霓虹中，冯宝宝发动区块链金光咒");
    }

    #[test]
    fn test_default_image_templates_match_layout() {
        let compiled = TemplateSet::default().compile().unwrap();
        let values = [
            ("style", "S"),
            ("shot", "T"),
            ("character", "C"),
            ("location", "L"),
            ("lighting", "G"),
            ("detail", "D"),
            ("material", "M"),
            ("mood", "O"),
        ];
        assert_eq!(
            compiled.image(PromptLanguage::En).render(&values),
            "S, T, C在L, G照明, D, M, 动态模糊特效, Octane渲染, 8K分辨率, O"
        );
        assert_eq!(
            compiled.image(PromptLanguage::Zh).render(&values),
            "S风格, T景别, 拍摄主体:C位于L, 光线:G, 形态:D, 材质:M, 互动效果:能力发动瞬间, \
             专业术语:Octane渲染, 8K分辨率, 整体氛围:O"
        );
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = PromptTemplate::compile(TemplateKind::Sound, "{sound} {volume}").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::UnknownPlaceholder { template: "sound", ref placeholder } if placeholder == "volume"
        ));
        assert!(err.to_string().contains("`{volume}`"));
    }

    #[test]
    fn test_image_template_requires_character() {
        let err = PromptTemplate::compile(TemplateKind::ImageZh, "{style}, {mood}").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::MissingPlaceholder {
                template: "image_zh",
                placeholder: "character"
            }
        ));
    }

    #[test]
    fn test_missing_value_left_as_written() {
        let template = PromptTemplate::compile(TemplateKind::Visual, "{character}: {ability}").unwrap();
        assert_eq!(template.render(&[("character", "张楚岚")]), "张楚岚: {ability}");
    }

    #[test]
    fn test_literal_braces_without_name_untouched() {
        let template = PromptTemplate::compile(TemplateKind::Sound, "{} {sound}").unwrap();
        assert_eq!(template.render(&[("sound", "古琴混音")]), "{} 古琴混音");
    }
}
