use crate::error::{GeneratorError, Result};
use crate::generator::MOTION_SEPARATOR;
use crate::templates::TemplateSet;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// An ordered, non-empty list of interchangeable phrases.
///
/// Emptiness is rejected when the list is built or deserialized, so
/// sampling never has to handle the empty case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_from(entries.into_iter().map(Into::into).collect::<Vec<_>>())
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.0.iter().any(|entry| entry == phrase)
    }

    /// Draw one entry uniformly at random.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &str {
        &self.0[rng.random_range(0..self.0.len())]
    }

    fn builtin(entries: &[&str]) -> Self {
        Self(entries.iter().map(|entry| entry.to_string()).collect())
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = GeneratorError;

    fn try_from(entries: Vec<String>) -> Result<Self> {
        if entries.is_empty() {
            return Err(GeneratorError::EmptyVocabulary);
        }
        Ok(Self(entries))
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.0
    }
}

/// Phrases used for storyboard rows. `lightings` is shared with the image prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryboardVocabulary {
    pub shot_types: Vocabulary,
    pub angles: Vocabulary,
    pub movements: Vocabulary,
    pub lightings: Vocabulary,
    pub abilities: Vocabulary,
    pub dialogues: Vocabulary,
    pub sound_variants: Vocabulary,
}

impl Default for StoryboardVocabulary {
    fn default() -> Self {
        Self {
            shot_types: Vocabulary::builtin(&["全景", "中景", "特写", "大特写"]),
            angles: Vocabulary::builtin(&["俯拍", "仰拍", "水平跟拍", "荷兰角"]),
            movements: Vocabulary::builtin(&[
                "斯坦尼康环绕",
                "无人机俯冲",
                "轨道横移",
                "手持抖动",
                "希区柯克变焦",
            ]),
            lightings: Vocabulary::builtin(&["赛博霓虹", "炁体流光", "全息粒子", "故障艺术"]),
            abilities: Vocabulary::builtin(&["数据化拘灵遣将", "区块链金光咒"]),
            dialogues: Vocabulary::builtin(&[
                "咯老子今天要打十个！",
                "你的异能...是复制粘贴噻？",
                "莫挨老子，WiFi信号都被你切断了！",
            ]),
            sound_variants: Vocabulary::builtin(&["二进制音效", "古琴混音"]),
        }
    }
}

/// Per-language slots of an image prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVocabulary {
    pub shots: Vocabulary,
    pub locations: Vocabulary,
    pub details: Vocabulary,
    pub moods: Vocabulary,
}

impl PromptVocabulary {
    fn builtin_en() -> Self {
        Self {
            shots: Vocabulary::builtin(&["电影感全景", "压迫性特写"]),
            locations: Vocabulary::builtin(&["量子擂台", "数据废墟"]),
            details: Vocabulary::builtin(&["破损的机械臂", "飘散的数据粒子"]),
            moods: Vocabulary::builtin(&["悲壮史诗感", "黑色幽默氛围"]),
        }
    }

    fn builtin_zh() -> Self {
        Self {
            shots: Vocabulary::builtin(&["电影级全景", "压迫感特写"]),
            locations: Vocabulary::builtin(&["量子擂台", "数据坟场"]),
            details: Vocabulary::builtin(&["断裂的纳米刀", "飘散的代码碎片"]),
            moods: Vocabulary::builtin(&["悲壮史诗", "赛博诙谐"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageVocabulary {
    pub styles: Vocabulary,
    pub materials: Vocabulary,
    pub en: PromptVocabulary,
    pub zh: PromptVocabulary,
}

impl Default for ImageVocabulary {
    fn default() -> Self {
        Self {
            styles: Vocabulary::builtin(&[
                "虚幻引擎5渲染",
                "赛博朋克水墨",
                "吉卜力机械风",
                "黑魂式暗黑美学",
            ]),
            materials: Vocabulary::builtin(&[
                "半透明量子材料",
                "生锈的纳米装甲",
                "流动的数据光纹",
                "破碎的全息投影",
            ]),
            en: PromptVocabulary::builtin_en(),
            zh: PromptVocabulary::builtin_zh(),
        }
    }
}

/// The three parts of a motion formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionVocabulary {
    pub camera_moves: Vocabulary,
    pub actions: Vocabulary,
    pub results: Vocabulary,
}

impl Default for MotionVocabulary {
    fn default() -> Self {
        Self {
            camera_moves: Vocabulary::builtin(&["环绕运镜", "急速推进", "慢速拉远", "手持抖动跟随"]),
            actions: Vocabulary::builtin(&[
                "机甲关节展开武器系统",
                "全息符咒矩阵旋转重组",
                "数据粒子凝聚成人形",
            ]),
            results: Vocabulary::builtin(&[
                "镜头突然定格在武器充能特写",
                "画面分裂成多个数字化分身",
                "背景坍缩成二进制瀑布流",
            ]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyTables {
    pub storyboard: StoryboardVocabulary,
    pub image: ImageVocabulary,
    pub motion: MotionVocabulary,
}

impl VocabularyTables {
    /// Every table with its dotted name, in a stable order.
    pub fn named(&self) -> Vec<(&'static str, &Vocabulary)> {
        let sb = &self.storyboard;
        let img = &self.image;
        let mo = &self.motion;
        vec![
            ("storyboard.shot_types", &sb.shot_types),
            ("storyboard.angles", &sb.angles),
            ("storyboard.movements", &sb.movements),
            ("storyboard.lightings", &sb.lightings),
            ("storyboard.abilities", &sb.abilities),
            ("storyboard.dialogues", &sb.dialogues),
            ("storyboard.sound_variants", &sb.sound_variants),
            ("image.styles", &img.styles),
            ("image.materials", &img.materials),
            ("image.en.shots", &img.en.shots),
            ("image.en.locations", &img.en.locations),
            ("image.en.details", &img.en.details),
            ("image.en.moods", &img.en.moods),
            ("image.zh.shots", &img.zh.shots),
            ("image.zh.locations", &img.zh.locations),
            ("image.zh.details", &img.zh.details),
            ("image.zh.moods", &img.zh.moods),
            ("motion.camera_moves", &mo.camera_moves),
            ("motion.actions", &mo.actions),
            ("motion.results", &mo.results),
        ]
    }

    fn validate(&self) -> Result<()> {
        let motion = [
            ("motion.camera_moves", &self.motion.camera_moves),
            ("motion.actions", &self.motion.actions),
            ("motion.results", &self.motion.results),
        ];
        for (name, vocabulary) in motion {
            if let Some(entry) = vocabulary
                .entries()
                .iter()
                .find(|entry| entry.contains(MOTION_SEPARATOR.trim()))
            {
                return Err(GeneratorError::SeparatorInEntry {
                    vocabulary: name,
                    entry: entry.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A versioned bundle of vocabulary tables and prompt templates.
///
/// Tables or templates missing from a pack file fall back to the built-in
/// ones, so a pack only has to spell out what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    pub version: String,
    pub vocabulary: VocabularyTables,
    pub templates: TemplateSet,
}

impl Default for ContentPack {
    fn default() -> Self {
        Self {
            version: Self::BUILTIN_VERSION.to_string(),
            vocabulary: VocabularyTables::default(),
            templates: TemplateSet::default(),
        }
    }
}

impl ContentPack {
    pub const BUILTIN_VERSION: &'static str = "2.0";

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let pack: Self = toml::from_str(content)?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GeneratorError::PackRead {
            path: path.to_path_buf(),
            source,
        })?;
        let pack = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded content pack v{} from {}",
            pack.version,
            path.display()
        );
        Ok(pack)
    }

    /// Serialize as an editable TOML pack file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check cross-table constraints and compile the templates.
    pub fn validate(&self) -> Result<()> {
        self.vocabulary.validate()?;
        self.templates.compile()?;
        Ok(())
    }

    /// SHA-256 of the pack's JSON encoding, as lowercase hex.
    ///
    /// Field and table order is fixed by the struct layout, so equal packs
    /// always hash equal.
    pub fn fingerprint(&self) -> Result<String> {
        let encoded = serde_json::to_vec(self)?;
        Ok(format!("{:x}", Sha256::digest(&encoded)))
    }
}
