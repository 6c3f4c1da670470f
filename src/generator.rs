use crate::config::ProductionConfig;
use crate::error::Result;
use crate::storyboard::{ShotRecord, Storyboard};
use crate::templates::{CompiledTemplates, PromptLanguage};
use crate::vocabulary::{ContentPack, PromptVocabulary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

pub const DEFAULT_SCENE_COUNT: usize = 3;
pub const SHOTS_PER_SCENE: RangeInclusive<u32> = 3..=6;
pub const SHOT_DURATION_SECS: RangeInclusive<u32> = 3..=8;
pub const MOTION_SEPARATOR: &str = " + ";

/// A pair of image prompts describing the same kind of frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    /// Tag list ending in render/quality tags
    pub en: String,
    /// `label:value` description
    pub zh: String,
}

impl ImagePrompt {
    pub fn get(&self, language: PromptLanguage) -> &str {
        match language {
            PromptLanguage::En => &self.en,
            PromptLanguage::Zh => &self.zh,
        }
    }
}

/// Samples storyboards, image prompts and motion formulas from a content pack.
///
/// Scene and shot numbers keep counting up across calls to
/// [`generate_storyboard`](Self::generate_storyboard) and are never reused by
/// one generator. Prompt generation never touches the counters.
pub struct ContentGenerator<R = StdRng> {
    production: ProductionConfig,
    pack: ContentPack,
    templates: CompiledTemplates,
    rng: R,
    next_scene: u32,
    next_shot: u32,
}

impl ContentGenerator<StdRng> {
    pub fn from_seed(production: ProductionConfig, pack: ContentPack, seed: u64) -> Result<Self> {
        Self::new(production, pack, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(production: ProductionConfig, pack: ContentPack) -> Result<Self> {
        Self::new(production, pack, StdRng::from_os_rng())
    }
}

impl<R: Rng> ContentGenerator<R> {
    pub fn new(production: ProductionConfig, pack: ContentPack, rng: R) -> Result<Self> {
        pack.validate()?;
        let templates = pack.templates.compile()?;
        Ok(Self {
            production,
            pack,
            templates,
            rng,
            next_scene: 1,
            next_shot: 1,
        })
    }

    pub fn production(&self) -> &ProductionConfig {
        &self.production
    }

    pub fn pack(&self) -> &ContentPack {
        &self.pack
    }

    /// Scene number the next generated scene will get.
    pub fn next_scene(&self) -> u32 {
        self.next_scene
    }

    /// Shot number the next generated shot will get.
    pub fn next_shot(&self) -> u32 {
        self.next_shot
    }

    /// Generate `scene_count` scenes and render them as a grid table.
    pub fn generate_storyboard(&mut self, scene_count: usize) -> String {
        self.plan_storyboard(scene_count).to_string()
    }

    /// Generate `scene_count` scenes of 3 to 6 shots each.
    pub fn plan_storyboard(&mut self, scene_count: usize) -> Storyboard {
        let mut board = Storyboard::default();

        for _ in 0..scene_count {
            let shot_count = self.rng.random_range(SHOTS_PER_SCENE);
            log::debug!("Scene {}: {} shots", self.next_scene, shot_count);

            for _ in 0..shot_count {
                let shot = self.sample_shot();
                board.shots.push(shot);
                self.next_shot += 1;
            }
            self.next_scene += 1;
        }

        board
    }

    fn sample_shot(&mut self) -> ShotRecord {
        let vocab = &self.pack.vocabulary.storyboard;
        let rng = &mut self.rng;

        let shot_type = vocab.shot_types.pick(rng);
        let angle = vocab.angles.pick(rng);
        let movement = vocab.movements.pick(rng);
        let duration_secs = rng.random_range(SHOT_DURATION_SECS);

        let visual = self.templates.visual.render(&[
            ("lighting", vocab.lightings.pick(rng)),
            ("character", self.production.main_character.as_str()),
            ("ability", vocab.abilities.pick(rng)),
        ]);
        let dialogue = vocab.dialogues.pick(rng).to_string();
        let sound = self
            .templates
            .sound
            .render(&[("sound", vocab.sound_variants.pick(rng))]);

        ShotRecord {
            scene: self.next_scene,
            shot: self.next_shot,
            shot_type: shot_type.to_string(),
            angle: angle.to_string(),
            movement: movement.to_string(),
            visual,
            dialogue,
            sound,
            duration_secs,
        }
    }

    /// Generate one prompt per language, each from its own independent draws.
    pub fn generate_image_prompt(&mut self) -> ImagePrompt {
        ImagePrompt {
            en: self.image_prompt(PromptLanguage::En),
            zh: self.image_prompt(PromptLanguage::Zh),
        }
    }

    pub fn image_prompt(&mut self, language: PromptLanguage) -> String {
        let image = &self.pack.vocabulary.image;
        let slots: &PromptVocabulary = match language {
            PromptLanguage::En => &image.en,
            PromptLanguage::Zh => &image.zh,
        };
        let lightings = &self.pack.vocabulary.storyboard.lightings;
        let rng = &mut self.rng;

        self.templates.image(language).render(&[
            ("style", image.styles.pick(rng)),
            ("shot", slots.shots.pick(rng)),
            ("character", self.production.main_character.as_str()),
            ("location", slots.locations.pick(rng)),
            ("lighting", lightings.pick(rng)),
            ("detail", slots.details.pick(rng)),
            ("material", image.materials.pick(rng)),
            ("mood", slots.moods.pick(rng)),
        ])
    }

    /// Camera move, action and result joined by [`MOTION_SEPARATOR`].
    pub fn generate_video_prompt(&mut self) -> String {
        let motion = &self.pack.vocabulary.motion;
        let rng = &mut self.rng;

        [
            motion.camera_moves.pick(rng),
            motion.actions.pick(rng),
            motion.results.pick(rng),
        ]
        .join(MOTION_SEPARATOR)
    }
}
