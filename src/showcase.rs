use crate::config::ProductionConfig;
use crate::generator::{ContentGenerator, ImagePrompt};
use crate::templates::PromptLanguage;
use rand::Rng;

/// Worked example printed under the generated motion formula.
pub const MOTION_EXAMPLE: &str = "镜头推进 + 机甲关节展开武器系统 + 突然定格在充能核心特写";

pub fn header(production: &ProductionConfig, generated_at: &str) -> String {
    format!(
        "⚙️ 《{}:{}》AI智能生产系统\n🕶 主演:{} | 生成时间:{}\n",
        production.world_view, production.main_conflict, production.main_character, generated_at
    )
}

fn fenced(label: &str, body: &str) -> String {
    format!("{}:\n```\n{}\n```\n", label, body)
}

/// Fenced blocks for the requested languages, English first.
pub fn image_prompt_blocks(prompt: &ImagePrompt, languages: &[PromptLanguage]) -> String {
    let mut out = String::new();
    for language in languages {
        let label = match language {
            PromptLanguage::En => "英文提示词",
            PromptLanguage::Zh => "中文描述",
        };
        out.push_str(&fenced(label, prompt.get(*language)));
    }
    out
}

pub fn motion_block(formula: &str) -> String {
    format!("动态公式: {}\n示例:『{}』\n", formula, MOTION_EXAMPLE)
}

/// The full demonstration: header, storyboard, image prompts, motion formula.
pub fn render<R: Rng>(
    generator: &mut ContentGenerator<R>,
    scene_count: usize,
    generated_at: &str,
) -> String {
    let mut out = header(generator.production(), generated_at);

    out.push_str("\n🎬 分镜故事板\n");
    out.push_str(&generator.generate_storyboard(scene_count));
    out.push('\n');

    out.push_str("\n🖼 AI图像提示词\n");
    let prompt = generator.generate_image_prompt();
    out.push_str(&image_prompt_blocks(
        &prompt,
        &[PromptLanguage::En, PromptLanguage::Zh],
    ));

    out.push_str("\n🎥 图生视频公式\n");
    out.push_str(&motion_block(&generator.generate_video_prompt()));

    out
}
