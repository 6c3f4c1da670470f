use crate::table::GridTable;
use std::fmt;

/// Column headers of a rendered storyboard, in order.
pub const STORYBOARD_HEADERS: [&str; 8] = [
    "场号",
    "镜号",
    "SHOT",
    "运镜",
    "画面描述",
    "对白",
    "旁白/音效",
    "时长(s)",
];

/// One generated shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotRecord {
    pub scene: u32,
    pub shot: u32,
    pub shot_type: String,
    pub angle: String,
    pub movement: String,
    pub visual: String,
    pub dialogue: String,
    pub sound: String,
    pub duration_secs: u32,
}

impl ShotRecord {
    /// The `SHOT` column: `"{shot_type}/{angle}"`.
    pub fn descriptor(&self) -> String {
        format!("{}/{}", self.shot_type, self.angle)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.scene.to_string(),
            self.shot.to_string(),
            self.descriptor(),
            self.movement.clone(),
            self.visual.clone(),
            self.dialogue.clone(),
            self.sound.clone(),
            self.duration_secs.to_string(),
        ]
    }
}

/// Shots in the order they were generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Storyboard {
    pub shots: Vec<ShotRecord>,
}

impl Storyboard {
    /// Distinct scene numbers, in order of first appearance.
    pub fn scene_numbers(&self) -> Vec<u32> {
        let mut scenes: Vec<u32> = Vec::new();
        for shot in &self.shots {
            if scenes.last() != Some(&shot.scene) {
                scenes.push(shot.scene);
            }
        }
        scenes
    }

    pub fn to_table(&self) -> GridTable {
        let mut table = GridTable::new(STORYBOARD_HEADERS);
        for shot in &self.shots {
            table.push_row(shot.cells());
        }
        table
    }
}

impl fmt::Display for Storyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}
